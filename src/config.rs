use std::env;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::{debug, warn};

use crate::builder::constants::{CART_STORAGE_KEY, DELIVERY_FEE_CENTS, TAX_RATE_BPS};
use crate::models::Money;

pub const ENV_TAX_BPS: &str = "URBAN_WRAPS_TAX_BPS";
pub const ENV_DELIVERY_FEE_CENTS: &str = "URBAN_WRAPS_DELIVERY_FEE_CENTS";
pub const ENV_APP_URL: &str = "URBAN_WRAPS_APP_URL";

pub const DEFAULT_APP_URL: &str = "http://localhost:3000";

/// Runtime settings shared by the builder, cart and checkout.
///
/// The tax rate lives here once so the preview total and the charged total
/// cannot drift apart.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub tax_rate_bps: u32,
    pub delivery_fee: Money,
    pub app_url: String,
}

impl AppConfig {
    /// Defaults rooted at `data_dir`, no environment lookups.
    pub fn new<P: Into<PathBuf>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.into(),
            tax_rate_bps: TAX_RATE_BPS,
            delivery_fee: Money::from_cents(DELIVERY_FEE_CENTS),
            app_url: DEFAULT_APP_URL.to_string(),
        }
    }

    /// Defaults overridden by `URBAN_WRAPS_*` environment variables.
    pub fn load<P: Into<PathBuf>>(data_dir: P) -> Self {
        let defaults = Self::new(data_dir);
        Self {
            tax_rate_bps: try_load(ENV_TAX_BPS, defaults.tax_rate_bps),
            delivery_fee: Money::from_cents(try_load(
                ENV_DELIVERY_FEE_CENTS,
                defaults.delivery_fee.cents(),
            )),
            app_url: try_load(ENV_APP_URL, defaults.app_url.clone())
                .trim_end_matches('/')
                .to_string(),
            ..defaults
        }
    }

    pub fn menu_path(&self) -> PathBuf {
        self.data_dir.join("menu.json")
    }

    pub fn cart_path(&self) -> PathBuf {
        self.data_dir.join(format!("{CART_STORAGE_KEY}.json"))
    }

    pub fn session_path(&self) -> PathBuf {
        self.data_dir.join("session.json")
    }

    pub fn store_dir(&self) -> PathBuf {
        self.data_dir.join("store")
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value {raw:?}: {e}, using default {default}");
            default
        }),
        Err(_) => {
            debug!("{key} not set, using default: {default}");
            default
        }
    }
}
