use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Address;

/// Customer profile, created on first sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub uid: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub order_history: Vec<String>,
    #[serde(default)]
    pub reservation_history: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn new(uid: String, email: String, name: String, now: DateTime<Utc>) -> Self {
        Self {
            uid,
            email,
            name,
            phone: None,
            address: None,
            order_history: Vec::new(),
            reservation_history: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Editable profile fields. Empty strings clear the stored value.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<Address>,
}
