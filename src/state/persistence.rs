use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::Menu;
use crate::state::Cart;

/// Load the menu from a JSON file.
///
/// Records sharing an id are deduplicated, last occurrence wins.
pub fn load_menu<P: AsRef<Path>>(path: P) -> Result<Menu> {
    let content = fs::read_to_string(path.as_ref())?;
    let menu: Menu = serde_json::from_str(&content)?;
    let menu = dedup_menu(menu);
    debug!(
        bases = menu.bases.len(),
        ingredients = menu.ingredients.len(),
        add_ons = menu.add_ons.len(),
        "menu loaded"
    );
    Ok(menu)
}

/// Save the menu to a JSON file, creating the parent directory if needed.
pub fn save_menu<P: AsRef<Path>>(path: P, menu: &Menu) -> Result<()> {
    write_json(path.as_ref(), menu)
}

/// Rehydrate the cart slot.
///
/// A missing slot is an empty cart. A slot that fails to parse is logged and
/// also treated as empty so a bad write never locks the user out.
pub fn load_cart<P: AsRef<Path>>(path: P, tax_bps: u32) -> Result<Cart> {
    let path = path.as_ref();
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no saved cart");
            return Ok(Cart::new(tax_bps));
        }
        Err(e) => return Err(e.into()),
    };

    match serde_json::from_str::<Cart>(&content) {
        Ok(cart) => Ok(cart.with_tax_rate(tax_bps)),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "error loading cart, starting empty");
            Ok(Cart::new(tax_bps))
        }
    }
}

/// Persist the cart slot.
pub fn save_cart<P: AsRef<Path>>(path: P, cart: &Cart) -> Result<()> {
    write_json(path.as_ref(), cart)?;
    info!(items = cart.len(), total = %cart.total(), "cart saved");
    Ok(())
}

pub(crate) fn write_json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

fn dedup_menu(menu: Menu) -> Menu {
    Menu {
        bases: dedup_last(menu.bases, |b| b.id.clone()),
        ingredients: dedup_last(menu.ingredients, |i| i.id.clone()),
        add_ons: dedup_last(menu.add_ons, |a| a.id.clone()),
    }
}

/// Keep the last record per key, preserving the order of those survivors.
fn dedup_last<T, F: Fn(&T) -> String>(records: Vec<T>, key: F) -> Vec<T> {
    let mut seen = HashSet::new();
    let mut kept: Vec<T> = records
        .into_iter()
        .rev()
        .filter(|r| seen.insert(key(r)))
        .collect();
    kept.reverse();
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LineItem, Money};
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_menu_deduplication() {
        let json = r#"{
            "bases": [
                {"id": "b1", "name": "Classic", "basePrice": 7.99},
                {"id": "b2", "name": "Wheat", "basePrice": 8.49},
                {"id": "b1", "name": "Classic v2", "basePrice": 8.25}
            ],
            "ingredients": [],
            "addOns": []
        }"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let menu = load_menu(file.path()).unwrap();
        assert_eq!(menu.bases.len(), 2);
        assert_eq!(menu.bases[0].id, "b2");
        // Last occurrence wins
        assert_eq!(menu.bases[1].name, "Classic v2");
        assert_eq!(menu.bases[1].base_price.cents(), 825);
    }

    #[test]
    fn test_cart_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("urban-wraps-cart.json");

        let mut cart = Cart::default();
        cart.add(LineItem {
            id: String::new(),
            base_id: "b1".to_string(),
            base_name: "Classic".to_string(),
            base_price: Money::from_cents(799),
            ingredients: Vec::new(),
            add_ons: Vec::new(),
            quantity: 2,
            item_total: Money::from_cents(1149),
        });
        save_cart(&path, &cart).unwrap();

        let reloaded = load_cart(&path, 850).unwrap();
        assert_eq!(reloaded, cart);
    }

    #[test]
    fn test_missing_cart_is_empty() {
        let dir = tempdir().unwrap();
        let cart = load_cart(dir.path().join("none.json"), 850).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_corrupt_cart_is_empty() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{not json").unwrap();
        let cart = load_cart(file.path(), 850).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_stored_totals_are_recomputed() {
        let json = r#"{
            "items": [{
                "id": "cart_1_abc", "baseId": "b1", "baseName": "Classic", "basePrice": 7.99,
                "ingredients": [], "addOns": [], "quantity": 1, "itemTotal": 10.0
            }],
            "subtotal": 99.0, "tax": 99.0, "total": 99.0
        }"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let cart = load_cart(file.path(), 850).unwrap();
        assert_eq!(cart.subtotal().cents(), 1000);
        assert_eq!(cart.tax().cents(), 85);
        assert_eq!(cart.total().cents(), 1085);
    }
}
