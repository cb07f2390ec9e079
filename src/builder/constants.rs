use std::collections::HashMap;
use std::sync::LazyLock;

use crate::models::IngredientCategory;

/// Maximum ingredients in one selection, across all categories.
pub const MAX_INGREDIENTS: usize = 10;

/// Maximum protein ingredients in one selection.
pub const MAX_PROTEINS: usize = 2;

/// Sales tax in basis points (8.5%).
pub const TAX_RATE_BPS: u32 = 850;

/// Quantity bounds for a single cart line.
pub const MIN_QUANTITY: u32 = 1;
pub const MAX_QUANTITY: u32 = 20;

/// Flat fee added to delivery orders, in cents.
pub const DELIVERY_FEE_CENTS: u64 = 500;

/// Longest description the checkout provider accepts per line item.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Fixed storage key for the persisted cart slot.
pub const CART_STORAGE_KEY: &str = "urban-wraps-cart";

// ─────────────────────────────────────────────────────────────────────────────
// Category capacity table
// ─────────────────────────────────────────────────────────────────────────────

/// Per-category selection caps. Categories absent from the table are
/// limited only by MAX_INGREDIENTS.
pub static CATEGORY_LIMITS: LazyLock<HashMap<IngredientCategory, usize>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    m.insert(IngredientCategory::Protein, MAX_PROTEINS);
    m
});

/// Cap for a category, or `None` when unlimited.
pub fn category_limit(category: IngredientCategory) -> Option<usize> {
    CATEGORY_LIMITS.get(&category).copied()
}

/// Human label for a tax rate, e.g. `Sales Tax (8.5%)`.
pub fn tax_label(bps: u32) -> String {
    let whole = bps / 100;
    let frac = bps % 100;
    if frac == 0 {
        format!("Sales Tax ({whole}%)")
    } else if frac % 10 == 0 {
        format!("Sales Tax ({whole}.{}%)", frac / 10)
    } else {
        format!("Sales Tax ({whole}.{frac:02}%)")
    }
}

/// Clamp a requested quantity into [MIN_QUANTITY, MAX_QUANTITY].
pub fn clamp_quantity(quantity: u32) -> u32 {
    quantity.clamp(MIN_QUANTITY, MAX_QUANTITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_limits() {
        assert_eq!(category_limit(IngredientCategory::Protein), Some(MAX_PROTEINS));
        assert_eq!(category_limit(IngredientCategory::Vegetable), None);
        assert_eq!(category_limit(IngredientCategory::Cheese), None);
    }

    #[test]
    fn test_tax_label() {
        assert_eq!(tax_label(850), "Sales Tax (8.5%)");
        assert_eq!(tax_label(700), "Sales Tax (7%)");
        assert_eq!(tax_label(725), "Sales Tax (7.25%)");
    }

    #[test]
    fn test_clamp_quantity() {
        assert_eq!(clamp_quantity(0), 1);
        assert_eq!(clamp_quantity(7), 7);
        assert_eq!(clamp_quantity(99), 20);
    }
}
