use crate::models::{LineItem, Money};

/// Tax on a subtotal, rounded half-up to the cent.
///
/// Every tax figure in the crate goes through here: builder preview, cart
/// totals and the checkout tax line.
#[inline]
pub fn tax_for(subtotal: Money, tax_bps: u32) -> Money {
    subtotal.apply_rate_bps(tax_bps)
}

/// Price breakdown derived from a selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub base_price: Money,
    pub ingredients_total: Money,
    pub add_ons_total: Money,
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

impl Totals {
    pub fn compute(
        base_price: Money,
        ingredients_total: Money,
        add_ons_total: Money,
        tax_bps: u32,
    ) -> Self {
        let subtotal = base_price + ingredients_total + add_ons_total;
        let tax = tax_for(subtotal, tax_bps);
        Self {
            base_price,
            ingredients_total,
            add_ons_total,
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}

/// Aggregate totals over a list of line items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CartTotals {
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

impl CartTotals {
    pub fn compute(items: &[LineItem], tax_bps: u32) -> Self {
        let subtotal: Money = items.iter().map(LineItem::line_total).sum();
        let tax = tax_for(subtotal, tax_bps);
        Self {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}
