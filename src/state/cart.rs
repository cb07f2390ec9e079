use serde::{Deserialize, Serialize};

use crate::builder::constants::{clamp_quantity, TAX_RATE_BPS};
use crate::builder::pricing::CartTotals;
use crate::models::{LineItem, Money};
use crate::state::ids::generate_line_id;

fn default_tax_bps() -> u32 {
    TAX_RATE_BPS
}

/// Line items awaiting checkout, with aggregate totals.
///
/// Totals are recomputed on every mutation using the same tax function as
/// the builder preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    items: Vec<LineItem>,
    subtotal: Money,
    tax: Money,
    total: Money,
    #[serde(skip, default = "default_tax_bps")]
    tax_bps: u32,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(TAX_RATE_BPS)
    }
}

impl Cart {
    pub fn new(tax_bps: u32) -> Self {
        Self {
            items: Vec::new(),
            subtotal: Money::ZERO,
            tax: Money::ZERO,
            total: Money::ZERO,
            tax_bps,
        }
    }

    /// Re-price a rehydrated cart at `tax_bps`. Stored totals are never
    /// trusted.
    pub fn with_tax_rate(mut self, tax_bps: u32) -> Self {
        self.tax_bps = tax_bps;
        for item in &mut self.items {
            item.quantity = clamp_quantity(item.quantity);
        }
        self.recalculate();
        self
    }

    /// Add a line, assigning a fresh id and clamping quantity to [1, 20].
    /// Returns the assigned id.
    pub fn add(&mut self, mut item: LineItem) -> String {
        item.id = generate_line_id();
        item.quantity = clamp_quantity(item.quantity);
        let id = item.id.clone();
        self.items.push(item);
        self.recalculate();
        id
    }

    /// Remove a line by id. Returns false when no line matched.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        let removed = self.items.len() != before;
        if removed {
            self.recalculate();
        }
        removed
    }

    /// Set a line's quantity. Zero or less removes the line; larger values
    /// clamp to [1, 20]. Returns false when no line matched.
    pub fn set_quantity(&mut self, id: &str, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove(id);
        }
        let quantity = clamp_quantity(u32::try_from(quantity).unwrap_or(u32::MAX));
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.quantity = quantity;
                self.recalculate();
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.recalculate();
    }

    pub fn get(&self, id: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    pub fn tax(&self) -> Money {
        self.tax
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn tax_bps(&self) -> u32 {
        self.tax_bps
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn recalculate(&mut self) {
        let totals = CartTotals::compute(&self.items, self.tax_bps);
        self.subtotal = totals.subtotal;
        self.tax = totals.tax;
        self.total = totals.total;
    }
}
