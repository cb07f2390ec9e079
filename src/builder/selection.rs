use std::fmt;

use crate::builder::constants::{category_limit, MAX_INGREDIENTS, TAX_RATE_BPS};
use crate::builder::pricing::Totals;
use crate::models::{
    IngredientCategory, LineAddOn, LineIngredient, LineItem, MenuAddOn, MenuBase, MenuIngredient,
    Money,
};

/// Which cap blocked an ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    /// The overall MAX_INGREDIENTS cap.
    Ingredients { max: usize },
    /// A per-category cap from the capacity table.
    Category {
        category: IngredientCategory,
        max: usize,
    },
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Ingredients { max } => write!(f, "Maximum {max} ingredients allowed"),
            Limit::Category { category, max } => {
                write!(f, "Maximum {max} {} allowed", category.label().to_lowercase())
            }
        }
    }
}

/// Outcome of toggling an ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
    Rejected(Limit),
}

impl Toggle {
    /// True unless the toggle was rejected by a limit.
    #[inline]
    pub fn accepted(self) -> bool {
        !matches!(self, Toggle::Rejected(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Empty,
    InProgress,
}

/// The in-progress choice of base, ingredients and add-ons.
///
/// A plain value: every operation consumes the selection and returns the
/// next one, with totals recomputed before it is handed back. There is no
/// way to observe a selection whose totals lag its contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    base: Option<MenuBase>,
    ingredients: Vec<MenuIngredient>,
    add_ons: Vec<MenuAddOn>,
    totals: Totals,
    tax_bps: u32,
}

impl Default for Selection {
    fn default() -> Self {
        Self::new()
    }
}

impl Selection {
    /// Empty selection at the standard tax rate.
    pub fn new() -> Self {
        Self::with_tax_rate(TAX_RATE_BPS)
    }

    /// Empty selection taxed at `tax_bps` basis points.
    pub fn with_tax_rate(tax_bps: u32) -> Self {
        Self {
            base: None,
            ingredients: Vec::new(),
            add_ons: Vec::new(),
            totals: Totals::default(),
            tax_bps,
        }
    }

    /// Replace the base. Always succeeds.
    pub fn select_base(mut self, base: &MenuBase) -> Self {
        self.base = Some(base.clone());
        self.recompute()
    }

    /// Remove the ingredient if selected, otherwise add it when no cap
    /// blocks it. Removal never checks limits.
    pub fn toggle_ingredient(mut self, ingredient: &MenuIngredient) -> (Self, Toggle) {
        if let Some(pos) = self.ingredients.iter().position(|i| i.id == ingredient.id) {
            self.ingredients.remove(pos);
            return (self.recompute(), Toggle::Removed);
        }

        if let Some(limit) = self.limit_for(ingredient) {
            return (self, Toggle::Rejected(limit));
        }

        self.ingredients.push(ingredient.clone());
        (self.recompute(), Toggle::Added)
    }

    /// Remove the add-on if selected, otherwise add it. No limit applies.
    pub fn toggle_add_on(mut self, add_on: &MenuAddOn) -> Self {
        if let Some(pos) = self.add_ons.iter().position(|a| a.id == add_on.id) {
            self.add_ons.remove(pos);
        } else {
            self.add_ons.push(add_on.clone());
        }
        self.recompute()
    }

    /// Back to empty with all totals zeroed. The tax rate is kept.
    pub fn reset(self) -> Self {
        Self::with_tax_rate(self.tax_bps)
    }

    /// The cap that would reject adding `ingredient`, if any.
    ///
    /// Already-selected ingredients never hit a limit since toggling them
    /// removes. A category cap is reported ahead of the overall cap.
    pub fn limit_for(&self, ingredient: &MenuIngredient) -> Option<Limit> {
        if self.is_ingredient_selected(&ingredient.id) {
            return None;
        }
        if let Some(max) = category_limit(ingredient.category) {
            if self.category_count(ingredient.category) >= max {
                return Some(Limit::Category {
                    category: ingredient.category,
                    max,
                });
            }
        }
        if self.ingredients.len() >= MAX_INGREDIENTS {
            return Some(Limit::Ingredients {
                max: MAX_INGREDIENTS,
            });
        }
        None
    }

    /// Base chosen and at least one ingredient.
    pub fn can_finalize(&self) -> bool {
        self.base.is_some() && !self.ingredients.is_empty()
    }

    pub fn state(&self) -> SelectionState {
        if self.base.is_none() && self.ingredients.is_empty() && self.add_ons.is_empty() {
            SelectionState::Empty
        } else {
            SelectionState::InProgress
        }
    }

    pub fn protein_count(&self) -> usize {
        self.category_count(IngredientCategory::Protein)
    }

    pub fn category_count(&self, category: IngredientCategory) -> usize {
        self.ingredients
            .iter()
            .filter(|i| i.category == category)
            .count()
    }

    pub fn is_ingredient_selected(&self, id: &str) -> bool {
        self.ingredients.iter().any(|i| i.id == id)
    }

    pub fn is_add_on_selected(&self, id: &str) -> bool {
        self.add_ons.iter().any(|a| a.id == id)
    }

    pub fn base(&self) -> Option<&MenuBase> {
        self.base.as_ref()
    }

    pub fn ingredients(&self) -> &[MenuIngredient] {
        &self.ingredients
    }

    pub fn add_ons(&self) -> &[MenuAddOn] {
        &self.add_ons
    }

    pub fn totals(&self) -> &Totals {
        &self.totals
    }

    pub fn tax_bps(&self) -> u32 {
        self.tax_bps
    }

    pub fn base_price(&self) -> Money {
        self.totals.base_price
    }

    pub fn ingredients_total(&self) -> Money {
        self.totals.ingredients_total
    }

    pub fn add_ons_total(&self) -> Money {
        self.totals.add_ons_total
    }

    pub fn subtotal(&self) -> Money {
        self.totals.subtotal
    }

    pub fn tax(&self) -> Money {
        self.totals.tax
    }

    pub fn total(&self) -> Money {
        self.totals.total
    }

    /// Freeze the selection into a line item, or `None` if it cannot be
    /// finalized. The line id is left empty; the cart assigns it.
    pub fn to_line_item(&self, quantity: u32) -> Option<LineItem> {
        if !self.can_finalize() {
            return None;
        }
        let base = self.base.as_ref()?;

        Some(LineItem {
            id: String::new(),
            base_id: base.id.clone(),
            base_name: base.name.clone(),
            base_price: base.base_price,
            ingredients: self
                .ingredients
                .iter()
                .map(|i| LineIngredient {
                    id: i.id.clone(),
                    name: i.name.clone(),
                    price_add: i.price_add,
                    category: i.category,
                })
                .collect(),
            add_ons: self
                .add_ons
                .iter()
                .map(|a| LineAddOn {
                    id: a.id.clone(),
                    name: a.name.clone(),
                    price: a.price,
                })
                .collect(),
            quantity,
            item_total: self.totals.subtotal,
        })
    }

    fn recompute(mut self) -> Self {
        let base_price = self.base.as_ref().map(|b| b.base_price).unwrap_or_default();
        let ingredients_total = self.ingredients.iter().map(|i| i.price_add).sum();
        let add_ons_total = self.add_ons.iter().map(|a| a.price).sum();
        self.totals = Totals::compute(base_price, ingredients_total, add_ons_total, self.tax_bps);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AddOnKind, MenuStatus};

    fn base(id: &str, cents: u64) -> MenuBase {
        MenuBase {
            id: id.to_string(),
            name: format!("Base {id}"),
            description: String::new(),
            base_price: Money::from_cents(cents),
            status: MenuStatus::Active,
        }
    }

    fn ingredient(id: &str, category: IngredientCategory, cents: u64) -> MenuIngredient {
        MenuIngredient {
            id: id.to_string(),
            name: format!("Ingredient {id}"),
            category,
            price_add: Money::from_cents(cents),
            status: MenuStatus::Active,
            allergens: Vec::new(),
        }
    }

    fn add_on(id: &str, cents: u64) -> MenuAddOn {
        MenuAddOn {
            id: id.to_string(),
            name: format!("Add-on {id}"),
            kind: AddOnKind::Sauce,
            price: Money::from_cents(cents),
            status: MenuStatus::Active,
        }
    }

    #[test]
    fn test_select_base_replaces() {
        let sel = Selection::new()
            .select_base(&base("b1", 799))
            .select_base(&base("b2", 849));
        assert_eq!(sel.base().unwrap().id, "b2");
        assert_eq!(sel.base_price().cents(), 849);
        assert_eq!(sel.state(), SelectionState::InProgress);
    }

    #[test]
    fn test_toggle_add_on_round_trip() {
        let a = add_on("a1", 50);
        let sel = Selection::new().toggle_add_on(&a);
        assert!(sel.is_add_on_selected("a1"));
        assert_eq!(sel.add_ons_total().cents(), 50);

        let sel = sel.toggle_add_on(&a);
        assert!(!sel.is_add_on_selected("a1"));
        assert_eq!(sel.total(), Money::ZERO);
    }

    #[test]
    fn test_category_cap_reported_first() {
        let mut sel = Selection::new();
        for n in 0..2 {
            let (next, t) =
                sel.toggle_ingredient(&ingredient(&format!("p{n}"), IngredientCategory::Protein, 300));
            assert_eq!(t, Toggle::Added);
            sel = next;
        }
        for n in 0..8 {
            let (next, _) =
                sel.toggle_ingredient(&ingredient(&format!("v{n}"), IngredientCategory::Vegetable, 50));
            sel = next;
        }
        let limit = sel.limit_for(&ingredient("p9", IngredientCategory::Protein, 300));
        assert_eq!(
            limit,
            Some(Limit::Category {
                category: IngredientCategory::Protein,
                max: 2
            })
        );
        let limit = sel.limit_for(&ingredient("c1", IngredientCategory::Cheese, 100));
        assert_eq!(limit, Some(Limit::Ingredients { max: 10 }));
    }

    #[test]
    fn test_limit_messages() {
        let cat = Limit::Category {
            category: IngredientCategory::Protein,
            max: 2,
        };
        assert_eq!(cat.to_string(), "Maximum 2 proteins allowed");
        assert_eq!(
            Limit::Ingredients { max: 10 }.to_string(),
            "Maximum 10 ingredients allowed"
        );
    }

    #[test]
    fn test_to_line_item_snapshot() {
        let (sel, _) = Selection::new()
            .select_base(&base("b1", 799))
            .toggle_ingredient(&ingredient("i1", IngredientCategory::Protein, 350));
        let sel = sel.toggle_add_on(&add_on("a1", 50));

        let line = sel.to_line_item(2).unwrap();
        assert_eq!(line.base_id, "b1");
        assert_eq!(line.ingredients.len(), 1);
        assert_eq!(line.add_ons.len(), 1);
        assert_eq!(line.quantity, 2);
        assert_eq!(line.item_total.cents(), 1199);

        // Later edits do not reach the frozen line.
        let sel = sel.reset();
        assert_eq!(sel.total(), Money::ZERO);
        assert_eq!(line.item_total.cents(), 1199);
    }

    #[test]
    fn test_to_line_item_requires_finalizable() {
        let sel = Selection::new().select_base(&base("b1", 799));
        assert!(sel.to_line_item(1).is_none());
    }

    #[test]
    fn test_reset_keeps_tax_rate() {
        let sel = Selection::with_tax_rate(700).select_base(&base("b1", 1000));
        assert_eq!(sel.tax().cents(), 70);
        let sel = sel.reset();
        assert_eq!(sel.tax_bps(), 700);
        assert_eq!(sel.state(), SelectionState::Empty);
    }
}
