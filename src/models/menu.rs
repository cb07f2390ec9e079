use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::Money;

/// Whether a menu record is offered to customers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuStatus {
    #[default]
    Active,
    Inactive,
}

/// A base item (wrap or bowl) that carries an order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuBase {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub base_price: Money,
    #[serde(default)]
    pub status: MenuStatus,
}

/// Ingredient category. Drives the per-category selection caps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngredientCategory {
    Protein,
    #[serde(rename = "veggie", alias = "vegetable")]
    Vegetable,
    Cheese,
    Other,
}

impl IngredientCategory {
    pub const ALL: [IngredientCategory; 4] = [
        IngredientCategory::Protein,
        IngredientCategory::Vegetable,
        IngredientCategory::Cheese,
        IngredientCategory::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            IngredientCategory::Protein => "Proteins",
            IngredientCategory::Vegetable => "Veggies",
            IngredientCategory::Cheese => "Cheese",
            IngredientCategory::Other => "Other",
        }
    }
}

impl fmt::Display for IngredientCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuIngredient {
    pub id: String,
    pub name: String,
    pub category: IngredientCategory,
    pub price_add: Money,
    #[serde(default)]
    pub status: MenuStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allergens: Vec<String>,
}

/// Add-on grouping used for display only; pricing ignores it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddOnKind {
    #[default]
    Sauce,
    Spice,
    Extra,
}

impl AddOnKind {
    pub const ALL: [AddOnKind; 3] = [AddOnKind::Sauce, AddOnKind::Spice, AddOnKind::Extra];

    pub fn label(self) -> &'static str {
        match self {
            AddOnKind::Sauce => "Sauces",
            AddOnKind::Spice => "Spices",
            AddOnKind::Extra => "Extras",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuAddOn {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: AddOnKind,
    pub price: Money,
    #[serde(default)]
    pub status: MenuStatus,
}

/// The full menu as read from the menu source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    #[serde(default)]
    pub bases: Vec<MenuBase>,
    #[serde(default)]
    pub ingredients: Vec<MenuIngredient>,
    #[serde(default)]
    pub add_ons: Vec<MenuAddOn>,
}

impl Menu {
    /// Copy of the menu restricted to active records.
    pub fn active(&self) -> Menu {
        Menu {
            bases: self
                .bases
                .iter()
                .filter(|b| b.status == MenuStatus::Active)
                .cloned()
                .collect(),
            ingredients: self
                .ingredients
                .iter()
                .filter(|i| i.status == MenuStatus::Active)
                .cloned()
                .collect(),
            add_ons: self
                .add_ons
                .iter()
                .filter(|a| a.status == MenuStatus::Active)
                .cloned()
                .collect(),
        }
    }

    pub fn base(&self, id: &str) -> Option<&MenuBase> {
        self.bases.iter().find(|b| b.id == id)
    }

    pub fn ingredient(&self, id: &str) -> Option<&MenuIngredient> {
        self.ingredients.iter().find(|i| i.id == id)
    }

    pub fn add_on(&self, id: &str) -> Option<&MenuAddOn> {
        self.add_ons.iter().find(|a| a.id == id)
    }

    /// Ingredients of one category, in menu order.
    pub fn ingredients_in(&self, category: IngredientCategory) -> Vec<&MenuIngredient> {
        self.ingredients
            .iter()
            .filter(|i| i.category == category)
            .collect()
    }

    pub fn add_ons_of(&self, kind: AddOnKind) -> Vec<&MenuAddOn> {
        self.add_ons.iter().filter(|a| a.kind == kind).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingredient_category_tags() {
        let json = r#"{"id": "i1", "name": "Tomatoes", "category": "veggie", "priceAdd": 0.5}"#;
        let ing: MenuIngredient = serde_json::from_str(json).unwrap();
        assert_eq!(ing.category, IngredientCategory::Vegetable);
        assert_eq!(ing.status, MenuStatus::Active);

        let alias = r#"{"id": "i2", "name": "Onion", "category": "vegetable", "priceAdd": 0.5}"#;
        let ing: MenuIngredient = serde_json::from_str(alias).unwrap();
        assert_eq!(ing.category, IngredientCategory::Vegetable);
    }

    #[test]
    fn test_active_filters_inactive_records() {
        let json = r#"{
            "bases": [
                {"id": "b1", "name": "Classic", "basePrice": 7.99, "status": "active"},
                {"id": "b2", "name": "Retired", "basePrice": 6.99, "status": "inactive"}
            ],
            "ingredients": [
                {"id": "i1", "name": "Chicken", "category": "protein", "priceAdd": 3.5, "status": "inactive"}
            ],
            "addOns": [
                {"id": "a1", "name": "Aioli", "type": "sauce", "price": 0.5}
            ]
        }"#;
        let menu: Menu = serde_json::from_str(json).unwrap();
        let active = menu.active();
        assert_eq!(active.bases.len(), 1);
        assert_eq!(active.bases[0].id, "b1");
        assert!(active.ingredients.is_empty());
        assert_eq!(active.add_ons.len(), 1);
    }
}
