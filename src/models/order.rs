use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{IngredientCategory, Money};

/// Ingredient snapshot frozen into a line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineIngredient {
    pub id: String,
    pub name: String,
    pub price_add: Money,
    pub category: IngredientCategory,
}

/// Add-on snapshot frozen into a line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineAddOn {
    pub id: String,
    pub name: String,
    pub price: Money,
}

/// An immutable, finalized selection placed in a cart or order.
///
/// `item_total` is the per-unit pre-tax price; tax is applied once over the
/// whole cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: String,
    pub base_id: String,
    pub base_name: String,
    pub base_price: Money,
    pub ingredients: Vec<LineIngredient>,
    pub add_ons: Vec<LineAddOn>,
    pub quantity: u32,
    pub item_total: Money,
}

impl LineItem {
    /// Per-unit price times quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.item_total * self.quantity
    }

    /// Ingredient and add-on names joined for display.
    pub fn description(&self) -> String {
        self.ingredients
            .iter()
            .map(|i| i.name.as_str())
            .chain(self.add_ons.iter().map(|a| a.name.as_str()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Ready,
    Completed,
    Cancelled,
    Paid,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Paid => "paid",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryType {
    #[default]
    Pickup,
    Delivery,
}

impl fmt::Display for DeliveryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryType::Pickup => f.write_str("pickup"),
            DeliveryType::Delivery => f.write_str("delivery"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
}

impl Address {
    pub fn is_blank(&self) -> bool {
        self.street.is_empty()
            && self.city.is_empty()
            && self.state.is_empty()
            && self.zip_code.is_empty()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {} {}",
            self.street, self.city, self.state, self.zip_code
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// Order fields supplied by the caller; the store assigns id and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub user_id: String,
    pub items: Vec<LineItem>,
    pub subtotal: Money,
    pub tax: Money,
    pub delivery_fee: Money,
    pub total: Money,
    pub delivery_type: DeliveryType,
    pub delivery_address: Option<Address>,
    pub contact_info: ContactInfo,
}

/// A persisted order record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub status: OrderStatus,
    pub items: Vec<LineItem>,
    pub subtotal: Money,
    pub tax: Money,
    #[serde(default)]
    pub delivery_fee: Money,
    pub total: Money,
    pub delivery_type: DeliveryType,
    #[serde(default)]
    pub delivery_address: Option<Address>,
    pub contact_info: ContactInfo,
    #[serde(default)]
    pub checkout_session_id: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Order {
    pub fn from_new(id: String, new: NewOrder, now: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id: new.user_id,
            status: OrderStatus::Pending,
            items: new.items,
            subtotal: new.subtotal,
            tax: new.tax,
            delivery_fee: new.delivery_fee,
            total: new.total,
            delivery_type: new.delivery_type,
            delivery_address: new.delivery_address,
            contact_info: new.contact_info,
            checkout_session_id: None,
            created_at: now,
            updated_at: None,
        }
    }

    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_item(quantity: u32) -> LineItem {
        LineItem {
            id: "cart_1".to_string(),
            base_id: "b1".to_string(),
            base_name: "Classic Flour Tortilla".to_string(),
            base_price: Money::from_cents(799),
            ingredients: vec![LineIngredient {
                id: "i1".to_string(),
                name: "Grilled Chicken".to_string(),
                price_add: Money::from_cents(350),
                category: IngredientCategory::Protein,
            }],
            add_ons: vec![LineAddOn {
                id: "a1".to_string(),
                name: "Garlic Aioli".to_string(),
                price: Money::from_cents(50),
            }],
            quantity,
            item_total: Money::from_cents(1199),
        }
    }

    #[test]
    fn test_line_total() {
        assert_eq!(sample_item(3).line_total().cents(), 3597);
    }

    #[test]
    fn test_description_joins_names() {
        assert_eq!(sample_item(1).description(), "Grilled Chicken, Garlic Aioli");
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Paid).unwrap(),
            "\"paid\""
        );
        let s: OrderStatus = serde_json::from_str("\"preparing\"").unwrap();
        assert_eq!(s, OrderStatus::Preparing);
    }
}
