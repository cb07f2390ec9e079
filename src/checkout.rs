//! Checkout: turns a cart into a pending order and a payment session.
//!
//! The session is built the way the hosted provider expects it (per-unit
//! amounts in cents, a separate tax line) and tax is recomputed here from the
//! transmitted items instead of trusting the cart's stored figures.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::Session;
use crate::builder::constants::{tax_label, MAX_DESCRIPTION_LEN};
use crate::builder::pricing::tax_for;
use crate::config::AppConfig;
use crate::error::{OrderError, Result};
use crate::models::{Address, ContactInfo, DeliveryType, LineItem, Money, NewOrder, Order, OrderStatus};
use crate::state::{generate_document_id, generate_session_id, Cart, FileStore};
use crate::validation::{validate_contact, validate_delivery_address, validate_line_item};

/// Payload sent to the session-creation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub items: Vec<LineItem>,
    pub user_id: String,
    pub user_email: String,
    pub delivery_type: DeliveryType,
    pub address: Option<Address>,
    pub order_id: String,
}

/// One chargeable line on the payment page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeLine {
    pub name: String,
    pub description: Option<String>,
    pub unit_amount_cents: u64,
    pub quantity: u32,
}

impl ChargeLine {
    pub fn amount(&self) -> Money {
        Money::from_cents(self.unit_amount_cents) * self.quantity
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionMetadata {
    pub user_id: String,
    pub delivery_type: DeliveryType,
    pub address: Option<Address>,
    pub item_ids: Vec<String>,
    pub order_id: String,
}

/// A created payment session and where to send the customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSession {
    pub id: String,
    pub url: String,
    pub success_url: String,
    pub cancel_url: String,
    pub customer_email: String,
    pub line_items: Vec<ChargeLine>,
    pub metadata: SessionMetadata,
}

impl CheckoutSession {
    /// Sum of every chargeable line.
    pub fn amount_total(&self) -> Money {
        self.line_items.iter().map(ChargeLine::amount).sum()
    }
}

/// Delivery choice and contact details collected at checkout.
#[derive(Debug, Clone)]
pub struct CheckoutDetails {
    pub delivery_type: DeliveryType,
    pub address: Option<Address>,
    pub contact: ContactInfo,
}

/// Truncate to at most `max` characters on a char boundary.
fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Build the chargeable lines for a set of items.
///
/// Items are charged per unit at their pre-tax price. Tax is recomputed
/// over the items and appended as its own line when non-zero; delivery
/// orders get a fee line.
pub fn build_charge_lines(
    items: &[LineItem],
    delivery_type: DeliveryType,
    config: &AppConfig,
) -> Vec<ChargeLine> {
    let mut lines: Vec<ChargeLine> = items
        .iter()
        .map(|item| {
            let description = truncate_chars(&item.description(), MAX_DESCRIPTION_LEN);
            ChargeLine {
                name: item.base_name.clone(),
                description: (!description.is_empty()).then_some(description),
                unit_amount_cents: item.item_total.cents(),
                quantity: item.quantity,
            }
        })
        .collect();

    let subtotal: Money = items.iter().map(LineItem::line_total).sum();
    let tax = tax_for(subtotal, config.tax_rate_bps);
    if !tax.is_zero() {
        lines.push(ChargeLine {
            name: tax_label(config.tax_rate_bps),
            description: None,
            unit_amount_cents: tax.cents(),
            quantity: 1,
        });
    }

    if delivery_type == DeliveryType::Delivery && !config.delivery_fee.is_zero() {
        lines.push(ChargeLine {
            name: "Delivery Fee".to_string(),
            description: None,
            unit_amount_cents: config.delivery_fee.cents(),
            quantity: 1,
        });
    }

    lines
}

/// Create a payment session. Rejects an empty item list.
pub fn create_session(request: &CheckoutRequest, config: &AppConfig) -> Result<CheckoutSession> {
    if request.items.is_empty() {
        return Err(OrderError::EmptyCart);
    }

    let id = generate_session_id();
    let line_items = build_charge_lines(&request.items, request.delivery_type, config);
    let session = CheckoutSession {
        url: format!("{}/pay/{id}", config.app_url),
        success_url: format!("{}/checkout/success?session_id={id}", config.app_url),
        cancel_url: format!("{}/checkout/cancel", config.app_url),
        customer_email: request.user_email.clone(),
        line_items,
        metadata: SessionMetadata {
            user_id: request.user_id.clone(),
            delivery_type: request.delivery_type,
            address: request.address.clone(),
            item_ids: request.items.iter().map(|i| i.id.clone()).collect(),
            order_id: request.order_id.clone(),
        },
        id,
    };

    info!(
        session_id = %session.id,
        order_id = %request.order_id,
        amount = %session.amount_total(),
        "checkout session created"
    );
    Ok(session)
}

/// Order fields for a cart, priced at the configured rate and fee.
pub fn new_order_from_cart(
    user_id: &str,
    cart: &Cart,
    details: &CheckoutDetails,
    config: &AppConfig,
) -> NewOrder {
    let subtotal: Money = cart.items().iter().map(LineItem::line_total).sum();
    let tax = tax_for(subtotal, config.tax_rate_bps);
    let delivery_fee = match details.delivery_type {
        DeliveryType::Delivery => config.delivery_fee,
        DeliveryType::Pickup => Money::ZERO,
    };

    NewOrder {
        user_id: user_id.to_string(),
        items: cart.items().to_vec(),
        subtotal,
        tax,
        delivery_fee,
        total: subtotal + tax + delivery_fee,
        delivery_type: details.delivery_type,
        delivery_address: match details.delivery_type {
            DeliveryType::Delivery => details.address.clone(),
            DeliveryType::Pickup => None,
        },
        contact_info: details.contact.clone(),
    }
}

/// Record a pending order for the cart and open a payment session for it.
///
/// Nothing is stored unless the session opens. The cart is left untouched;
/// it is cleared only once payment completes.
pub fn place_order(
    config: &AppConfig,
    store: &FileStore,
    cart: &Cart,
    user: &Session,
    details: &CheckoutDetails,
) -> Result<(Order, CheckoutSession)> {
    if cart.is_empty() {
        return Err(OrderError::EmptyCart);
    }
    for item in cart.items() {
        validate_line_item(item)?;
    }
    validate_contact(&details.contact)?;
    if details.delivery_type == DeliveryType::Delivery {
        let address = details
            .address
            .as_ref()
            .ok_or_else(|| OrderError::validation("address", "Address is required for delivery"))?;
        validate_delivery_address(address)?;
    }

    // The session needs the order id and the stored order needs the session
    // id, so the order is built first and written once with both.
    let mut order = Order::from_new(
        generate_document_id(),
        new_order_from_cart(&user.uid, cart, details, config),
        Utc::now(),
    );
    let request = CheckoutRequest {
        items: cart.items().to_vec(),
        user_id: user.uid.clone(),
        user_email: details.contact.email.clone(),
        delivery_type: details.delivery_type,
        address: order.delivery_address.clone(),
        order_id: order.id.clone(),
    };
    let session = create_session(&request, config)?;
    order.checkout_session_id = Some(session.id.clone());
    let order = store.insert_order(order)?;

    if session.amount_total() != order.total {
        warn!(
            order_total = %order.total,
            charged = %session.amount_total(),
            "charged amount differs from order total"
        );
    }

    Ok((order, session))
}

/// Mark the session's order as paid and empty the cart.
///
/// Completing an already-paid session is a no-op apart from the cart clear.
pub fn complete_checkout(store: &FileStore, cart: &mut Cart, session_id: &str) -> Result<Order> {
    let order = store
        .find_order_by_session(session_id)?
        .ok_or_else(|| OrderError::NotFound(format!("checkout session {session_id}")))?;

    let order = if order.status == OrderStatus::Paid {
        order
    } else {
        store.update_order_status(&order.id, OrderStatus::Paid)?
    };

    cart.clear();
    info!(order_id = %order.id, "checkout completed");
    Ok(order)
}
