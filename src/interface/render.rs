use crate::builder::constants::{tax_label, MAX_INGREDIENTS, MAX_PROTEINS};
use crate::builder::Selection;
use crate::checkout::CheckoutSession;
use crate::interface::format::{format_date, format_phone, format_timestamp};
use crate::models::{
    AddOnKind, IngredientCategory, Menu, Order, Reservation, UserProfile,
};
use crate::state::Cart;

/// Display the active menu grouped by section.
pub fn display_menu(menu: &Menu) {
    if menu.is_empty() {
        println!("Menu not available. Run the `seed` binary to create one.");
        return;
    }

    println!();
    println!("=== Bases ===");
    for base in &menu.bases {
        println!("  {:<28} {:>7}  {}", base.name, base.base_price.to_string(), base.description);
    }

    for category in IngredientCategory::ALL {
        let items = menu.ingredients_in(category);
        if items.is_empty() {
            continue;
        }
        println!();
        println!("=== {} ===", category.label());
        for ing in items {
            let allergens = if ing.allergens.is_empty() {
                String::new()
            } else {
                format!("  (contains: {})", ing.allergens.join(", "))
            };
            println!("  {:<28} +{:>6}{}", ing.name, ing.price_add.to_string(), allergens);
        }
    }

    for kind in AddOnKind::ALL {
        let items = menu.add_ons_of(kind);
        if items.is_empty() {
            continue;
        }
        println!();
        println!("=== {} ===", kind.label());
        for add_on in items {
            let price = if add_on.price.is_zero() {
                "Free".to_string()
            } else {
                format!("+{}", add_on.price)
            };
            println!("  {:<28} {:>7}", add_on.name, price);
        }
    }
    println!();
}

/// Price breakdown for the in-progress selection.
pub fn display_selection(selection: &Selection) {
    println!();
    println!("--- Your Order ---");

    match selection.base() {
        Some(base) => println!("Base: {} ({})", base.name, base.base_price),
        None => println!("Base: (none selected)"),
    }

    println!(
        "Ingredients: {} / {} selected, {} / {} proteins",
        selection.ingredients().len(),
        MAX_INGREDIENTS,
        selection.protein_count(),
        MAX_PROTEINS
    );
    for ing in selection.ingredients() {
        println!("  + {} ({})", ing.name, ing.price_add);
    }
    for add_on in selection.add_ons() {
        println!("  + {} ({})", add_on.name, add_on.price);
    }

    let t = selection.totals();
    println!();
    println!("{:<20} {:>9}", "Base", t.base_price.to_string());
    println!("{:<20} {:>9}", "Ingredients", t.ingredients_total.to_string());
    println!("{:<20} {:>9}", "Add-ons", t.add_ons_total.to_string());
    println!("{:<20} {:>9}", "Subtotal", t.subtotal.to_string());
    println!("{:<20} {:>9}", tax_label(selection.tax_bps()), t.tax.to_string());
    println!("{:<20} {:>9}", "Total", t.total.to_string());
    println!();
}

/// Cart contents with line ids (needed by `remove` and `quantity`).
pub fn display_cart(cart: &Cart) {
    if cart.is_empty() {
        println!("Your cart is empty.");
        return;
    }

    println!();
    println!("=== Cart ({} items) ===", cart.item_count());
    println!();

    for item in cart.items() {
        println!(
            "  {} x{}  {:>9}   [{}]",
            item.base_name,
            item.quantity,
            item.line_total().to_string(),
            item.id
        );
        let description = item.description();
        if !description.is_empty() {
            println!("      {description}");
        }
        if item.quantity > 1 {
            println!("      {} each", item.item_total);
        }
    }

    println!();
    println!("{:<20} {:>9}", "Subtotal", cart.subtotal().to_string());
    println!("{:<20} {:>9}", tax_label(cart.tax_bps()), cart.tax().to_string());
    println!("{:<20} {:>9}", "Total", cart.total().to_string());
    println!();
}

pub fn display_orders(orders: &[Order]) {
    if orders.is_empty() {
        println!("No orders yet.");
        return;
    }

    println!();
    println!("=== Order History ({}) ===", orders.len());
    for order in orders {
        println!();
        println!(
            "Order {}  {}  [{}]  {}",
            order.id,
            format_timestamp(order.created_at),
            order.status,
            order.delivery_type
        );
        for item in &order.items {
            println!("  {} x{}  {}", item.base_name, item.quantity, item.line_total());
        }
        if let Some(address) = &order.delivery_address {
            println!("  Deliver to: {address}");
        }
        if !order.delivery_fee.is_zero() {
            println!("  Delivery fee: {}", order.delivery_fee);
        }
        println!("  Total: {}", order.total);
    }
    println!();
}

pub fn display_reservations(reservations: &[Reservation]) {
    if reservations.is_empty() {
        println!("No reservations yet.");
        return;
    }

    println!();
    println!("=== Reservations ({}) ===", reservations.len());
    for r in reservations {
        println!();
        println!(
            "{}  {} at {}, party of {}  [{}]",
            r.id,
            format_date(r.date),
            r.time,
            r.party_size,
            r.status
        );
        println!("  {} / {} / {}", r.user_name, r.user_email, format_phone(&r.user_phone));
        if let Some(notes) = &r.notes {
            println!("  Notes: {notes}");
        }
    }
    println!();
}

pub fn display_profile(profile: &UserProfile) {
    println!();
    println!("=== Profile ===");
    println!("Name:    {}", profile.name);
    println!("Email:   {}", profile.email);
    match &profile.phone {
        Some(phone) => println!("Phone:   {}", format_phone(phone)),
        None => println!("Phone:   -"),
    }
    match &profile.address {
        Some(address) => println!("Address: {address}"),
        None => println!("Address: -"),
    }
    println!("Orders:  {}", profile.order_history.len());
    println!("Reservations: {}", profile.reservation_history.len());
    println!("Member since {}", format_timestamp(profile.created_at));
    println!();
}

pub fn display_checkout_session(session: &CheckoutSession) {
    println!();
    println!("=== Checkout ===");
    for line in &session.line_items {
        println!("  {:<28} x{:<3} {:>9}", line.name, line.quantity, line.amount().to_string());
    }
    println!("  {:<32} {:>9}", "Amount due", session.amount_total().to_string());
    println!();
    println!("Complete payment at: {}", session.url);
    println!("Session: {}", session.id);
    println!();
}
