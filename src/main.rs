use chrono::Local;
use clap::Parser;
use tracing::debug;

use urban_wraps_rs::auth::{current_user, require_user, sign_in, sign_out};
use urban_wraps_rs::builder::{Selection, Toggle};
use urban_wraps_rs::checkout::{complete_checkout, place_order};
use urban_wraps_rs::cli::{AddressArgs, Cli, Command};
use urban_wraps_rs::config::AppConfig;
use urban_wraps_rs::error::{OrderError, Result};
use urban_wraps_rs::interface::{
    display_cart, display_checkout_session, display_menu, display_orders, display_profile,
    display_reservations, display_selection, prompt_checkout_details, prompt_reservation,
    prompt_yes_no, resolve_name, run_builder, BuilderOutcome,
};
use urban_wraps_rs::logging::init_tracing;
use urban_wraps_rs::models::{Address, DeliveryType, LineItem, Menu, ProfileUpdate};
use urban_wraps_rs::reservations::{book_reservation, cancel_reservation, edit_profile};
use urban_wraps_rs::state::{load_cart, load_menu, save_cart, write_orders_csv, FileStore};

fn main() {
    init_tracing();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(&cli.data_dir);
    debug!(data_dir = %config.data_dir().display(), tax_bps = config.tax_rate_bps, "config loaded");
    let command = cli.command.unwrap_or_default();

    match command {
        Command::Menu => cmd_menu(&config),
        Command::Order {
            base,
            ingredients,
            add_ons,
            quantity,
        } => match base {
            Some(base) => cmd_order_from_names(&config, &base, &ingredients, &add_ons, quantity),
            None => cmd_order(&config),
        },
        Command::Cart => cmd_cart(&config),
        Command::Remove { id } => cmd_remove(&config, &id),
        Command::Quantity { id, quantity } => cmd_quantity(&config, &id, quantity),
        Command::ClearCart => cmd_clear_cart(&config),
        Command::Checkout { delivery, address } => cmd_checkout(&config, delivery, &address),
        Command::Complete { session_id } => cmd_complete(&config, &session_id),
        Command::Orders { export } => cmd_orders(&config, export.as_deref()),
        Command::Reserve => cmd_reserve(&config),
        Command::Reservations => cmd_reservations(&config),
        Command::CancelReservation { id } => cmd_cancel_reservation(&config, &id),
        Command::Profile {
            name,
            phone,
            address,
        } => cmd_profile(&config, name, phone, &address),
        Command::SignIn { email, name } => cmd_sign_in(&config, &email, name.as_deref()),
        Command::SignOut => {
            sign_out(&config.session_path())?;
            println!("Signed out.");
            Ok(())
        }
    }
}

/// Active menu records, or `None` after telling the user how to seed one.
fn menu_or_hint(config: &AppConfig) -> Result<Option<Menu>> {
    let path = config.menu_path();
    if !path.exists() {
        eprintln!("Menu file not found: {}", path.display());
        eprintln!("Run the `seed` binary to create the default menu.");
        return Ok(None);
    }
    Ok(Some(load_menu(&path)?.active()))
}

fn open_store(config: &AppConfig) -> Result<FileStore> {
    FileStore::open(config.store_dir())
}

fn cmd_menu(config: &AppConfig) -> Result<()> {
    if let Some(menu) = menu_or_hint(config)? {
        display_menu(&menu);
    }
    Ok(())
}

fn add_to_cart(config: &AppConfig, item: LineItem) -> Result<()> {
    let mut cart = load_cart(config.cart_path(), config.tax_rate_bps)?;
    let name = item.base_name.clone();
    let quantity = item.quantity;
    let id = cart.add(item);
    save_cart(config.cart_path(), &cart)?;

    println!("Added {quantity} x {name} to cart [{id}]");
    println!("Cart total: {} ({} items)", cart.total(), cart.item_count());
    Ok(())
}

/// Interactive builder. Each finished wrap goes to the cart.
fn cmd_order(config: &AppConfig) -> Result<()> {
    let Some(menu) = menu_or_hint(config)? else {
        return Ok(());
    };
    if menu.bases.is_empty() || menu.ingredients.is_empty() {
        println!("Menu not available. Please try again later.");
        return Ok(());
    }

    loop {
        match run_builder(&menu, config.tax_rate_bps)? {
            BuilderOutcome::AddToCart(item) => add_to_cart(config, item)?,
            BuilderOutcome::Quit => return Ok(()),
        }
        if !prompt_yes_no("Build another wrap?", false)? {
            return Ok(());
        }
    }
}

/// Assemble a wrap from names given on the command line.
fn cmd_order_from_names(
    config: &AppConfig,
    base: &str,
    ingredients: &[String],
    add_ons: &[String],
    quantity: u32,
) -> Result<()> {
    let Some(menu) = menu_or_hint(config)? else {
        return Ok(());
    };

    let base = resolve_name(&menu.bases, base)?
        .ok_or_else(|| OrderError::InvalidInput(format!("Unknown base '{base}'")))?;
    let mut selection = Selection::with_tax_rate(config.tax_rate_bps).select_base(base);

    for name in ingredients {
        let Some(ingredient) = resolve_name(&menu.ingredients, name)? else {
            continue;
        };
        let (next, outcome) = selection.toggle_ingredient(ingredient);
        selection = next;
        match outcome {
            Toggle::Rejected(limit) => println!("Skipped {}: {limit}", ingredient.name),
            // Naming an ingredient twice toggles it back off.
            Toggle::Removed => println!("Removed: {}", ingredient.name),
            Toggle::Added => {}
        }
    }

    for name in add_ons {
        if let Some(add_on) = resolve_name(&menu.add_ons, name)? {
            selection = selection.toggle_add_on(add_on);
        }
    }

    display_selection(&selection);
    let item = selection
        .to_line_item(quantity)
        .ok_or(OrderError::IncompleteSelection)?;
    add_to_cart(config, item)
}

fn cmd_cart(config: &AppConfig) -> Result<()> {
    let cart = load_cart(config.cart_path(), config.tax_rate_bps)?;
    display_cart(&cart);
    Ok(())
}

fn cmd_remove(config: &AppConfig, id: &str) -> Result<()> {
    let mut cart = load_cart(config.cart_path(), config.tax_rate_bps)?;
    if !cart.remove(id) {
        return Err(OrderError::NotFound(format!("cart item {id}")));
    }
    save_cart(config.cart_path(), &cart)?;
    println!("Removed {id}.");
    display_cart(&cart);
    Ok(())
}

fn cmd_quantity(config: &AppConfig, id: &str, quantity: i64) -> Result<()> {
    let mut cart = load_cart(config.cart_path(), config.tax_rate_bps)?;
    if !cart.set_quantity(id, quantity) {
        return Err(OrderError::NotFound(format!("cart item {id}")));
    }
    save_cart(config.cart_path(), &cart)?;
    display_cart(&cart);
    Ok(())
}

fn cmd_clear_cart(config: &AppConfig) -> Result<()> {
    let mut cart = load_cart(config.cart_path(), config.tax_rate_bps)?;
    if cart.is_empty() {
        println!("Your cart is already empty.");
        return Ok(());
    }
    if prompt_yes_no("Remove every item from the cart?", false)? {
        cart.clear();
        save_cart(config.cart_path(), &cart)?;
        println!("Cart cleared.");
    }
    Ok(())
}

/// Address from flags, or `None` when no address flag was given.
fn address_from_args(args: &AddressArgs) -> Option<Address> {
    if args.is_empty() {
        return None;
    }
    Some(Address {
        street: args.street.clone().unwrap_or_default(),
        city: args.city.clone().unwrap_or_default(),
        state: args.state.clone().unwrap_or_default().to_uppercase(),
        zip_code: args.zip.clone().unwrap_or_default(),
    })
}

fn cmd_checkout(config: &AppConfig, delivery: bool, address: &AddressArgs) -> Result<()> {
    let user = require_user(&config.session_path(), "check out")?;
    let cart = load_cart(config.cart_path(), config.tax_rate_bps)?;
    if cart.is_empty() {
        return Err(OrderError::EmptyCart);
    }
    display_cart(&cart);

    let store = open_store(config)?;
    let profile = store.get_profile(&user.uid)?;

    let address = address_from_args(address);
    let delivery = if delivery || address.is_some() {
        Some(DeliveryType::Delivery)
    } else {
        None
    };
    let details = prompt_checkout_details(&user, profile.as_ref(), delivery, address)?;

    let (order, session) = place_order(config, &store, &cart, &user, &details)?;
    println!("Order {} placed ({}).", order.id, order.status);
    display_checkout_session(&session);
    println!("After paying, run: urban_wraps complete {}", session.id);
    Ok(())
}

fn cmd_complete(config: &AppConfig, session_id: &str) -> Result<()> {
    let store = open_store(config)?;
    let mut cart = load_cart(config.cart_path(), config.tax_rate_bps)?;
    let order = complete_checkout(&store, &mut cart, session_id)?;
    save_cart(config.cart_path(), &cart)?;

    println!("Payment received. Thank you!");
    println!("Order {}: {} ({})", order.id, order.total, order.status);
    Ok(())
}

fn cmd_orders(config: &AppConfig, export: Option<&std::path::Path>) -> Result<()> {
    let user = require_user(&config.session_path(), "view orders")?;
    let store = open_store(config)?;
    let orders = store.orders_for_user(&user.uid)?;
    display_orders(&orders);

    if let Some(path) = export {
        write_orders_csv(&orders, path)?;
        println!("Exported {} orders to {}", orders.len(), path.display());
    }
    Ok(())
}

fn cmd_reserve(config: &AppConfig) -> Result<()> {
    let user = require_user(&config.session_path(), "make a reservation")?;
    let store = open_store(config)?;
    let profile = store.get_profile(&user.uid)?;
    let today = Local::now().date_naive();

    let request = prompt_reservation(&user, profile.as_ref(), today)?;
    let reservation = book_reservation(&store, &user, request, today)?;
    println!(
        "Reservation {} requested for {} at {} ({}).",
        reservation.id, reservation.date, reservation.time, reservation.status
    );
    Ok(())
}

fn cmd_reservations(config: &AppConfig) -> Result<()> {
    let user = require_user(&config.session_path(), "view reservations")?;
    let store = open_store(config)?;
    display_reservations(&store.reservations_for_user(&user.uid)?);
    Ok(())
}

fn cmd_cancel_reservation(config: &AppConfig, id: &str) -> Result<()> {
    let user = require_user(&config.session_path(), "cancel a reservation")?;
    let store = open_store(config)?;
    if !prompt_yes_no("Cancel this reservation?", false)? {
        return Ok(());
    }
    let reservation = cancel_reservation(&store, &user, id)?;
    println!("Reservation {} {}.", reservation.id, reservation.status);
    Ok(())
}

fn cmd_profile(
    config: &AppConfig,
    name: Option<String>,
    phone: Option<String>,
    address: &AddressArgs,
) -> Result<()> {
    let user = require_user(&config.session_path(), "view your profile")?;
    let store = open_store(config)?;

    let update = ProfileUpdate {
        name,
        phone,
        address: address_from_args(address),
    };
    let profile = if update.name.is_none() && update.phone.is_none() && update.address.is_none() {
        store
            .get_profile(&user.uid)?
            .ok_or_else(|| OrderError::NotFound(format!("profile {}", user.uid)))?
    } else {
        let profile = edit_profile(&store, &user, update)?;
        println!("Profile updated.");
        profile
    };

    display_profile(&profile);
    Ok(())
}

fn cmd_sign_in(config: &AppConfig, email: &str, name: Option<&str>) -> Result<()> {
    if let Some(session) = current_user(&config.session_path())? {
        debug!(uid = %session.uid, "replacing existing session");
    }
    let store = open_store(config)?;
    let profile = sign_in(&config.session_path(), &store, email, name)?;
    println!("Signed in as {} <{}>", profile.name, profile.email);
    Ok(())
}
