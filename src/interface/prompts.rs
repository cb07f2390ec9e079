use chrono::NaiveDate;
use dialoguer::{Confirm, Input, Select};

use crate::auth::Session;
use crate::builder::constants::{clamp_quantity, MAX_QUANTITY};
use crate::builder::{Selection, Toggle};
use crate::checkout::CheckoutDetails;
use crate::error::{OrderError, Result};
use crate::interface::lookup::{rank_matches, Named};
use crate::interface::render::display_selection;
use crate::models::{
    Address, ContactInfo, DeliveryType, LineItem, Menu, MenuIngredient, NewReservation,
    UserProfile,
};
use crate::validation::{
    normalize_phone, parse_reservation_date, validate_email, validate_name, validate_notes,
    validate_party_size, validate_state, validate_zip, TIME_SLOTS,
};

/// How an interactive builder session ended.
#[derive(Debug)]
pub enum BuilderOutcome {
    AddToCart(LineItem),
    Quit,
}

const BUILDER_ACTIONS: [&str; 7] = [
    "Choose base",
    "Add/remove ingredients",
    "Add/remove add-ons",
    "Review order",
    "Add to cart",
    "Start over",
    "Quit",
];

/// Drive one wrap from an empty selection to a cart line.
pub fn run_builder(menu: &Menu, tax_bps: u32) -> Result<BuilderOutcome> {
    let mut selection = Selection::with_tax_rate(tax_bps);

    loop {
        println!(
            "Total so far: {}  ({} ingredients)",
            selection.total(),
            selection.ingredients().len()
        );
        let action = Select::new()
            .with_prompt("What next?")
            .items(&BUILDER_ACTIONS[..])
            .default(0)
            .interact()?;

        selection = match action {
            0 => choose_base(menu, selection)?,
            1 => choose_ingredients(menu, selection)?,
            2 => choose_add_ons(menu, selection)?,
            3 => {
                display_selection(&selection);
                selection
            }
            4 => {
                if !selection.can_finalize() {
                    println!("{}", OrderError::IncompleteSelection);
                    continue;
                }
                let quantity = prompt_quantity()?;
                match selection.to_line_item(quantity) {
                    Some(item) => return Ok(BuilderOutcome::AddToCart(item)),
                    None => selection,
                }
            }
            5 => selection.reset(),
            _ => return Ok(BuilderOutcome::Quit),
        };
    }
}

fn choose_base(menu: &Menu, selection: Selection) -> Result<Selection> {
    if menu.bases.is_empty() {
        println!("No bases available.");
        return Ok(selection);
    }

    let options: Vec<String> = menu
        .bases
        .iter()
        .map(|b| format!("{} ({})", b.name, b.base_price))
        .collect();
    let current = selection
        .base()
        .and_then(|chosen| menu.bases.iter().position(|b| b.id == chosen.id))
        .unwrap_or(0);

    let index = Select::new()
        .with_prompt("Choose your base")
        .items(&options)
        .default(current)
        .interact()?;

    Ok(selection.select_base(&menu.bases[index]))
}

fn ingredient_option(selection: &Selection, ing: &MenuIngredient) -> String {
    let mark = if selection.is_ingredient_selected(&ing.id) {
        "[x]"
    } else if selection.limit_for(ing).is_some() {
        "[-]"
    } else {
        "[ ]"
    };
    format!("{mark} {} ({}, +{})", ing.name, ing.category, ing.price_add)
}

fn choose_ingredients(menu: &Menu, mut selection: Selection) -> Result<Selection> {
    loop {
        let mut options: Vec<String> = menu
            .ingredients
            .iter()
            .map(|ing| ingredient_option(&selection, ing))
            .collect();
        options.push("Done".to_string());

        let index = Select::new()
            .with_prompt("Toggle an ingredient")
            .items(&options)
            .default(0)
            .interact()?;
        let Some(ingredient) = menu.ingredients.get(index) else {
            return Ok(selection);
        };

        let (next, outcome) = selection.toggle_ingredient(ingredient);
        selection = next;
        match outcome {
            Toggle::Added => println!("Added: {}", ingredient.name),
            Toggle::Removed => println!("Removed: {}", ingredient.name),
            Toggle::Rejected(limit) => println!("{limit}"),
        }
    }
}

fn choose_add_ons(menu: &Menu, mut selection: Selection) -> Result<Selection> {
    loop {
        let mut options: Vec<String> = menu
            .add_ons
            .iter()
            .map(|a| {
                let mark = if selection.is_add_on_selected(&a.id) { "[x]" } else { "[ ]" };
                format!("{mark} {} ({}, +{})", a.name, a.kind.label(), a.price)
            })
            .collect();
        options.push("Done".to_string());

        let index = Select::new()
            .with_prompt("Toggle an add-on")
            .items(&options)
            .default(0)
            .interact()?;
        match menu.add_ons.get(index) {
            Some(add_on) => selection = selection.toggle_add_on(add_on),
            None => return Ok(selection),
        }
    }
}

/// Quantity for a new cart line, clamped to the allowed range.
pub fn prompt_quantity() -> Result<u32> {
    let quantity: u32 = Input::new()
        .with_prompt(format!("Quantity (1-{MAX_QUANTITY})"))
        .default(1)
        .interact_text()?;
    Ok(clamp_quantity(quantity))
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Free text checked by `check`; re-asks until it passes.
fn prompt_checked<F>(
    prompt: &str,
    default: Option<&str>,
    allow_empty: bool,
    check: F,
) -> Result<String>
where
    F: Fn(&str) -> Result<()> + 'static,
{
    let mut input = Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(allow_empty);
    if let Some(default) = default.filter(|d| !d.is_empty()) {
        input = input.default(default.to_string());
    }

    let value = input
        .validate_with(move |value: &String| -> std::result::Result<(), String> {
            let value = value.trim();
            if allow_empty && value.is_empty() {
                return Ok(());
            }
            check(value).map_err(|e| e.to_string())
        })
        .interact_text()?;
    Ok(value.trim().to_string())
}

fn prompt_phone(default: Option<&str>, required: bool) -> Result<String> {
    let phone = prompt_checked("Phone", default, !required, |p| normalize_phone(p).map(|_| ()))?;
    if phone.is_empty() {
        return Ok(phone);
    }
    normalize_phone(&phone)
}

/// Delivery address, pre-filled from the saved profile address.
pub fn prompt_address(saved: Option<&Address>) -> Result<Address> {
    let street = prompt_checked("Street", saved.map(|a| a.street.as_str()), false, |s| {
        if s.is_empty() {
            Err(OrderError::validation("street", "Street is required for delivery"))
        } else {
            Ok(())
        }
    })?;
    let city = prompt_checked("City", saved.map(|a| a.city.as_str()), false, |s| {
        if s.is_empty() {
            Err(OrderError::validation("city", "City is required for delivery"))
        } else {
            Ok(())
        }
    })?;
    let state = prompt_checked("State", saved.map(|a| a.state.as_str()), false, validate_state)?;
    let zip_code = prompt_checked("ZIP code", saved.map(|a| a.zip_code.as_str()), false, validate_zip)?;

    Ok(Address {
        street,
        city,
        state: state.to_uppercase(),
        zip_code,
    })
}

/// Collect delivery choice and contact details for checkout.
///
/// `delivery` and `address` come from command-line flags when given and are
/// only prompted for when missing.
pub fn prompt_checkout_details(
    user: &Session,
    profile: Option<&UserProfile>,
    delivery: Option<DeliveryType>,
    address: Option<Address>,
) -> Result<CheckoutDetails> {
    let delivery_type = match delivery {
        Some(kind) => kind,
        None => {
            let index = Select::new()
                .with_prompt("Pickup or delivery?")
                .items(&["Pickup", "Delivery"][..])
                .default(0)
                .interact()?;
            if index == 1 {
                DeliveryType::Delivery
            } else {
                DeliveryType::Pickup
            }
        }
    };

    let address = match (delivery_type, address) {
        (DeliveryType::Pickup, _) => None,
        (DeliveryType::Delivery, Some(address)) => Some(address),
        (DeliveryType::Delivery, None) => {
            Some(prompt_address(profile.and_then(|p| p.address.as_ref()))?)
        }
    };

    let name = prompt_checked("Name", profile.map(|p| p.name.as_str()), false, validate_name)?;
    let email = prompt_checked("Email", Some(user.email.as_str()), false, validate_email)?;
    let phone = prompt_phone(profile.and_then(|p| p.phone.as_deref()), false)?;

    Ok(CheckoutDetails {
        delivery_type,
        address,
        contact: ContactInfo { name, email, phone },
    })
}

/// Collect a table reservation. `today` bounds the earliest date.
pub fn prompt_reservation(
    user: &Session,
    profile: Option<&UserProfile>,
    today: NaiveDate,
) -> Result<NewReservation> {
    let name = prompt_checked("Name", profile.map(|p| p.name.as_str()), false, validate_name)?;
    let email = prompt_checked("Email", Some(user.email.as_str()), false, validate_email)?;
    let phone = prompt_phone(profile.and_then(|p| p.phone.as_deref()), true)?;

    let earliest = today.format("%Y-%m-%d").to_string();
    let date_input = prompt_checked(
        "Date (YYYY-MM-DD)",
        Some(earliest.as_str()),
        false,
        move |d| parse_reservation_date(d, today).map(|_| ()),
    )?;
    let date = parse_reservation_date(&date_input, today)?;

    let slot = Select::new()
        .with_prompt("Time")
        .items(&TIME_SLOTS[..])
        .default(0)
        .interact()?;

    let party_size: u32 = Input::new()
        .with_prompt("Party size")
        .default(2)
        .validate_with(|size: &u32| -> std::result::Result<(), String> {
            validate_party_size(*size).map_err(|e| e.to_string())
        })
        .interact_text()?;

    let notes = prompt_checked("Special requests (optional)", None, true, validate_notes)?;

    Ok(NewReservation {
        user_id: user.uid.clone(),
        user_name: name,
        user_email: email,
        user_phone: phone,
        date,
        time: TIME_SLOTS[slot].to_string(),
        party_size,
        notes: (!notes.is_empty()).then_some(notes),
    })
}

/// Resolve a typed name against menu records.
///
/// Exact ids and names resolve directly; otherwise fuzzy candidates are
/// offered for confirmation.
pub fn resolve_name<'a, T: Named>(items: &'a [T], query: &str) -> Result<Option<&'a T>> {
    let query = query.trim();
    if let Some(hit) = items
        .iter()
        .find(|item| item.id() == query || item.name().eq_ignore_ascii_case(query))
    {
        return Ok(Some(hit));
    }

    let candidates = rank_matches(items, query);
    match candidates.as_slice() {
        [] => {
            println!("No match for '{query}'");
            Ok(None)
        }
        [(item, _)] => {
            let confirm = prompt_yes_no(&format!("Did you mean '{}'?", item.name()), true)?;
            Ok(confirm.then_some(*item))
        }
        _ => {
            let mut options: Vec<&str> = candidates.iter().take(5).map(|(i, _)| i.name()).collect();
            let shown = options.len();
            options.push("None of these");

            let index = Select::new()
                .with_prompt("Which did you mean?")
                .items(&options)
                .default(0)
                .interact()?;
            Ok((index < shown).then(|| candidates[index].0))
        }
    }
}
