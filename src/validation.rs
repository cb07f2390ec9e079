use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::builder::constants::{MAX_INGREDIENTS, MAX_QUANTITY, MIN_QUANTITY};
use crate::error::{OrderError, Result};
use crate::models::{Address, ContactInfo, LineItem, NewReservation, ProfileUpdate};

pub const MIN_NAME_LEN: usize = 2;
pub const MIN_PARTY_SIZE: u32 = 1;
pub const MAX_PARTY_SIZE: u32 = 20;
pub const MAX_NOTES_LEN: usize = 500;

/// Bookable reservation slots, 11 AM to 9 PM on the half hour.
pub const TIME_SLOTS: [&str; 21] = [
    "11:00 AM", "11:30 AM", "12:00 PM", "12:30 PM", "1:00 PM", "1:30 PM", "2:00 PM", "2:30 PM",
    "3:00 PM", "3:30 PM", "4:00 PM", "4:30 PM", "5:00 PM", "5:30 PM", "6:00 PM", "6:30 PM",
    "7:00 PM", "7:30 PM", "8:00 PM", "8:30 PM", "9:00 PM",
];

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{10}$").expect("valid phone regex"));
static ZIP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{5}$").expect("valid zip regex"));
static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"));

pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().chars().count() < MIN_NAME_LEN {
        return Err(OrderError::validation(
            "name",
            format!("Name must be at least {MIN_NAME_LEN} characters"),
        ));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<()> {
    if !EMAIL_RE.is_match(email.trim()) {
        return Err(OrderError::validation("email", "Invalid email address"));
    }
    Ok(())
}

/// Strip formatting and require exactly 10 digits. Returns the digits.
pub fn normalize_phone(phone: &str) -> Result<String> {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if !PHONE_RE.is_match(&digits) {
        return Err(OrderError::validation("phone", "Phone must be 10 digits"));
    }
    Ok(digits)
}

pub fn validate_state(state: &str) -> Result<()> {
    if state.chars().count() != 2 || !state.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(OrderError::validation("state", "State must be 2 characters"));
    }
    Ok(())
}

pub fn validate_zip(zip: &str) -> Result<()> {
    if !ZIP_RE.is_match(zip) {
        return Err(OrderError::validation("zipCode", "ZIP code must be 5 digits"));
    }
    Ok(())
}

/// A delivery address needs every field filled in.
pub fn validate_delivery_address(address: &Address) -> Result<()> {
    if address.street.trim().is_empty() {
        return Err(OrderError::validation("street", "Street is required for delivery"));
    }
    if address.city.trim().is_empty() {
        return Err(OrderError::validation("city", "City is required for delivery"));
    }
    validate_state(&address.state)?;
    validate_zip(&address.zip_code)
}

/// Profile addresses may be partial; only filled fields are checked.
pub fn validate_profile_address(address: &Address) -> Result<()> {
    if !address.state.is_empty() {
        validate_state(&address.state)?;
    }
    if !address.zip_code.is_empty() {
        validate_zip(&address.zip_code)?;
    }
    Ok(())
}

pub fn validate_contact(contact: &ContactInfo) -> Result<()> {
    validate_name(&contact.name)?;
    validate_email(&contact.email)?;
    if !contact.phone.is_empty() {
        normalize_phone(&contact.phone)?;
    }
    Ok(())
}

pub fn validate_party_size(size: u32) -> Result<()> {
    if size < MIN_PARTY_SIZE {
        return Err(OrderError::validation("partySize", "At least 1 person required"));
    }
    if size > MAX_PARTY_SIZE {
        return Err(OrderError::validation(
            "partySize",
            format!("Maximum party size is {MAX_PARTY_SIZE}"),
        ));
    }
    Ok(())
}

pub fn validate_notes(notes: &str) -> Result<()> {
    if notes.chars().count() > MAX_NOTES_LEN {
        return Err(OrderError::validation(
            "notes",
            format!("Notes must be less than {MAX_NOTES_LEN} characters"),
        ));
    }
    Ok(())
}

/// Parse a `YYYY-MM-DD` date that is not before `today`.
pub fn parse_reservation_date(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim();
    if !DATE_RE.is_match(input) {
        return Err(OrderError::validation("date", "Invalid date format"));
    }
    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| OrderError::validation("date", "Invalid date format"))?;
    if date < today {
        return Err(OrderError::validation("date", "Date cannot be in the past"));
    }
    Ok(date)
}

/// Canonical slot label for a case-insensitive match against TIME_SLOTS.
pub fn parse_time_slot(input: &str) -> Result<&'static str> {
    let wanted = input.trim();
    TIME_SLOTS
        .iter()
        .copied()
        .find(|slot| slot.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| OrderError::validation("time", "Please select a valid time slot"))
}

pub fn validate_reservation(reservation: &NewReservation, today: NaiveDate) -> Result<()> {
    validate_name(&reservation.user_name)?;
    validate_email(&reservation.user_email)?;
    normalize_phone(&reservation.user_phone)?;
    if reservation.date < today {
        return Err(OrderError::validation("date", "Date cannot be in the past"));
    }
    parse_time_slot(&reservation.time)?;
    validate_party_size(reservation.party_size)?;
    if let Some(notes) = &reservation.notes {
        validate_notes(notes)?;
    }
    Ok(())
}

pub fn validate_profile_update(update: &ProfileUpdate) -> Result<()> {
    if let Some(name) = &update.name {
        validate_name(name)?;
    }
    if let Some(phone) = &update.phone {
        if !phone.is_empty() {
            normalize_phone(phone)?;
        }
    }
    if let Some(address) = &update.address {
        validate_profile_address(address)?;
    }
    Ok(())
}

/// Line items must reference a base, stay within the ingredient cap and
/// quantity bounds, and carry a positive price.
pub fn validate_line_item(item: &LineItem) -> Result<()> {
    if item.base_id.is_empty() {
        return Err(OrderError::validation("baseId", "Base selection is required"));
    }
    if item.base_price.is_zero() {
        return Err(OrderError::validation("basePrice", "Base price must be positive"));
    }
    if item.ingredients.len() > MAX_INGREDIENTS {
        return Err(OrderError::validation(
            "ingredients",
            format!("Maximum {MAX_INGREDIENTS} ingredients allowed"),
        ));
    }
    if !(MIN_QUANTITY..=MAX_QUANTITY).contains(&item.quantity) {
        return Err(OrderError::validation(
            "quantity",
            format!("Maximum {MAX_QUANTITY} items per order"),
        ));
    }
    if item.item_total.is_zero() {
        return Err(OrderError::validation("itemTotal", "Item total must be positive"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn test_phone_normalization() {
        assert_eq!(normalize_phone("(555) 123-4567").unwrap(), "5551234567");
        assert!(normalize_phone("555-1234").is_err());
    }

    #[test]
    fn test_email() {
        assert!(validate_email("sam@example.com").is_ok());
        assert!(validate_email("sam@example").is_err());
        assert!(validate_email("not an email").is_err());
    }

    #[test]
    fn test_state_and_zip() {
        assert!(validate_state("CA").is_ok());
        assert!(validate_state("Cal").is_err());
        assert!(validate_zip("94110").is_ok());
        assert!(validate_zip("9411").is_err());
    }

    #[test]
    fn test_party_size_bounds() {
        assert!(validate_party_size(0).is_err());
        assert!(validate_party_size(1).is_ok());
        assert!(validate_party_size(20).is_ok());
        assert!(validate_party_size(21).is_err());
    }

    #[test]
    fn test_notes_length() {
        assert!(validate_notes(&"x".repeat(500)).is_ok());
        assert!(validate_notes(&"x".repeat(501)).is_err());
    }

    #[test]
    fn test_reservation_date() {
        assert_eq!(
            parse_reservation_date("2026-10-18", today()).unwrap(),
            today()
        );
        assert!(parse_reservation_date("2026-10-17", today()).is_err());
        assert!(parse_reservation_date("10/20/2026", today()).is_err());
        assert!(parse_reservation_date("2026-02-30", today()).is_err());
    }

    #[test]
    fn test_time_slot() {
        assert_eq!(parse_time_slot("6:30 pm").unwrap(), "6:30 PM");
        assert!(parse_time_slot("10:30 AM").is_err());
        assert!(parse_time_slot("9:30 PM").is_err());
    }

    #[test]
    fn test_profile_address_partial_ok() {
        let address = Address {
            street: String::new(),
            city: "Oakland".to_string(),
            state: String::new(),
            zip_code: String::new(),
        };
        assert!(validate_profile_address(&address).is_ok());
        assert!(validate_delivery_address(&address).is_err());
    }

    #[test]
    fn test_line_item_quantity() {
        let mut item = LineItem {
            id: String::new(),
            base_id: "b1".to_string(),
            base_name: "Classic".to_string(),
            base_price: Money::from_cents(799),
            ingredients: Vec::new(),
            add_ons: Vec::new(),
            quantity: 1,
            item_total: Money::from_cents(799),
        };
        assert!(validate_line_item(&item).is_ok());
        item.quantity = 21;
        assert!(validate_line_item(&item).is_err());
    }
}
