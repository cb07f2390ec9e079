//! Table bookings and profile edits for the signed-in user.

use chrono::NaiveDate;
use tracing::info;

use crate::auth::Session;
use crate::error::{OrderError, Result};
use crate::models::{NewReservation, ProfileUpdate, Reservation, ReservationStatus, UserProfile};
use crate::state::FileStore;
use crate::validation::{normalize_phone, validate_profile_update, validate_reservation};

/// Validate and record a reservation. New bookings start out pending.
pub fn book_reservation(
    store: &FileStore,
    user: &Session,
    mut request: NewReservation,
    today: NaiveDate,
) -> Result<Reservation> {
    request.user_id = user.uid.clone();
    validate_reservation(&request, today)?;
    request.user_phone = normalize_phone(&request.user_phone)?;
    store.create_reservation(request)
}

/// Cancel one of the user's own reservations.
///
/// Reservations belonging to someone else are reported as not found.
pub fn cancel_reservation(store: &FileStore, user: &Session, id: &str) -> Result<Reservation> {
    let reservation = store
        .reservations_for_user(&user.uid)?
        .into_iter()
        .find(|r| r.id == id)
        .ok_or_else(|| OrderError::NotFound(format!("reservation {id}")))?;

    if !reservation.is_cancellable() {
        return Err(OrderError::InvalidInput(format!(
            "Reservation {id} is already {}",
            reservation.status
        )));
    }

    let cancelled = store.update_reservation_status(id, ReservationStatus::Cancelled)?;
    info!(reservation_id = %id, "reservation cancelled");
    Ok(cancelled)
}

/// Validate and apply a profile edit. Phone numbers are stored as digits.
pub fn edit_profile(store: &FileStore, user: &Session, mut update: ProfileUpdate) -> Result<UserProfile> {
    validate_profile_update(&update)?;
    if let Some(phone) = update.phone.as_mut() {
        if !phone.trim().is_empty() {
            *phone = normalize_phone(phone)?;
        } else {
            phone.clear();
        }
    }
    if let Some(address) = update.address.as_mut() {
        address.state = address.state.to_uppercase();
    }
    store.update_profile(&user.uid, update)
}
