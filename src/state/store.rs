use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

use crate::error::{OrderError, Result};
use crate::models::{
    NewOrder, NewReservation, Order, OrderStatus, ProfileUpdate, Reservation, ReservationStatus,
    UserProfile,
};
use crate::state::ids::generate_document_id;
use crate::state::persistence::write_json;

/// Record collections held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Orders,
    Reservations,
    Users,
}

impl Collection {
    pub const ALL: [Collection; 3] = [Collection::Orders, Collection::Reservations, Collection::Users];

    pub fn name(self) -> &'static str {
        match self {
            Collection::Orders => "orders",
            Collection::Reservations => "reservations",
            Collection::Users => "users",
        }
    }
}

/// Document store backed by one JSON file per collection.
///
/// New records get a store-assigned id and creation timestamp. Creating an
/// order or reservation also appends its id to the owner's profile history.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn open<P: Into<PathBuf>>(dir: P) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    // ── orders ──────────────────────────────────────────────────────────────

    pub fn create_order(&self, new: NewOrder) -> Result<Order> {
        self.insert_order(Order::from_new(generate_document_id(), new, Utc::now()))
    }

    /// Store a fully built order in a single write to `orders.json`.
    ///
    /// The owner's history is appended afterwards in a second write. If that
    /// one fails the order stays recorded without a history entry.
    pub fn insert_order(&self, order: Order) -> Result<Order> {
        let mut orders: Vec<Order> = self.read(Collection::Orders)?;
        if orders.iter().any(|o| o.id == order.id) {
            return Err(OrderError::InvalidInput(format!("order {} already exists", order.id)));
        }
        orders.push(order.clone());
        self.write(Collection::Orders, &orders)?;

        self.append_history(&order.user_id, |p| p.order_history.push(order.id.clone()))?;
        info!(order_id = %order.id, user_id = %order.user_id, total = %order.total, "order created");
        Ok(order)
    }

    pub fn get_order(&self, id: &str) -> Result<Option<Order>> {
        let orders: Vec<Order> = self.read(Collection::Orders)?;
        Ok(orders.into_iter().find(|o| o.id == id))
    }

    /// A user's orders, newest first.
    pub fn orders_for_user(&self, user_id: &str) -> Result<Vec<Order>> {
        let orders: Vec<Order> = self.read(Collection::Orders)?;
        let mut mine: Vec<Order> = orders
            .into_iter()
            .rev()
            .filter(|o| o.user_id == user_id)
            .collect();
        mine.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(mine)
    }

    pub fn find_order_by_session(&self, session_id: &str) -> Result<Option<Order>> {
        let orders: Vec<Order> = self.read(Collection::Orders)?;
        Ok(orders
            .into_iter()
            .find(|o| o.checkout_session_id.as_deref() == Some(session_id)))
    }

    pub fn update_order_status(&self, id: &str, status: OrderStatus) -> Result<Order> {
        self.update_order(id, |order| order.status = status)
    }

    fn update_order<F: FnOnce(&mut Order)>(&self, id: &str, apply: F) -> Result<Order> {
        let mut orders: Vec<Order> = self.read(Collection::Orders)?;
        let order = orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| OrderError::NotFound(format!("order {id}")))?;
        apply(order);
        order.updated_at = Some(Utc::now());
        let updated = order.clone();
        self.write(Collection::Orders, &orders)?;
        info!(order_id = %id, status = %updated.status, "order updated");
        Ok(updated)
    }

    // ── reservations ────────────────────────────────────────────────────────

    pub fn create_reservation(&self, new: NewReservation) -> Result<Reservation> {
        let mut reservations: Vec<Reservation> = self.read(Collection::Reservations)?;
        let reservation = Reservation::from_new(generate_document_id(), new, Utc::now());
        reservations.push(reservation.clone());
        self.write(Collection::Reservations, &reservations)?;

        self.append_history(&reservation.user_id, |p| {
            p.reservation_history.push(reservation.id.clone())
        })?;
        info!(
            reservation_id = %reservation.id,
            date = %reservation.date,
            party_size = reservation.party_size,
            "reservation created"
        );
        Ok(reservation)
    }

    /// A user's reservations, newest first.
    pub fn reservations_for_user(&self, user_id: &str) -> Result<Vec<Reservation>> {
        let reservations: Vec<Reservation> = self.read(Collection::Reservations)?;
        let mut mine: Vec<Reservation> = reservations
            .into_iter()
            .rev()
            .filter(|r| r.user_id == user_id)
            .collect();
        mine.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(mine)
    }

    pub fn update_reservation_status(
        &self,
        id: &str,
        status: ReservationStatus,
    ) -> Result<Reservation> {
        let mut reservations: Vec<Reservation> = self.read(Collection::Reservations)?;
        let reservation = reservations
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| OrderError::NotFound(format!("reservation {id}")))?;
        reservation.status = status;
        reservation.updated_at = Utc::now();
        let updated = reservation.clone();
        self.write(Collection::Reservations, &reservations)?;
        info!(reservation_id = %id, %status, "reservation updated");
        Ok(updated)
    }

    // ── profiles ────────────────────────────────────────────────────────────

    pub fn get_profile(&self, uid: &str) -> Result<Option<UserProfile>> {
        let users: Vec<UserProfile> = self.read(Collection::Users)?;
        Ok(users.into_iter().find(|u| u.uid == uid))
    }

    pub fn find_profile_by_email(&self, email: &str) -> Result<Option<UserProfile>> {
        let users: Vec<UserProfile> = self.read(Collection::Users)?;
        Ok(users
            .into_iter()
            .find(|u| u.email.eq_ignore_ascii_case(email)))
    }

    /// Insert or replace a profile by uid.
    pub fn put_profile(&self, profile: &UserProfile) -> Result<()> {
        let mut users: Vec<UserProfile> = self.read(Collection::Users)?;
        match users.iter_mut().find(|u| u.uid == profile.uid) {
            Some(existing) => *existing = profile.clone(),
            None => users.push(profile.clone()),
        }
        self.write(Collection::Users, &users)
    }

    /// Apply an edit. Empty phone or a blank address clears the stored value.
    pub fn update_profile(&self, uid: &str, update: ProfileUpdate) -> Result<UserProfile> {
        let mut profile = self
            .get_profile(uid)?
            .ok_or_else(|| OrderError::NotFound(format!("profile {uid}")))?;

        if let Some(name) = update.name {
            profile.name = name.trim().to_string();
        }
        if let Some(phone) = update.phone {
            profile.phone = (!phone.is_empty()).then_some(phone);
        }
        if let Some(address) = update.address {
            profile.address = (!address.is_blank()).then_some(address);
        }
        profile.updated_at = Utc::now();

        self.put_profile(&profile)?;
        info!(uid = %uid, "profile updated");
        Ok(profile)
    }

    // ── maintenance ─────────────────────────────────────────────────────────

    /// Delete every record in a collection. Returns how many were removed.
    pub fn clear(&self, collection: Collection) -> Result<usize> {
        let records: Vec<serde_json::Value> = self.read(collection)?;
        self.write::<serde_json::Value>(collection, &[])?;
        info!(collection = collection.name(), removed = records.len(), "collection cleared");
        Ok(records.len())
    }

    fn append_history<F: FnOnce(&mut UserProfile)>(&self, uid: &str, apply: F) -> Result<()> {
        if let Some(mut profile) = self.get_profile(uid)? {
            apply(&mut profile);
            profile.updated_at = Utc::now();
            self.put_profile(&profile)?;
        }
        Ok(())
    }

    fn path(&self, collection: Collection) -> PathBuf {
        self.dir.join(format!("{}.json", collection.name()))
    }

    fn read<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>> {
        match fs::read_to_string(self.path(collection)) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write<T: Serialize>(&self, collection: Collection, records: &[T]) -> Result<()> {
        write_json(&self.path(collection), records)
    }
}
