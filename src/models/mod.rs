mod menu;
mod money;
mod order;
mod reservation;
mod user;

pub use menu::{AddOnKind, IngredientCategory, Menu, MenuAddOn, MenuBase, MenuIngredient, MenuStatus};
pub use money::Money;
pub use order::{
    Address, ContactInfo, DeliveryType, LineAddOn, LineIngredient, LineItem, NewOrder, Order,
    OrderStatus,
};
pub use reservation::{NewReservation, Reservation, ReservationStatus};
pub use user::{ProfileUpdate, UserProfile};
