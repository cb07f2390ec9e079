pub mod format;
pub mod lookup;
pub mod prompts;
pub mod render;

pub use format::{format_date, format_phone, format_timestamp};
pub use lookup::{rank_matches, Named};
pub use prompts::{
    prompt_address, prompt_checkout_details, prompt_quantity, prompt_reservation, prompt_yes_no,
    resolve_name, run_builder, BuilderOutcome,
};
pub use render::{
    display_cart, display_checkout_session, display_menu, display_orders, display_profile,
    display_reservations, display_selection,
};
