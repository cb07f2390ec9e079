mod cart;
mod export;
mod ids;
mod persistence;
mod store;

pub use cart::Cart;
pub use export::write_orders_csv;
pub use ids::{generate_document_id, generate_line_id, generate_session_id};
pub use persistence::{load_cart, load_menu, save_cart, save_menu};
pub(crate) use persistence::write_json;
pub use store::{Collection, FileStore};
