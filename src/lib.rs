pub mod auth;
pub mod builder;
pub mod checkout;
pub mod cli;
pub mod config;
pub mod error;
pub mod interface;
pub mod logging;
pub mod menu_seed;
pub mod models;
pub mod reservations;
pub mod state;
pub mod validation;

pub use error::{OrderError, Result};
pub use models::{LineItem, Menu, Money};
