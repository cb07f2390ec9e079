use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Urban Wraps: build custom wraps, check out, and book a table.
#[derive(Parser, Debug)]
#[command(name = "urban_wraps")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Directory holding the menu, cart, session and order store.
    #[arg(short, long, default_value = ".urban_wraps", global = true)]
    pub data_dir: PathBuf,
}

/// Address fields shared by checkout and profile edits.
#[derive(Args, Debug, Default, Clone)]
pub struct AddressArgs {
    #[arg(long)]
    pub street: Option<String>,

    #[arg(long)]
    pub city: Option<String>,

    /// Two-letter state code.
    #[arg(long)]
    pub state: Option<String>,

    /// Five-digit ZIP code.
    #[arg(long)]
    pub zip: Option<String>,
}

impl AddressArgs {
    pub fn is_empty(&self) -> bool {
        self.street.is_none() && self.city.is_none() && self.state.is_none() && self.zip.is_none()
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the active menu.
    Menu,

    /// Build a wrap and add it to the cart.
    ///
    /// Without flags the builder runs interactively. With `--base` the wrap
    /// is assembled from the named items instead.
    Order {
        /// Base name or id.
        #[arg(long)]
        base: Option<String>,

        /// Ingredient name or id (repeatable).
        #[arg(long = "ingredient")]
        ingredients: Vec<String>,

        /// Add-on name or id (repeatable).
        #[arg(long = "add-on")]
        add_ons: Vec<String>,

        #[arg(long, default_value_t = 1)]
        quantity: u32,
    },

    /// Show the cart.
    Cart,

    /// Remove a line from the cart.
    Remove { id: String },

    /// Change a cart line's quantity. Zero removes it.
    Quantity {
        id: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Empty the cart.
    ClearCart,

    /// Place a pending order for the cart and open a payment session.
    Checkout {
        /// Deliver instead of pickup.
        #[arg(long)]
        delivery: bool,

        #[command(flatten)]
        address: AddressArgs,
    },

    /// Confirm payment for a checkout session.
    Complete { session_id: String },

    /// Show order history.
    Orders {
        /// Also write the orders to a CSV file.
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Book a table.
    Reserve,

    /// Show your reservations.
    Reservations,

    /// Cancel one of your reservations.
    CancelReservation { id: String },

    /// Show or edit your profile.
    Profile {
        #[arg(long)]
        name: Option<String>,

        /// Phone number; an empty value clears it.
        #[arg(long)]
        phone: Option<String>,

        #[command(flatten)]
        address: AddressArgs,
    },

    /// Sign in, creating a profile on first use.
    SignIn {
        email: String,

        /// Display name for a new profile.
        #[arg(long)]
        name: Option<String>,
    },

    /// Sign out.
    SignOut,
}

impl Default for Command {
    fn default() -> Self {
        Command::Order {
            base: None,
            ingredients: Vec::new(),
            add_ons: Vec::new(),
            quantity: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_interactive_order() {
        let cli = Cli::parse_from(["urban_wraps"]);
        assert!(matches!(
            cli.command.unwrap_or_default(),
            Command::Order { base: None, .. }
        ));
        assert_eq!(cli.data_dir, PathBuf::from(".urban_wraps"));
    }

    #[test]
    fn test_order_flags() {
        let cli = Cli::parse_from([
            "urban_wraps",
            "order",
            "--base",
            "Lettuce Bowl",
            "--ingredient",
            "Falafel",
            "--ingredient",
            "Tomatoes",
            "--add-on",
            "Tzatziki",
            "--quantity",
            "2",
        ]);
        match cli.command {
            Some(Command::Order {
                base,
                ingredients,
                add_ons,
                quantity,
            }) => {
                assert_eq!(base.as_deref(), Some("Lettuce Bowl"));
                assert_eq!(ingredients, vec!["Falafel", "Tomatoes"]);
                assert_eq!(add_ons, vec!["Tzatziki"]);
                assert_eq!(quantity, 2);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_checkout_address_flags() {
        let cli = Cli::parse_from([
            "urban_wraps",
            "--data-dir",
            "/tmp/uw",
            "checkout",
            "--delivery",
            "--street",
            "1 Main St",
            "--zip",
            "94607",
        ]);
        assert_eq!(cli.data_dir, PathBuf::from("/tmp/uw"));
        match cli.command {
            Some(Command::Checkout { delivery, address }) => {
                assert!(delivery);
                assert_eq!(address.street.as_deref(), Some("1 Main St"));
                assert_eq!(address.zip.as_deref(), Some("94607"));
                assert!(address.city.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_negative_quantity_parses() {
        let cli = Cli::parse_from(["urban_wraps", "quantity", "cart_1_abc", "-1"]);
        assert!(matches!(
            cli.command,
            Some(Command::Quantity { quantity: -1, .. })
        ));
    }
}
