pub mod constants;
pub mod pricing;
pub mod selection;

pub use constants::*;
pub use pricing::{tax_for, CartTotals, Totals};
pub use selection::{Limit, Selection, SelectionState, Toggle};
