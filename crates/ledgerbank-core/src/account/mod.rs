//! Account management module.
//!
//! Provides the account model and amount validation.

mod model;
mod validation;

pub use model::Account;
pub use validation::{MONEY_SCALE, parse_amount};
