//! Shopping cart module.
//!
//! [`CartState`] is an immutable snapshot with a pure transition function
//! over [`CartCommand`]s; [`CartStore`] owns the current snapshot for a
//! session. [`OrderSummary`] derives display totals from a snapshot.

mod command;
mod line;
mod state;
mod store;
mod summary;

pub use command::CartCommand;
pub(crate) use line::effective_price;
pub use line::{CartLine, ProductRef};
pub use state::CartState;
pub use store::{CartListener, CartStore};
pub use summary::{LinePricing, OrderSummary, PricingRules};
