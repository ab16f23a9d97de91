//! Common types and constants shared across docmap modules.

mod constants;
mod sort_order;
mod value;

pub use constants::*;
pub use sort_order::SortOrder;
pub use value::{FromValue, Value};
