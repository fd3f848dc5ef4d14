//! Core invoice types, totals, numbering, and money formatting.
//!
//! Nothing in this module performs I/O except the JSON loaders on
//! [`InvoiceRequest`].

mod builder;
mod error;
pub mod money;
mod numbering;
mod request;
mod totals;
mod types;

pub use builder::*;
pub use error::*;
pub use money::{DEFAULT_CURRENCY_SYMBOL, format_amount, format_total};
pub use numbering::*;
pub use request::*;
pub use totals::*;
pub use types::*;
