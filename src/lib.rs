//! # gst-invoice
//!
//! Tax invoice generation: line items with HSN codes, subtotal/tax/total
//! arithmetic, and a PDF with logo, shop and customer blocks, an
//! itemized table and a totals block.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//!
//! ## Quick Start
//!
//! ```rust
//! use gst_invoice::core::*;
//! use rust_decimal_macros::dec;
//!
//! let mut invoice = Invoice::new(
//!     ShopDetails {
//!         name: "Your Shop Name".into(),
//!         address: "Your Shop Address".into(),
//!         gstin: "Your GSTIN".into(),
//!         pan: "Your PAN".into(),
//!         email: "your@email.com".into(),
//!     },
//!     CustomerDetails {
//!         name: "Customer Name".into(),
//!         address: "Customer Address".into(),
//!     },
//! );
//! invoice.add_item("Item 1", "HSN1", 2, dec!(100));
//! invoice.add_item("Item 2", "HSN2", 1, dec!(200));
//!
//! assert_eq!(invoice.subtotal(), dec!(400.00));
//! assert_eq!(invoice.tax(), dec!(40.00));
//! assert_eq!(invoice.total(), dec!(440.00));
//! assert_eq!(format_total(DEFAULT_CURRENCY_SYMBOL, invoice.total()), "₹ 440.00");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Invoice model, totals, numbering, money formatting |
//! | `pdf` | PDF rendering (TrueType font embedding, logo image, tables) |
//! | `cli` | The `gst-invoice` binary |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "pdf")]
pub mod render;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
