//! PDF rendering of invoices.
//!
//! Text is set in an embedded TrueType font (so the rupee sign renders), the
//! logo is embedded as an image XObject, and the page content is produced by a
//! small flow layout engine: paragraphs, spacers, images and styled tables
//! stacked down the page, continuing on new pages as needed.
//!
//! ```no_run
//! use gst_invoice::core::InvoiceRequest;
//! use gst_invoice::render::{RenderConfig, save_invoice};
//!
//! let invoice = InvoiceRequest::sample().into_invoice();
//! let path = save_invoice(&invoice, &RenderConfig::default())?;
//! println!("Invoice generated as '{}'!", path.display());
//! # Ok::<(), gst_invoice::core::InvoiceError>(())
//! ```

mod canvas;
mod config;
mod document;
mod font;
mod layout;
mod logo;

pub use canvas::{Canvas, TextPaint};
pub use config::{Color, PageSize, RenderConfig};
pub use document::{
    FONT_RESOURCE, ITEM_HEADERS, LOGO_RESOURCE, invoice_story, output_file_name, render_invoice,
    render_invoice_with, save_invoice, save_invoice_at, write_invoice,
};
pub use font::{TtfFont, Typeface};
pub use layout::{
    CellRange, FRAME_PADDING, Flowable, Frame, HAlign, ParagraphStyle, Table, TableCommand,
    TableStyle, layout, wrap_words,
};
pub use logo::Logo;
