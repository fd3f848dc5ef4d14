use thiserror::Error;

/// Errors that can occur while loading inputs or producing an invoice document.
///
/// Building and extending an [`Invoice`](super::Invoice) never fails: invalid
/// quantities and rates are clamped instead of rejected.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InvoiceError {
    /// A required asset (font or logo) is missing or unreadable.
    #[error("asset error: {0}")]
    Asset(String),

    /// The font file could not be parsed as a TrueType font.
    #[error("font error: {0}")]
    Font(String),

    /// The logo could not be decoded.
    #[error("image error: {0}")]
    Image(String),

    /// PDF object or content stream encoding failed.
    #[error("PDF error: {0}")]
    Pdf(String),

    /// Invalid render configuration or invoice request.
    #[error("configuration error: {0}")]
    Config(String),

    /// Writing the output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
