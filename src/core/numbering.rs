use uuid::Uuid;

/// Prefix used when no other is configured. Operators are expected to replace
/// it with their own series, e.g. `"ACME/INV/24-25/"`.
pub const DEFAULT_INVOICE_PREFIX: &str = "YOUR/INV/24-25/001-";

/// Invoice number generator.
///
/// Generates invoice numbers in the format `{prefix}{uuid}`, e.g.
/// `"YOUR/INV/24-25/001-3f2b8c1e-..."`. Numbers are unique per call but are
/// neither sequential nor tracked across runs.
#[derive(Debug, Clone)]
pub struct InvoiceNumbering {
    prefix: String,
}

impl Default for InvoiceNumbering {
    fn default() -> Self {
        Self::new(DEFAULT_INVOICE_PREFIX)
    }
}

impl InvoiceNumbering {
    /// Create a generator with the given prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// The configured prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Generate a fresh invoice number.
    pub fn next_number(&self) -> String {
        format!("{}{}", self.prefix, Uuid::new_v4())
    }
}
