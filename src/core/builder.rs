use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use super::numbering::InvoiceNumbering;
use super::types::*;

/// Builder for invoices with a pre-populated item list, a fixed number, or a
/// fixed timestamp.
///
/// ```
/// use gst_invoice::core::*;
/// use rust_decimal_macros::dec;
///
/// let shop = ShopDetails {
///     name: "Your Shop Name".into(),
///     address: "Your Shop Address".into(),
///     gstin: "Your GSTIN".into(),
///     pan: "Your PAN".into(),
///     email: "your@email.com".into(),
/// };
/// let customer = CustomerDetails {
///     name: "Customer Name".into(),
///     address: "Customer Address".into(),
/// };
///
/// let invoice = InvoiceBuilder::new(shop, customer)
///     .add_item("Item 1", "HSN1", 2, dec!(100))
///     .add_item("Item 2", "HSN2", 1, dec!(200))
///     .build();
///
/// assert_eq!(invoice.total(), dec!(440.00));
/// ```
pub struct InvoiceBuilder {
    shop: ShopDetails,
    customer: CustomerDetails,
    lines: Vec<LineItem>,
    tax_rate: Decimal,
    number: Option<String>,
    numbering: InvoiceNumbering,
    issued_at: Option<NaiveDateTime>,
}

impl InvoiceBuilder {
    pub fn new(shop: ShopDetails, customer: CustomerDetails) -> Self {
        Self {
            shop,
            customer,
            lines: Vec::new(),
            tax_rate: DEFAULT_TAX_RATE,
            number: None,
            numbering: InvoiceNumbering::default(),
            issued_at: None,
        }
    }

    /// Tax rate as a fraction (default `0.1`).
    pub fn tax_rate(mut self, rate: Decimal) -> Self {
        self.tax_rate = rate;
        self
    }

    /// Use a fixed invoice number instead of generating one.
    pub fn number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    /// Generate the invoice number with this numbering scheme.
    pub fn numbering(mut self, numbering: InvoiceNumbering) -> Self {
        self.numbering = numbering;
        self
    }

    /// Use a fixed invoice/due timestamp instead of the current local time.
    pub fn issued_at(mut self, at: NaiveDateTime) -> Self {
        self.issued_at = Some(at);
        self
    }

    pub fn add_item(
        mut self,
        particulars: impl Into<String>,
        hsn: impl Into<String>,
        quantity: i64,
        rate: Decimal,
    ) -> Self {
        self.lines.push(LineItem::new(particulars, hsn, quantity, rate));
        self
    }

    pub fn add_line(mut self, line: LineItem) -> Self {
        self.lines.push(line);
        self
    }

    /// Build the invoice and calculate its totals.
    pub fn build(self) -> Invoice {
        let number = self
            .number
            .unwrap_or_else(|| self.numbering.next_number());
        let issued_at = self
            .issued_at
            .unwrap_or_else(|| chrono::Local::now().naive_local());

        Invoice::from_parts(
            number,
            issued_at,
            self.shop,
            self.customer,
            self.lines,
            self.tax_rate,
        )
    }
}
