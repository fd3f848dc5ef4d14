use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::numbering::InvoiceNumbering;
use super::totals;

/// Display format for invoice and due dates, e.g. `"05/03/2024 02:30 PM"`.
pub const DATE_DISPLAY_FORMAT: &str = "%d/%m/%Y %I:%M %p";

/// Tax rate applied when none is given (10%).
pub const DEFAULT_TAX_RATE: Decimal = dec!(0.1);

/// The issuing shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopDetails {
    /// Trading name, printed as the document's main heading.
    pub name: String,
    /// Postal address (free text).
    pub address: String,
    /// GST identification number.
    pub gstin: String,
    /// Permanent account number.
    pub pan: String,
    /// Contact email.
    pub email: String,
}

/// The invoiced customer (ship-to party).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub name: String,
    pub address: String,
}

/// One billable row.
///
/// Construction sanitizes its inputs: a quantity of zero or less becomes 1 and
/// a negative rate becomes 0. The amount is fixed at construction time and
/// saturates at [`Decimal::MAX`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    particulars: String,
    hsn: String,
    quantity: u64,
    rate: Decimal,
    amount: Decimal,
}

impl LineItem {
    pub fn new(
        particulars: impl Into<String>,
        hsn: impl Into<String>,
        quantity: i64,
        rate: Decimal,
    ) -> Self {
        let quantity = u64::try_from(quantity)
            .ok()
            .filter(|q| *q > 0)
            .unwrap_or(1);
        let rate = rate.max(Decimal::ZERO);
        Self {
            particulars: particulars.into(),
            hsn: hsn.into(),
            quantity,
            rate,
            amount: Decimal::from(quantity).saturating_mul(rate),
        }
    }

    /// Item description.
    pub fn particulars(&self) -> &str {
        &self.particulars
    }

    /// HSN classification code.
    pub fn hsn(&self) -> &str {
        &self.hsn
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Unit rate (never negative).
    pub fn rate(&self) -> Decimal {
        self.rate
    }

    /// `quantity × rate`.
    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

/// A tax invoice: parties, append-only line items, and derived totals.
///
/// `subtotal`, `tax` and `total` always reflect the current item list; they
/// are re-summed from scratch after every [`Invoice::add_item`].
#[derive(Debug, Clone, Serialize)]
pub struct Invoice {
    number: String,
    issued_at: NaiveDateTime,
    due_at: NaiveDateTime,
    shop: ShopDetails,
    customer: CustomerDetails,
    items: Vec<LineItem>,
    tax_rate: Decimal,
    subtotal: Decimal,
    tax: Decimal,
    total: Decimal,
}

impl Invoice {
    /// Create an empty invoice with the default 10% tax rate, a fresh invoice
    /// number, and the current local time as invoice and due date.
    pub fn new(shop: ShopDetails, customer: CustomerDetails) -> Self {
        Self::with_tax_rate(shop, customer, DEFAULT_TAX_RATE)
    }

    /// Create an empty invoice with an explicit tax rate (a fraction, e.g. `0.18`).
    pub fn with_tax_rate(shop: ShopDetails, customer: CustomerDetails, tax_rate: Decimal) -> Self {
        let issued_at = chrono::Local::now().naive_local();
        Self::from_parts(
            InvoiceNumbering::default().next_number(),
            issued_at,
            shop,
            customer,
            Vec::new(),
            tax_rate,
        )
    }

    pub(crate) fn from_parts(
        number: String,
        issued_at: NaiveDateTime,
        shop: ShopDetails,
        customer: CustomerDetails,
        items: Vec<LineItem>,
        tax_rate: Decimal,
    ) -> Self {
        let mut invoice = Self {
            number,
            issued_at,
            due_at: issued_at,
            shop,
            customer,
            items,
            tax_rate,
            subtotal: Decimal::ZERO,
            tax: Decimal::ZERO,
            total: Decimal::ZERO,
        };
        invoice.recalculate();
        invoice
    }

    /// Append a line item and recompute the totals.
    ///
    /// Quantities of zero or less are stored as 1, negative rates as 0.
    pub fn add_item(
        &mut self,
        particulars: impl Into<String>,
        hsn: impl Into<String>,
        quantity: i64,
        rate: Decimal,
    ) -> &LineItem {
        self.push_item(LineItem::new(particulars, hsn, quantity, rate))
    }

    /// Append an already constructed line item and recompute the totals.
    pub fn push_item(&mut self, item: LineItem) -> &LineItem {
        self.items.push(item);
        self.recalculate();
        let last = self.items.len() - 1;
        &self.items[last]
    }

    fn recalculate(&mut self) {
        let totals = totals::calculate_totals(&self.items, self.tax_rate);
        self.subtotal = totals.subtotal;
        self.tax = totals.tax;
        self.total = totals.total;
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn issued_at(&self) -> NaiveDateTime {
        self.issued_at
    }

    pub fn due_at(&self) -> NaiveDateTime {
        self.due_at
    }

    /// Invoice date in display form, e.g. `"05/03/2024 02:30 PM"`.
    pub fn invoice_date(&self) -> String {
        self.issued_at.format(DATE_DISPLAY_FORMAT).to_string()
    }

    /// Due date in display form. Always equal to the invoice date.
    pub fn due_date(&self) -> String {
        self.due_at.format(DATE_DISPLAY_FORMAT).to_string()
    }

    pub fn shop(&self) -> &ShopDetails {
        &self.shop
    }

    pub fn customer(&self) -> &CustomerDetails {
        &self.customer
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn tax_rate(&self) -> Decimal {
        self.tax_rate
    }

    /// Sum of all item amounts.
    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    /// `subtotal × tax_rate`.
    pub fn tax(&self) -> Decimal {
        self.tax
    }

    /// `subtotal + tax`.
    pub fn total(&self) -> Decimal {
        self.total
    }
}
