//! Invoice input data, as supplied by the caller or loaded from JSON.

use std::path::Path;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::builder::InvoiceBuilder;
use super::error::InvoiceError;
use super::numbering::InvoiceNumbering;
use super::totals::checked_totals;
use super::types::{CustomerDetails, DEFAULT_TAX_RATE, Invoice, ShopDetails};

/// Everything needed to create one invoice.
///
/// ```json
/// {
///   "shop": { "name": "…", "address": "…", "gstin": "…", "pan": "…", "email": "…" },
///   "customer": { "name": "…", "address": "…" },
///   "items": [ { "particulars": "Item 1", "hsn": "HSN1", "quantity": 2, "rate": 100 } ],
///   "taxRate": 0.1
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRequest {
    pub shop: ShopDetails,
    pub customer: CustomerDetails,
    #[serde(default)]
    pub items: Vec<ItemRequest>,
    /// Fractional tax rate; `0.1` when absent.
    #[serde(default)]
    pub tax_rate: Option<Decimal>,
    /// Invoice number prefix; the default prefix when absent.
    #[serde(default)]
    pub number_prefix: Option<String>,
}

/// One requested line item. Missing quantities default to 1, missing rates to 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequest {
    pub particulars: String,
    pub hsn: String,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    #[serde(default)]
    pub rate: Decimal,
}

fn default_quantity() -> i64 {
    1
}

impl InvoiceRequest {
    /// The built-in demonstration invoice: a placeholder shop and customer and
    /// two items (2 × 100, 1 × 200).
    pub fn sample() -> Self {
        Self {
            shop: ShopDetails {
                name: "Your Shop Name".into(),
                address: "Your Shop Address".into(),
                gstin: "Your GSTIN".into(),
                pan: "Your PAN".into(),
                email: "your@email.com".into(),
            },
            customer: CustomerDetails {
                name: "Customer Name".into(),
                address: "Customer Address".into(),
            },
            items: vec![
                ItemRequest {
                    particulars: "Item 1".into(),
                    hsn: "HSN1".into(),
                    quantity: 2,
                    rate: dec!(100),
                },
                ItemRequest {
                    particulars: "Item 2".into(),
                    hsn: "HSN2".into(),
                    quantity: 1,
                    rate: dec!(200),
                },
            ],
            tax_rate: None,
            number_prefix: None,
        }
    }

    /// Parse a request, rejecting one whose amounts or totals would not fit
    /// in a [`Decimal`].
    pub fn from_json(json: &str) -> Result<Self, InvoiceError> {
        let request: Self = serde_json::from_str(json).map_err(|e| {
            InvoiceError::Config(format!("failed to parse invoice request: {e}"))
        })?;
        request.check_amounts()?;
        Ok(request)
    }

    /// Fails with [`InvoiceError::Config`] when the totals overflow.
    pub fn check_amounts(&self) -> Result<(), InvoiceError> {
        let tax_rate = self.tax_rate.unwrap_or(DEFAULT_TAX_RATE);
        let raw = self.items.iter().map(|item| (item.quantity, item.rate));
        match checked_totals(raw, tax_rate) {
            Some(_) => Ok(()),
            None => Err(InvoiceError::Config(
                "invoice amounts exceed the representable range".into(),
            )),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, InvoiceError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            InvoiceError::Config(format!(
                "failed to read invoice request {}: {e}",
                path.display()
            ))
        })?;
        Self::from_json(&contents)
    }

    /// Start a builder populated with this request's parties and items.
    pub fn to_builder(&self) -> InvoiceBuilder {
        let mut builder = InvoiceBuilder::new(self.shop.clone(), self.customer.clone())
            .tax_rate(self.tax_rate.unwrap_or(DEFAULT_TAX_RATE));
        if let Some(prefix) = &self.number_prefix {
            builder = builder.numbering(InvoiceNumbering::new(prefix.clone()));
        }
        for item in &self.items {
            builder = builder.add_item(
                item.particulars.clone(),
                item.hsn.clone(),
                item.quantity,
                item.rate,
            );
        }
        builder
    }

    /// Create the invoice with a fresh number and the current local time.
    pub fn into_invoice(self) -> Invoice {
        self.to_builder().build()
    }
}
