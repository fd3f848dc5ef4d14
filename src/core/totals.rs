use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::LineItem;

/// Document totals derived from the line items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    /// Sum of all line amounts.
    pub subtotal: Decimal,
    /// subtotal × tax rate, unrounded.
    pub tax: Decimal,
    /// subtotal + tax.
    pub total: Decimal,
}

/// Re-sum the totals over the full item list.
///
/// Amounts are kept at full precision; rounding to two places happens only
/// when they are formatted for display. Sums beyond the range of [`Decimal`]
/// saturate at [`Decimal::MAX`]; use [`checked_totals`] to detect that.
pub fn calculate_totals(items: &[LineItem], tax_rate: Decimal) -> Totals {
    let subtotal = items
        .iter()
        .map(LineItem::amount)
        .fold(Decimal::ZERO, Decimal::saturating_add);
    let tax = subtotal.saturating_mul(tax_rate);
    Totals {
        subtotal,
        tax,
        total: subtotal.saturating_add(tax),
    }
}

/// Totals for raw `(quantity, rate)` pairs, or `None` when any amount or sum
/// does not fit in a [`Decimal`].
///
/// Inputs are clamped the same way [`LineItem::new`] clamps them.
pub fn checked_totals(
    items: impl IntoIterator<Item = (i64, Decimal)>,
    tax_rate: Decimal,
) -> Option<Totals> {
    let mut subtotal = Decimal::ZERO;
    for (quantity, rate) in items {
        let amount = Decimal::from(quantity.max(1)).checked_mul(rate.max(Decimal::ZERO))?;
        subtotal = subtotal.checked_add(amount)?;
    }
    let tax = subtotal.checked_mul(tax_rate)?;
    Some(Totals {
        subtotal,
        tax,
        total: subtotal.checked_add(tax)?,
    })
}
