//! Currency display for line items and totals.

use rust_decimal::{Decimal, RoundingStrategy};

/// Currency symbol printed in front of amounts.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

/// Format an item rate or amount, e.g. `"₹200.00"`.
pub fn format_amount(symbol: &str, amount: Decimal) -> String {
    format!("{symbol}{:.2}", round_half_up(amount))
}

/// Format a totals-block amount, e.g. `"₹ 440.00"` (symbol, space, amount).
pub fn format_total(symbol: &str, amount: Decimal) -> String {
    format!("{symbol} {:.2}", round_half_up(amount))
}

/// Round to 2 decimal places, midpoint away from zero.
fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn pads_to_two_places() {
        assert_eq!(format_amount("₹", dec!(200)), "₹200.00");
        assert_eq!(format_amount("₹", dec!(7.5)), "₹7.50");
        assert_eq!(format_amount("₹", Decimal::ZERO), "₹0.00");
    }

    #[test]
    fn totals_have_a_space() {
        assert_eq!(format_total("₹", dec!(440)), "₹ 440.00");
        assert_eq!(format_total("$", dec!(0.1)), "$ 0.10");
    }

    #[test]
    fn midpoint_rounds_away_from_zero() {
        assert_eq!(format_amount("₹", dec!(0.125)), "₹0.13");
        assert_eq!(format_amount("₹", dec!(0.0525)), "₹0.05");
        assert_eq!(format_total("₹", dec!(2.675)), "₹ 2.68");
    }

    #[test]
    fn large_amounts_are_not_grouped() {
        assert_eq!(format_amount("₹", dec!(1234567.891)), "₹1234567.89");
    }
}
