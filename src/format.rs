//! Display formatting helpers for amounts.

use numfmt::{Formatter, Precision};

/// Format an amount as a currency string with thousands separators and two
/// decimal places, e.g. `₹1,234.50`.
///
/// Negative amounts place the minus sign before the symbol.
pub fn currency(symbol: &str, amount: f64) -> String {
    if amount == 0.0 {
        // Zero is hardcoded as "0" by numfmt, so we must specify the
        // formatted string for zero ourselves.
        return format!("{symbol}0.00");
    }

    let prefix = if amount < 0.0 {
        format!("-{symbol}")
    } else {
        symbol.to_owned()
    };

    let formatter = match Formatter::currency(&prefix) {
        Ok(formatter) => formatter.precision(Precision::Decimals(2)),
        // The prefix can exceed numfmt's buffer limit; fall back to a
        // plain rendering rather than panic.
        Err(_) => return format!("{prefix}{:.2}", amount.abs()),
    };

    let mut formatted_string = formatter.fmt_string(amount.abs());

    // numfmt omits the last trailing zero, so we must add it ourselves.
    // For example, "12.30" is rendered as "12.3" so we append "0".
    if formatted_string.as_bytes()[formatted_string.len() - 3] != b'.' {
        formatted_string = format!("{formatted_string}0");
    }

    formatted_string
}

/// The percentage `part` makes up of `total`, zero when `total` is zero.
pub fn percentage(part: f64, total: f64) -> f64 {
    if total == 0.0 {
        return 0.0;
    }

    (part / total) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_formats_with_separators_and_two_decimals() {
        assert_eq!(currency("₹", 1234.5), "₹1,234.50");
        assert_eq!(currency("$", 12.34), "$12.34");
    }

    #[test]
    fn currency_formats_zero() {
        assert_eq!(currency("₹", 0.0), "₹0.00");
    }

    #[test]
    fn currency_puts_minus_before_the_symbol() {
        assert_eq!(currency("$", -45.99), "-$45.99");
    }

    #[test]
    fn percentage_is_safe_on_zero_totals() {
        assert_eq!(percentage(5.0, 0.0), 0.0);
        assert_eq!(percentage(25.0, 100.0), 25.0);
    }
}
