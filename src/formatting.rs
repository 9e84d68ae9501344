//! Display helpers for monetary values.
//!
//! All reports use a single fixed currency unit. Prices inside opportunity
//! metrics are formatted with two decimals and a trailing currency code;
//! revenue figures use thousands separators with a leading code. The two
//! shapes come from the reports these strings land in and are kept as-is.

/// Currency code for every monetary string in a report.
pub const CURRENCY_CODE: &str = "SAR";

/// Round a full-precision monetary or percentage value to a whole unit.
///
/// Output rounding happens once, at the point a value enters a result;
/// intermediate math stays in full precision.
pub fn round_to_unit(value: f64) -> i64 {
    value.round() as i64
}

/// Format a price with two decimals and the currency suffix: `"123.45 SAR"`.
pub fn format_price(value: f64) -> String {
    format!("{value:.2} {CURRENCY_CODE}")
}

/// Format a revenue figure with a currency prefix and thousands
/// separators: `"SAR 3,800"`.
pub fn format_revenue(value: f64) -> String {
    format!("{} {}", CURRENCY_CODE, group_thousands(round_to_unit(value)))
}

/// Insert `,` separators every three digits.
pub fn group_thousands(value: i64) -> String {
    let negative = value < 0;
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(3800), "3,800");
        assert_eq!(group_thousands(1234567), "1,234,567");
        assert_eq!(group_thousands(-45000), "-45,000");
    }

    #[test]
    fn price_has_two_decimals_and_suffix() {
        assert_eq!(format_price(120.0), "120.00 SAR");
        assert_eq!(format_price(96.4), "96.40 SAR");
    }

    #[test]
    fn revenue_has_prefix_and_separators() {
        assert_eq!(format_revenue(3800.0), "SAR 3,800");
        assert_eq!(format_revenue(123456.7), "SAR 123,457");
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert_eq!(round_to_unit(49.5), 50);
        assert_eq!(round_to_unit(-49.5), -50);
        assert_eq!(round_to_unit(49.4), 49);
    }
}
