//! Integer price formatting.

/// Group the digits of `amount` in threes using `separator`.
#[must_use]
pub fn group_digits(amount: i64, separator: &str) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * separator.len() + 1);
    if amount < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}

/// Render `amount` as a grouped numeral followed by the currency `suffix`.
///
/// This is the host formatter; the browser build swaps the numeral part for
/// the locale-aware `Intl.NumberFormat` output.
#[must_use]
pub fn format_price(amount: i64, suffix: &str) -> String {
    join_price(&group_digits(amount, ","), suffix)
}

/// Append the currency suffix to an already formatted numeral.
#[must_use]
pub fn join_price(numeral: &str, suffix: &str) -> String {
    format!("{numeral} {suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_representative_magnitudes() {
        assert_eq!(format_price(0, "تومان"), "0 تومان");
        assert_eq!(format_price(999, "تومان"), "999 تومان");
        assert_eq!(format_price(1234, "تومان"), "1,234 تومان");
        assert_eq!(format_price(50_000, "تومان"), "50,000 تومان");
        assert_eq!(format_price(1_234_567, "تومان"), "1,234,567 تومان");
        assert_eq!(format_price(12_345_678_901, "Toman"), "12,345,678,901 Toman");
    }

    #[test]
    fn negative_amounts_keep_sign_outside_groups() {
        assert_eq!(group_digits(-1_000, ","), "-1,000");
        assert_eq!(group_digits(i64::MIN, ","), "-9,223,372,036,854,775,808");
    }

    #[test]
    fn custom_separator_is_used() {
        assert_eq!(group_digits(1_000_000, "٬"), "1٬000٬000");
    }
}
