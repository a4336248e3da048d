//! Number formatting for the dashboard (Indian digit grouping).

use rust_decimal::Decimal;

/// Groups an integer the Indian way: last three digits, then pairs.
///
/// `1234567` becomes `12,34,567`.
pub fn group_indian(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 2 + 1);
    if value < 0 {
        out.push('-');
    }

    if digits.len() <= 3 {
        out.push_str(&digits);
        return out;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let lead = head.len() % 2;
    if lead == 1 {
        out.push_str(&head[..1]);
    }
    for (i, pair) in head.as_bytes()[lead..].chunks(2).enumerate() {
        if i > 0 || lead == 1 {
            out.push(',');
        }
        out.push_str(std::str::from_utf8(pair).unwrap_or_default());
    }
    out.push(',');
    out.push_str(tail);
    out
}

/// Formats a money amount with two decimals and Indian grouping.
pub fn format_price(value: Decimal) -> String {
    let value = value.round_dp(2);
    let whole = value.trunc();
    let fraction = (value - whole).abs() * Decimal::ONE_HUNDRED;
    let sign = if value.is_sign_negative() && whole.is_zero() && !fraction.is_zero() {
        "-"
    } else {
        ""
    };
    let whole = i64::try_from(whole).unwrap_or_default();
    let cents = u64::try_from(fraction.trunc()).unwrap_or_default();
    format!("{sign}{}.{cents:02}", group_indian(whole))
}

/// Formats a spot price held as `f64`.
pub fn format_spot(value: f64) -> String {
    format_price(crate::models::price_from_f64(value))
}

/// Signed value with an explicit `+`, for change columns.
pub fn signed(value: i64) -> String {
    if value > 0 {
        format!("+{}", group_indian(value))
    } else {
        group_indian(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn groups_indian_style() {
        assert_eq!(group_indian(0), "0");
        assert_eq!(group_indian(999), "999");
        assert_eq!(group_indian(1000), "1,000");
        assert_eq!(group_indian(22500), "22,500");
        assert_eq!(group_indian(123456), "1,23,456");
        assert_eq!(group_indian(1234567), "12,34,567");
        assert_eq!(group_indian(-105000), "-1,05,000");
    }

    #[test]
    fn prices_keep_two_decimals() {
        assert_eq!(format_price(dec!(48012.5)), "48,012.50");
        assert_eq!(format_price(dec!(0.05)), "0.05");
        assert_eq!(format_price(dec!(-12.34)), "-12.34");
        assert_eq!(format_price(dec!(-0.40)), "-0.40");
        assert_eq!(format_spot(22501.237), "22,501.24");
    }

    #[test]
    fn signed_marks_gains() {
        assert_eq!(signed(1500), "+1,500");
        assert_eq!(signed(-20), "-20");
        assert_eq!(signed(0), "0");
    }
}
