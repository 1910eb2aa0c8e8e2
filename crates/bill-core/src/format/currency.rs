//! Rupee amount formatting with en-IN digit grouping.

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use super::patterns::LEADING_NUMBER;

/// Format an amount with 2 decimals and Indian grouping (12,34,567.89).
pub fn to_currency_string(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let s = format!("{:.2}", rounded.abs());

    let (integer_part, decimal_part) = match s.split_once('.') {
        Some(parts) => parts,
        None => (s.as_str(), "00"),
    };

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    format!("{}{}.{}", sign, group_indian(integer_part), decimal_part)
}

/// Format an optional amount, absent values format as zero.
pub fn to_currency_string_opt(amount: Option<Decimal>) -> String {
    to_currency_string(amount.unwrap_or_default())
}

/// Format a textual amount; non-numeric input formats as zero.
pub fn currency_from_str(s: &str) -> String {
    let s = s.trim();
    let amount = Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .unwrap_or_default();
    to_currency_string(amount)
}

/// Parse the leading decimal number of a cell, `0` when there is none.
///
/// `"3"`, `" 2.50 "`, `"12kg"` and `".5"` parse; `""`, `"abc"` and
/// out-of-range values yield zero.
pub fn parse_lenient_decimal(s: &str) -> Decimal {
    let Some(m) = LEADING_NUMBER.find(s.trim()) else {
        return Decimal::ZERO;
    };

    let raw = m.as_str();
    let (negative, unsigned) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };

    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(pos) => (&unsigned[..pos], Some(&unsigned[pos + 1..])),
        None => (unsigned, None),
    };

    let mut mantissa = mantissa.trim_end_matches('.').to_string();
    if mantissa.starts_with('.') {
        mantissa.insert(0, '0');
    }

    let parsed = match exponent {
        Some(exp) => Decimal::from_scientific(&format!("{}e{}", mantissa, exp)),
        None => Decimal::from_str(&mantissa),
    };

    match parsed {
        Ok(value) if negative => -value,
        Ok(value) => value,
        Err(_) => Decimal::ZERO,
    }
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let chars: Vec<char> = head.chars().collect();
    let mut formatted = String::new();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 2 == 0 {
            formatted.push(',');
        }
        formatted.push(*c);
    }

    format!("{},{}", formatted, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_indian_grouping() {
        assert_eq!(to_currency_string(dec("0")), "0.00");
        assert_eq!(to_currency_string(dec("450")), "450.00");
        assert_eq!(to_currency_string(dec("1234.5")), "1,234.50");
        assert_eq!(to_currency_string(dec("123456")), "1,23,456.00");
        assert_eq!(to_currency_string(dec("1234567.891")), "12,34,567.89");
        assert_eq!(to_currency_string(dec("100000000")), "10,00,00,000.00");
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        assert_eq!(to_currency_string(dec("0.005")), "0.01");
        assert_eq!(to_currency_string(dec("2.345")), "2.35");
        assert_eq!(to_currency_string(dec("-1500.125")), "-1,500.13");
        assert_eq!(to_currency_string(dec("-0.001")), "0.00");
    }

    #[test]
    fn test_absent_and_textual_input() {
        assert_eq!(to_currency_string_opt(None), "0.00");
        assert_eq!(to_currency_string_opt(Some(dec("3600"))), "3,600.00");
        assert_eq!(currency_from_str("abc"), "0.00");
        assert_eq!(currency_from_str(" 2500 "), "2,500.00");
        assert_eq!(currency_from_str("2.5"), "2.50");
        assert_eq!(currency_from_str("1.5e3"), "1,500.00");
        assert_eq!(currency_from_str(""), "0.00");
    }

    #[test]
    fn test_parse_lenient_decimal() {
        assert_eq!(parse_lenient_decimal("3"), dec("3"));
        assert_eq!(parse_lenient_decimal(" 2.50 "), dec("2.50"));
        assert_eq!(parse_lenient_decimal("12kg"), dec("12"));
        assert_eq!(parse_lenient_decimal(".5"), dec("0.5"));
        assert_eq!(parse_lenient_decimal("-2"), dec("-2"));
        assert_eq!(parse_lenient_decimal("+7."), dec("7"));
        assert_eq!(parse_lenient_decimal("1.5e3"), dec("1500"));
        assert_eq!(parse_lenient_decimal("1,200"), dec("1"));
        assert_eq!(parse_lenient_decimal(""), Decimal::ZERO);
        assert_eq!(parse_lenient_decimal("abc"), Decimal::ZERO);
        assert_eq!(parse_lenient_decimal("1e999"), Decimal::ZERO);
    }
}
