//! Amount in words using the crore/lakh/thousand grouping.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

const ONES: [&str; 20] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Eleven",
    "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen", "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

const CRORE: u64 = 10_000_000;
const LAKH: u64 = 100_000;
const THOUSAND: u64 = 1_000;

/// Spell a rupee amount, e.g. `"One Thousand Two Hundred Rupees and Fifty Paise"`.
///
/// Returns `"Zero Rupees"` when both rupees and paise are zero.
pub fn amount_in_words(amount: Decimal) -> String {
    let negative = amount.is_sign_negative() && !amount.is_zero();
    let amount = amount.abs();

    let mut rupees = amount.trunc().to_u64().unwrap_or(u64::MAX);
    let mut paise = ((amount - amount.trunc()) * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .unwrap_or(0);

    if paise >= 100 {
        rupees = rupees.saturating_add(1);
        paise -= 100;
    }

    if rupees == 0 && paise == 0 {
        return "Zero Rupees".to_string();
    }

    let mut result = String::new();
    if rupees > 0 {
        result.push_str(&convert(rupees));
        result.push_str(" Rupees");
    }
    if paise > 0 {
        if !result.is_empty() {
            result.push_str(" and ");
        }
        result.push_str(&two_digit_words(paise));
        result.push_str(" Paise");
    }

    if negative {
        format!("Minus {}", result)
    } else {
        result
    }
}

fn two_digit_words(n: u64) -> String {
    if n < 20 {
        ONES[n as usize].to_string()
    } else if n % 10 == 0 {
        TENS[(n / 10) as usize].to_string()
    } else {
        format!("{} {}", TENS[(n / 10) as usize], ONES[(n % 10) as usize])
    }
}

fn three_digit_words(n: u64) -> String {
    if n >= 100 {
        let hundreds = format!("{} Hundred", ONES[(n / 100) as usize]);
        if n % 100 == 0 {
            hundreds
        } else {
            format!("{} {}", hundreds, two_digit_words(n % 100))
        }
    } else {
        two_digit_words(n)
    }
}

fn convert(n: u64) -> String {
    if n == 0 {
        return String::new();
    }

    let crore = n / CRORE;
    let lakh = (n % CRORE) / LAKH;
    let thousand = (n % LAKH) / THOUSAND;
    let rem = n % THOUSAND;

    let mut parts: Vec<String> = Vec::new();
    if crore > 0 {
        // Crore counts beyond 999 are spelled with the same grouping.
        let count = if crore >= THOUSAND {
            convert(crore)
        } else {
            three_digit_words(crore)
        };
        parts.push(format!("{} Crore", count));
    }
    if lakh > 0 {
        parts.push(format!("{} Lakh", two_digit_words(lakh)));
    }
    if thousand > 0 {
        parts.push(format!("{} Thousand", two_digit_words(thousand)));
    }
    if rem > 0 {
        parts.push(three_digit_words(rem));
    }

    parts.join(" ")
}
