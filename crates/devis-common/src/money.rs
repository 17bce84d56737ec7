//! Money helpers
//!
//! Every helper here is total: malformed input and arithmetic overflow
//! degrade to `None` or zero, never to a panic.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Convert a catalog float to a decimal amount.
///
/// Returns `None` for NaN and infinities so callers can fall back to the
/// display price.
pub fn decimal_from_f64(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_f64(value)
}

/// Parse a human-written price such as `"1 200,50€"` or `"129€/mois"`.
///
/// Keeps digits, `.` and `,`, turns `,` into `.`, then reads the longest
/// numeric prefix. `"1.200.50"` therefore reads as `1.2`.
pub fn parse_price_str(raw: &str) -> Option<Decimal> {
    let normalized: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in normalized.char_indices() {
        match c {
            '0'..='9' => end = i + 1,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
    }
    if end == 0 {
        return None;
    }

    let prefix = &normalized[..end];
    if prefix.starts_with('.') {
        format!("0{}", prefix).parse().ok()
    } else {
        prefix.parse().ok()
    }
}

/// `amount * (100 - pct) / 100`, or zero on overflow
pub fn apply_discount(amount: Decimal, pct: Decimal) -> Decimal {
    Decimal::ONE_HUNDRED
        .checked_sub(pct)
        .and_then(|keep| keep.checked_div(Decimal::ONE_HUNDRED))
        .and_then(|factor| amount.checked_mul(factor))
        .unwrap_or(Decimal::ZERO)
}

/// `amount * factor`, or zero on overflow
pub fn checked_product(amount: Decimal, factor: Decimal) -> Decimal {
    amount.checked_mul(factor).unwrap_or(Decimal::ZERO)
}

/// Sum that saturates to zero on overflow instead of panicking
pub fn checked_sum<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v))
        .unwrap_or(Decimal::ZERO)
}

/// Render an amount the way French quotes print it: `1 200,50 €`
pub fn format_eur(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let plain = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }

    format!(
        "{}{},{} €",
        if negative { "-" } else { "" },
        grouped,
        frac_part
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_french_price() {
        assert_eq!(parse_price_str("1 200,50€"), Some(dec!(1200.50)));
        assert_eq!(parse_price_str("129€/mois"), Some(dec!(129)));
        assert_eq!(parse_price_str("À partir de 990 €"), Some(dec!(990)));
    }

    #[test]
    fn test_parse_takes_numeric_prefix() {
        assert_eq!(parse_price_str("1.200.50"), Some(dec!(1.2)));
        assert_eq!(parse_price_str(",5"), Some(dec!(0.5)));
        assert_eq!(parse_price_str("12."), Some(dec!(12)));
    }

    #[test]
    fn test_parse_garbage_is_none() {
        assert_eq!(parse_price_str(""), None);
        assert_eq!(parse_price_str("sur devis"), None);
        assert_eq!(parse_price_str("..."), None);
    }

    #[test]
    fn test_decimal_from_f64_rejects_non_finite() {
        assert_eq!(decimal_from_f64(f64::NAN), None);
        assert_eq!(decimal_from_f64(f64::INFINITY), None);
        assert_eq!(decimal_from_f64(2000.0), Some(dec!(2000)));
        assert_eq!(decimal_from_f64(1200.5), Some(dec!(1200.5)));
    }

    #[test]
    fn test_apply_discount() {
        assert_eq!(apply_discount(dec!(2000), dec!(10)), dec!(1800));
        assert_eq!(apply_discount(dec!(129), dec!(20)), dec!(103.2));
        assert_eq!(apply_discount(dec!(500), Decimal::ZERO), dec!(500));
    }

    #[test]
    fn test_overflow_degrades_to_zero() {
        assert_eq!(checked_product(Decimal::MAX, dec!(2)), Decimal::ZERO);
        assert_eq!(checked_sum([Decimal::MAX, Decimal::MAX]), Decimal::ZERO);
    }

    #[test]
    fn test_format_eur() {
        assert_eq!(format_eur(dec!(3916.8)), "3 916,80 €");
        assert_eq!(format_eur(dec!(103.2)), "103,20 €");
        assert_eq!(format_eur(dec!(1234567.005)), "1 234 567,01 €");
        assert_eq!(format_eur(Decimal::ZERO), "0,00 €");
        assert_eq!(format_eur(dec!(-42)), "-42,00 €");
    }
}
