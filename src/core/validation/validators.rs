//! Payment field classifiers
//!
//! Each classifier maps the current display text of a field to a validity
//! flag. None of them fails: empty, partial and malformed input are simply
//! invalid.

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::OnceLock;

pub use crate::core::card::{is_card_number_valid, luhn_valid};

/// Minimum number of characters of a cardholder name
pub const NAME_MIN_LEN: usize = 2;

fn expiry_regex() -> &'static Regex {
    static EXPIRY_REGEX: OnceLock<Regex> = OnceLock::new();
    EXPIRY_REGEX.get_or_init(|| Regex::new(r"^(\d{2})/(\d{2})$").expect("expiry pattern compiles"))
}

/// Parse an `MM/YY` display value into `(month, full_year)`
///
/// The month is returned as typed, so callers must still range-check it.
pub fn parse_expiry(display: &str) -> Option<(u32, i32)> {
    let caps = expiry_regex().captures(display)?;
    let month: u32 = caps[1].parse().ok()?;
    let year: i32 = caps[2].parse().ok()?;
    Some((month, 2000 + year))
}

/// Validator: expiry is a real month whose following month starts after `today`
///
/// A card expiring in `MM/YY` stays usable through the whole of that month, so
/// the cut-off is the first day of the next month.
pub fn is_expiry_valid_at(display: &str, today: NaiveDate) -> bool {
    let Some((month, year)) = parse_expiry(display) else {
        return false;
    };
    if !(1..=12).contains(&month) {
        return false;
    }

    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    match NaiveDate::from_ymd_opt(next_year, next_month, 1) {
        Some(cutoff) => cutoff > today,
        None => false,
    }
}

/// Validator: expiry checked against the local calendar date
pub fn is_expiry_valid(display: &str) -> bool {
    is_expiry_valid_at(display, chrono::Local::now().date_naive())
}

/// Validator: CVV is exactly 3 or 4 decimal digits
pub fn is_cvv_valid(text: &str) -> bool {
    matches!(text.len(), 3 | 4) && text.bytes().all(|b| b.is_ascii_digit())
}

/// Validator: name holds only letters and spaces, with at least 2 characters
pub fn is_name_valid(text: &str) -> bool {
    text.chars().all(|c| c.is_alphabetic() || c == ' ') && text.chars().count() >= NAME_MIN_LEN
}

/// Month `months_ahead` months after `today`, formatted as `MM/YY`
///
/// Handy for building expiry values relative to the current date.
pub fn expiry_months_ahead(today: NaiveDate, months_ahead: u32) -> String {
    let total = today.month0() + months_ahead;
    let year = today.year() + (total / 12) as i32;
    let month = total % 12 + 1;
    format!("{:02}/{:02}", month, year.rem_euclid(100))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    // === parse_expiry() ===

    #[test]
    fn test_parse_expiry_valid_format() {
        assert_eq!(parse_expiry("06/28"), Some((6, 2028)));
        assert_eq!(parse_expiry("13/30"), Some((13, 2030)));
    }

    #[test]
    fn test_parse_expiry_rejects_partial() {
        assert_eq!(parse_expiry(""), None);
        assert_eq!(parse_expiry("06/"), None);
        assert_eq!(parse_expiry("06/2"), None);
        assert_eq!(parse_expiry("0628"), None);
    }

    // === is_expiry_valid_at() ===

    #[test]
    fn test_expiry_in_past_is_invalid() {
        assert!(!is_expiry_valid_at("01/20", date(2020, 2, 1)));
        assert!(!is_expiry_valid_at("01/20", date(2026, 10, 18)));
    }

    #[test]
    fn test_expiry_current_month_is_valid() {
        assert!(is_expiry_valid_at("10/26", date(2026, 10, 31)));
    }

    #[test]
    fn test_expiry_first_of_next_month_is_invalid() {
        assert!(!is_expiry_valid_at("10/26", date(2026, 11, 1)));
    }

    #[test]
    fn test_expiry_december_rolls_over() {
        assert!(is_expiry_valid_at("12/26", date(2026, 12, 31)));
        assert!(!is_expiry_valid_at("12/26", date(2027, 1, 1)));
    }

    #[test]
    fn test_expiry_two_years_ahead_is_valid() {
        let today = date(2026, 10, 18);
        assert!(is_expiry_valid_at(&expiry_months_ahead(today, 24), today));
    }

    #[test]
    fn test_expiry_invalid_month_is_always_invalid() {
        assert!(!is_expiry_valid_at("13/30", date(2000, 1, 1)));
        assert!(!is_expiry_valid_at("00/30", date(2000, 1, 1)));
    }

    #[test]
    fn test_expiry_partial_input_is_invalid() {
        assert!(!is_expiry_valid_at("1", date(2026, 1, 1)));
        assert!(!is_expiry_valid_at("12/", date(2026, 1, 1)));
    }

    #[test]
    fn test_expiry_against_system_clock() {
        assert!(!is_expiry_valid("01/20"));
        let ahead = expiry_months_ahead(chrono::Local::now().date_naive(), 24);
        assert!(is_expiry_valid(&ahead));
    }

    // === expiry_months_ahead() ===

    #[test]
    fn test_expiry_months_ahead_wraps_year() {
        assert_eq!(expiry_months_ahead(date(2026, 10, 18), 0), "10/26");
        assert_eq!(expiry_months_ahead(date(2026, 10, 18), 3), "01/27");
        assert_eq!(expiry_months_ahead(date(2026, 10, 18), 24), "10/28");
    }

    // === is_cvv_valid() ===

    #[test]
    fn test_cvv_too_short() {
        assert!(!is_cvv_valid("12"));
        assert!(!is_cvv_valid(""));
    }

    #[test]
    fn test_cvv_three_and_four_digits() {
        assert!(is_cvv_valid("123"));
        assert!(is_cvv_valid("1234"));
    }

    #[test]
    fn test_cvv_rejects_non_digits() {
        assert!(!is_cvv_valid("12a4"));
        assert!(!is_cvv_valid("12 4"));
    }

    #[test]
    fn test_cvv_too_long() {
        assert!(!is_cvv_valid("12345"));
    }

    // === is_name_valid() ===

    #[test]
    fn test_name_letters_and_spaces() {
        assert!(is_name_valid("JEAN DUPONT"));
        assert!(is_name_valid("ÉLODIE MARTIN"));
    }

    #[test]
    fn test_name_too_short() {
        assert!(!is_name_valid("J"));
        assert!(!is_name_valid(""));
        assert!(!is_name_valid(" "));
    }

    #[test]
    fn test_name_spaces_count_towards_length() {
        assert!(is_name_valid("A "));
        assert!(is_name_valid(" A"));
        assert!(is_name_valid(" J "));
        assert!(is_name_valid("  "));
    }

    #[test]
    fn test_name_exact_min_length() {
        assert!(is_name_valid("JO"));
    }

    #[test]
    fn test_name_rejects_digits_and_punctuation() {
        assert!(!is_name_valid("JEAN 2"));
        assert!(!is_name_valid("JEAN-PIERRE"));
    }
}
