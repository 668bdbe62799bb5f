//! Display formatters for payment fields
//!
//! These filters transform raw keystroke input into the text shown back in the
//! input. They are total: any input, including empty or malformed text, maps to
//! a display string.

use crate::core::card::digits_only;

/// Maximum display length of a card number (16 digits + 3 spaces)
pub const CARD_NUMBER_DISPLAY_LEN: usize = 19;

/// Filter: group card digits in runs of 4, separated by single spaces
///
/// Non-digits are stripped first and the result is capped at 19 characters,
/// which keeps at most 16 digits.
pub fn format_card_number(raw: &str) -> String {
    let mut grouped = String::with_capacity(CARD_NUMBER_DISPLAY_LEN);
    for (i, digit) in digits_only(raw).chars().enumerate() {
        if i > 0 && i % 4 == 0 {
            grouped.push(' ');
        }
        grouped.push(digit);
    }

    grouped.chars().take(CARD_NUMBER_DISPLAY_LEN).collect()
}

/// Filter: insert the `/` separator of an `MM/YY` expiry
///
/// The separator is emitted once two digits are typed; at most two year
/// digits follow it.
pub fn format_expiry(raw: &str) -> String {
    let digits = digits_only(raw);
    if digits.len() >= 2 {
        let year: String = digits.chars().skip(2).take(2).collect();
        format!("{}/{}", &digits[..2], year)
    } else {
        digits
    }
}

/// Filter: upper-case the cardholder name
///
/// No characters are stripped; the validator rejects what does not belong.
pub fn format_cardholder_name(raw: &str) -> String {
    raw.to_uppercase()
}
