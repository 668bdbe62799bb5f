//! Card network detection and number checksums
//!
//! Networks are detected from the leading digits of the card number with an
//! ordered rule table: the first rule whose prefix test matches wins.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Issuing scheme of a payment card, inferred from its leading digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CardNetwork {
    Visa,
    Mastercard,
    Amex,
    Discover,
    #[default]
    None,
}

impl CardNetwork {
    /// Stable lowercase identifier (used for logo lookup by the front end)
    pub fn as_str(&self) -> &'static str {
        match self {
            CardNetwork::Visa => "visa",
            CardNetwork::Mastercard => "mastercard",
            CardNetwork::Amex => "amex",
            CardNetwork::Discover => "discover",
            CardNetwork::None => "none",
        }
    }

    /// Digit counts a complete number of this network may have
    ///
    /// Unknown networks keep the historical 16-digit requirement.
    pub fn accepted_lengths(&self) -> &'static [usize] {
        match self {
            CardNetwork::Visa => &[13, 16],
            CardNetwork::Mastercard => &[16],
            CardNetwork::Amex => &[15],
            CardNetwork::Discover => &[16],
            CardNetwork::None => &[16],
        }
    }

    /// Check whether `len` digits is a complete number for this network
    pub fn accepts_length(&self, len: usize) -> bool {
        self.accepted_lengths().contains(&len)
    }
}

impl fmt::Display for CardNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type PrefixRule = (fn(&str) -> bool, CardNetwork);

fn starts_with_visa(digits: &str) -> bool {
    digits.starts_with('4')
}

fn starts_with_mastercard(digits: &str) -> bool {
    matches!(digits.get(..2), Some("51" | "52" | "53" | "54" | "55"))
}

fn starts_with_amex(digits: &str) -> bool {
    digits.starts_with("34") || digits.starts_with("37")
}

fn starts_with_discover(digits: &str) -> bool {
    digits.starts_with('6')
}

/// Detection rules, evaluated in priority order
const NETWORK_RULES: [PrefixRule; 4] = [
    (starts_with_visa, CardNetwork::Visa),
    (starts_with_mastercard, CardNetwork::Mastercard),
    (starts_with_amex, CardNetwork::Amex),
    (starts_with_discover, CardNetwork::Discover),
];

/// Keep only the ASCII digits of `input`
pub fn digits_only(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Detect the card network from a card number (separators are ignored)
pub fn detect_card_network(number: &str) -> CardNetwork {
    let digits = digits_only(number);
    NETWORK_RULES
        .iter()
        .find(|(matches, _)| matches(&digits))
        .map(|(_, network)| *network)
        .unwrap_or(CardNetwork::None)
}

/// Luhn checksum over the digits of `number`
///
/// Non-digit characters are ignored. A string without any digit is not a
/// card number and is rejected.
pub fn luhn_valid(number: &str) -> bool {
    let digits: Vec<u32> = number.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.is_empty() {
        return false;
    }

    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();

    sum % 10 == 0
}

/// Full card number check: network length and Luhn checksum
pub fn is_card_number_valid(number: &str) -> bool {
    let digits = digits_only(number);
    let network = detect_card_network(&digits);
    network.accepts_length(digits.len()) && luhn_valid(&digits)
}
