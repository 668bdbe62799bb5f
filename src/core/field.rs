//! Payment card fields and their validation state

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::validation::{filters, validators};

/// One of the four inputs of the card payment form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentField {
    CardNumber,
    Expiry,
    Cvv,
    CardholderName,
}

impl PaymentField {
    /// All fields, in form order
    pub const ALL: [PaymentField; 4] = [
        PaymentField::CardNumber,
        PaymentField::Expiry,
        PaymentField::Cvv,
        PaymentField::CardholderName,
    ];

    /// Position of the field in [`PaymentField::ALL`]
    pub fn index(&self) -> usize {
        match self {
            PaymentField::CardNumber => 0,
            PaymentField::Expiry => 1,
            PaymentField::Cvv => 2,
            PaymentField::CardholderName => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentField::CardNumber => "card_number",
            PaymentField::Expiry => "expiry",
            PaymentField::Cvv => "cvv",
            PaymentField::CardholderName => "cardholder_name",
        }
    }

    /// The fixed message displayed when the field is touched and invalid
    pub fn error_message(&self) -> &'static str {
        match self {
            PaymentField::CardNumber => "Numéro de carte invalide",
            PaymentField::Expiry => "Date d'expiration invalide",
            PaymentField::Cvv => "Code CVV invalide",
            PaymentField::CardholderName => "Nom du titulaire invalide",
        }
    }

    /// Map raw input to the display text stored in the field
    pub fn format(&self, raw: &str) -> String {
        match self {
            PaymentField::CardNumber => filters::format_card_number(raw),
            PaymentField::Expiry => filters::format_expiry(raw),
            PaymentField::Cvv => raw.to_string(),
            PaymentField::CardholderName => filters::format_cardholder_name(raw),
        }
    }

    /// Run the field's classifier on a display value
    pub fn is_valid(&self, value: &str, today: NaiveDate) -> bool {
        match self {
            PaymentField::CardNumber => validators::is_card_number_valid(value),
            PaymentField::Expiry => validators::is_expiry_valid_at(value, today),
            PaymentField::Cvv => validators::is_cvv_valid(value),
            PaymentField::CardholderName => validators::is_name_valid(value),
        }
    }
}

impl fmt::Display for PaymentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation state of a single field
///
/// Fields start untouched and optimistically valid. They only become touched
/// on blur, after which every change re-runs the classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValidationState {
    pub touched: bool,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl FieldValidationState {
    pub fn untouched() -> Self {
        Self {
            touched: false,
            valid: true,
            error_message: None,
        }
    }

    /// State of a touched field after its classifier ran
    pub fn checked(field: PaymentField, valid: bool) -> Self {
        Self {
            touched: true,
            valid,
            error_message: (!valid).then(|| field.error_message().to_string()),
        }
    }

    /// Whether this field lets the card form be submitted
    pub fn is_ready(&self) -> bool {
        self.touched && self.valid
    }
}

impl Default for FieldValidationState {
    fn default() -> Self {
        Self::untouched()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).expect("valid test date")
    }

    #[test]
    fn test_field_index_matches_all_order() {
        for (i, field) in PaymentField::ALL.iter().enumerate() {
            assert_eq!(field.index(), i);
        }
    }

    #[test]
    fn test_field_serde_names() {
        let json = serde_json::to_value(PaymentField::CardholderName).unwrap();
        assert_eq!(json, "cardholder_name");
        let field: PaymentField = serde_json::from_str("\"cvv\"").unwrap();
        assert_eq!(field, PaymentField::Cvv);
    }

    #[test]
    fn test_field_messages_are_fixed() {
        assert_eq!(PaymentField::Cvv.error_message(), "Code CVV invalide");
        assert_eq!(PaymentField::CardNumber.error_message(), "Numéro de carte invalide");
    }

    #[test]
    fn test_cvv_has_no_display_transformation() {
        assert_eq!(PaymentField::Cvv.format("12 a"), "12 a");
    }

    #[test]
    fn test_format_dispatch() {
        assert_eq!(PaymentField::CardNumber.format("41111111"), "4111 1111");
        assert_eq!(PaymentField::Expiry.format("1228"), "12/28");
        assert_eq!(PaymentField::CardholderName.format("jo"), "JO");
    }

    #[test]
    fn test_is_valid_dispatch() {
        assert!(PaymentField::CardNumber.is_valid("4532 0151 1283 0366", today()));
        assert!(PaymentField::Expiry.is_valid("12/27", today()));
        assert!(!PaymentField::Expiry.is_valid("01/20", today()));
        assert!(PaymentField::Cvv.is_valid("123", today()));
        assert!(!PaymentField::CardholderName.is_valid("J", today()));
    }

    #[test]
    fn test_untouched_state_is_optimistic() {
        let state = FieldValidationState::default();
        assert!(!state.touched);
        assert!(state.valid);
        assert!(state.error_message.is_none());
        assert!(!state.is_ready());
    }

    #[test]
    fn test_checked_state_carries_message_only_when_invalid() {
        let ok = FieldValidationState::checked(PaymentField::Cvv, true);
        assert!(ok.is_ready());
        assert!(ok.error_message.is_none());

        let ko = FieldValidationState::checked(PaymentField::Cvv, false);
        assert!(!ko.is_ready());
        assert_eq!(ko.error_message.as_deref(), Some("Code CVV invalide"));
    }
}
