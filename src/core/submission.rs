//! Payment payload and hand-off to the external payment handler
//!
//! The form only assembles a validated [`PaymentDetails`] and passes it to a
//! [`PaymentSubmitter`] exactly once. Retrying is left to the user.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

use crate::core::card::CardNetwork;
use crate::core::error::SubmissionError;
use crate::core::method::PaymentMethod;

/// Card data of a validated card payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDetails {
    /// Card number, digits only
    pub number: String,
    pub network: CardNetwork,
    /// Expiry in `MM/YY` form
    pub expiry: String,
    pub cvv: String,
    /// Upper-cased cardholder name
    pub cardholder_name: String,
    /// Last four digits of `number`
    pub last_four: String,
}

impl CardDetails {
    /// Build card details from a digits-only number, deriving `last_four`
    pub fn new(
        number: String,
        network: CardNetwork,
        expiry: String,
        cvv: String,
        cardholder_name: String,
    ) -> Self {
        let start = number.len().saturating_sub(4);
        let last_four = number[start..].to_string();
        Self {
            number,
            network,
            expiry,
            cvv,
            cardholder_name,
            last_four,
        }
    }
}

/// Payload handed to the payment handler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetails {
    pub method: PaymentMethod,
    /// Present only for card payments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<CardDetails>,
}

/// Acknowledgement returned by the payment handler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub reference: Uuid,
    pub method: PaymentMethod,
    pub submitted_at: DateTime<Utc>,
}

/// External handler receiving validated payments
///
/// Implementations talk to whatever processes the payment. The form calls
/// `submit` once per user action and does not retry.
#[async_trait]
pub trait PaymentSubmitter: Send + Sync {
    async fn submit(&self, details: PaymentDetails) -> Result<SubmissionReceipt, SubmissionError>;
}

/// Handler that accepts every payment after a fixed delay
///
/// Stands in for a real gateway in demos and tests.
#[derive(Debug, Clone, Default)]
pub struct SimulatedSubmitter {
    delay: Duration,
}

impl SimulatedSubmitter {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl PaymentSubmitter for SimulatedSubmitter {
    async fn submit(&self, details: PaymentDetails) -> Result<SubmissionReceipt, SubmissionError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let receipt = SubmissionReceipt {
            reference: Uuid::new_v4(),
            method: details.method,
            submitted_at: Utc::now(),
        };

        tracing::debug!(
            reference = %receipt.reference,
            method = %details.method,
            "Simulated payment accepted"
        );

        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card_details_with_number(number: &str) -> CardDetails {
        CardDetails::new(
            number.to_string(),
            CardNetwork::Visa,
            "12/28".to_string(),
            "123".to_string(),
            "JEAN DUPONT".to_string(),
        )
    }

    fn card_details() -> CardDetails {
        card_details_with_number("4532015112830366")
    }

    #[test]
    fn test_last_four() {
        assert_eq!(card_details().last_four, "0366");
    }

    #[test]
    fn test_last_four_short_number() {
        assert_eq!(card_details_with_number("12").last_four, "12");
    }

    #[test]
    fn test_card_payload_serializes_last_four() {
        let details = PaymentDetails {
            method: PaymentMethod::Card,
            card: Some(card_details()),
        };
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["card"]["last_four"], "0366");
        assert_eq!(json["card"]["number"], "4532015112830366");
        assert_eq!(json["card"]["network"], "visa");
    }

    #[test]
    fn test_non_card_payload_omits_card() {
        let details = PaymentDetails {
            method: PaymentMethod::Bank,
            card: None,
        };
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["method"], "bank");
        assert!(json.get("card").is_none());
    }

    #[tokio::test]
    async fn test_simulated_submitter_returns_receipt() {
        let submitter = SimulatedSubmitter::default();
        let receipt = submitter
            .submit(PaymentDetails {
                method: PaymentMethod::Card,
                card: Some(card_details()),
            })
            .await
            .expect("simulated submission should succeed");
        assert_eq!(receipt.method, PaymentMethod::Card);
    }

    #[tokio::test]
    async fn test_simulated_submitter_waits_for_delay() {
        let submitter = SimulatedSubmitter::new(Duration::from_millis(20));
        let started = tokio::time::Instant::now();
        submitter
            .submit(PaymentDetails {
                method: PaymentMethod::Paypal,
                card: None,
            })
            .await
            .expect("simulated submission should succeed");
        assert!(started.elapsed() >= Duration::from_millis(20));
    }
}
