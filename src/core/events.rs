//! Payment event notifications
//!
//! The `PaymentEventBus` uses `tokio::sync::broadcast` to let the surrounding
//! reservation flow observe submissions without the form waiting on it.
//!
//! ```text
//! PaymentForm::submit ──▶ PaymentEventBus::publish() ──▶ broadcast channel ──▶ subscribers
//! ```
//!
//! Events never carry the CVV and only expose the last four card digits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::core::card::CardNetwork;
use crate::core::method::PaymentMethod;

/// Something that happened to a payment submission
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PaymentEvent {
    /// The handler accepted the payment
    Submitted {
        reference: Uuid,
        method: PaymentMethod,
        #[serde(skip_serializing_if = "Option::is_none")]
        network: Option<CardNetwork>,
        #[serde(skip_serializing_if = "Option::is_none")]
        last_four: Option<String>,
    },
    /// The handler failed; the form is left as it was
    SubmissionFailed {
        method: PaymentMethod,
        reason: String,
    },
}

impl PaymentEvent {
    pub fn action(&self) -> &str {
        match self {
            PaymentEvent::Submitted { .. } => "submitted",
            PaymentEvent::SubmissionFailed { .. } => "submission_failed",
        }
    }

    pub fn method(&self) -> PaymentMethod {
        match self {
            PaymentEvent::Submitted { method, .. } | PaymentEvent::SubmissionFailed { method, .. } => {
                *method
            }
        }
    }
}

/// Envelope wrapping a payment event with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub event: PaymentEvent,
}

impl EventEnvelope {
    pub fn new(event: PaymentEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            event,
        }
    }
}

/// Broadcast-based bus for payment events
///
/// Cheap to clone; all clones publish to the same channel.
#[derive(Debug, Clone)]
pub struct PaymentEventBus {
    sender: broadcast::Sender<EventEnvelope>,
}

impl PaymentEventBus {
    /// Create a bus buffering up to `capacity` events for slow receivers
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all subscribers
    ///
    /// Never fails: with no subscriber the event is dropped. Returns the
    /// number of receivers reached.
    pub fn publish(&self, event: PaymentEvent) -> usize {
        self.sender.send(EventEnvelope::new(event)).unwrap_or(0)
    }

    /// Receive every event published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for PaymentEventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submitted() -> PaymentEvent {
        PaymentEvent::Submitted {
            reference: Uuid::new_v4(),
            method: PaymentMethod::Card,
            network: Some(CardNetwork::Visa),
            last_four: Some("1111".to_string()),
        }
    }

    #[test]
    fn test_submitted_event_serialization() {
        let json = serde_json::to_value(submitted()).unwrap();
        assert_eq!(json["action"], "submitted");
        assert_eq!(json["method"], "card");
        assert_eq!(json["network"], "visa");
        assert_eq!(json["last_four"], "1111");
    }

    #[test]
    fn test_non_card_event_omits_card_fields() {
        let event = PaymentEvent::Submitted {
            reference: Uuid::new_v4(),
            method: PaymentMethod::Bank,
            network: None,
            last_four: None,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert!(json.get("network").is_none());
        assert!(json.get("last_four").is_none());
        assert_eq!(event.method(), PaymentMethod::Bank);
    }

    #[test]
    fn test_failed_event_action() {
        let event = PaymentEvent::SubmissionFailed {
            method: PaymentMethod::Card,
            reason: "timeout".to_string(),
        };
        assert_eq!(event.action(), "submission_failed");
    }

    #[test]
    fn test_publish_without_subscribers() {
        let bus = PaymentEventBus::new(16);
        assert_eq!(bus.publish(submitted()), 0);
    }

    #[tokio::test]
    async fn test_publish_and_receive() {
        let bus = PaymentEventBus::new(16);
        let mut rx = bus.subscribe();
        assert_eq!(bus.receiver_count(), 1);

        let event = submitted();
        assert_eq!(bus.publish(event.clone()), 1);

        let envelope = rx.recv().await.expect("should receive event");
        assert_eq!(envelope.event, event);
    }

    #[tokio::test]
    async fn test_clones_share_channel() {
        let bus = PaymentEventBus::default();
        let clone = bus.clone();
        let mut rx = bus.subscribe();

        clone.publish(submitted());
        let envelope = rx.recv().await.expect("should receive event");
        assert_eq!(envelope.event.action(), "submitted");
    }
}
