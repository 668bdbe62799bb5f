//! Payment form state machine and submission gate
//!
//! The form is driven by [`FieldEvent`]s. Each event goes through
//! [`PaymentFormState::reduce`], a transition function
//! `(state, event, today) -> state`, so the whole machine can be exercised
//! without any UI.
//!
//! Per field the states are:
//!
//! ```text
//!              blur                 change / blur
//! Untouched ────────▶ Touched-Valid ◀──────────────▶ Touched-Invalid
//!     │ change (value only, no validation)
//!     └──▶ Untouched
//! ```
//!
//! Untouched fields display no error but still block submission.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::core::card::{CardNetwork, detect_card_network, digits_only};
use crate::core::clock::{Clock, SystemClock};
use crate::core::error::{CheckoutResult, FieldValidationError, ValidationError};
use crate::core::events::{PaymentEvent, PaymentEventBus};
use crate::core::field::{FieldValidationState, PaymentField};
use crate::core::method::PaymentMethod;
use crate::core::submission::{CardDetails, PaymentDetails, PaymentSubmitter, SubmissionReceipt};

/// User interaction with a card field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldEvent {
    /// New raw text typed or pasted into the field
    Change { field: PaymentField, value: String },
    /// The field lost focus
    Blur { field: PaymentField },
}

impl FieldEvent {
    pub fn field(&self) -> PaymentField {
        match self {
            FieldEvent::Change { field, .. } | FieldEvent::Blur { field } => *field,
        }
    }
}

/// Display value of a field together with its validation state
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldEntry {
    pub value: String,
    #[serde(flatten)]
    pub state: FieldValidationState,
}

/// State of the card payment form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentFormState {
    method: PaymentMethod,
    fields: [FieldEntry; 4],
}

impl PaymentFormState {
    /// Fresh form: every field empty, untouched and optimistically valid
    pub fn new(method: PaymentMethod) -> Self {
        Self {
            method,
            fields: Default::default(),
        }
    }

    pub fn method(&self) -> PaymentMethod {
        self.method
    }

    pub fn entry(&self, field: PaymentField) -> &FieldEntry {
        &self.fields[field.index()]
    }

    /// Current display value of a field
    pub fn value(&self, field: PaymentField) -> &str {
        &self.entry(field).value
    }

    pub fn field_state(&self, field: PaymentField) -> &FieldValidationState {
        &self.entry(field).state
    }

    /// Transition function of the form
    pub fn reduce(&self, event: &FieldEvent, today: NaiveDate) -> Self {
        let mut next = self.clone();
        next.apply(event, today);
        next
    }

    /// Apply an event in place
    pub fn apply(&mut self, event: &FieldEvent, today: NaiveDate) {
        match event {
            FieldEvent::Change { field, value } => {
                let entry = &mut self.fields[field.index()];
                entry.value = field.format(value);
                if entry.state.touched {
                    Self::revalidate(*field, entry, today);
                }
            }
            FieldEvent::Blur { field } => {
                let entry = &mut self.fields[field.index()];
                Self::revalidate(*field, entry, today);
            }
        }
    }

    fn revalidate(field: PaymentField, entry: &mut FieldEntry, today: NaiveDate) {
        let valid = field.is_valid(&entry.value, today);
        entry.state = FieldValidationState::checked(field, valid);
        tracing::debug!(field = %field, valid, "Payment field validated");
    }

    /// Card network of the current card number, recomputed on every call
    pub fn network(&self) -> CardNetwork {
        detect_card_network(self.value(PaymentField::CardNumber))
    }

    /// Submission gate
    ///
    /// Non-card methods always pass. Card payments need all four fields
    /// touched and valid.
    pub fn can_submit(&self) -> bool {
        if !self.method.requires_card_validation() {
            return true;
        }
        self.fields.iter().all(|entry| entry.state.is_ready())
    }

    /// Fields currently preventing submission, in form order
    pub fn blocking_errors(&self) -> Vec<FieldValidationError> {
        if !self.method.requires_card_validation() {
            return Vec::new();
        }
        PaymentField::ALL
            .iter()
            .filter(|field| !self.field_state(**field).is_ready())
            .map(|field| FieldValidationError {
                field: *field,
                message: field.error_message().to_string(),
            })
            .collect()
    }

    /// Assemble the payload, if the gate lets it through
    pub fn payment_details(&self) -> Option<PaymentDetails> {
        if !self.can_submit() {
            return None;
        }

        let card = self.method.requires_card_validation().then(|| {
            CardDetails::new(
                digits_only(self.value(PaymentField::CardNumber)),
                self.network(),
                self.value(PaymentField::Expiry).to_string(),
                self.value(PaymentField::Cvv).to_string(),
                self.value(PaymentField::CardholderName).to_string(),
            )
        });

        Some(PaymentDetails {
            method: self.method,
            card,
        })
    }

    /// Everything the reservation flow needs to render the form
    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            method: self.method,
            fields: PaymentField::ALL
                .iter()
                .map(|field| (*field, self.entry(*field).clone()))
                .collect(),
            network: self.network(),
            can_submit: self.can_submit(),
        }
    }
}

impl Default for PaymentFormState {
    fn default() -> Self {
        Self::new(PaymentMethod::default())
    }
}

/// Serializable view of a form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSnapshot {
    pub method: PaymentMethod,
    pub fields: BTreeMap<PaymentField, FieldEntry>,
    pub network: CardNetwork,
    pub can_submit: bool,
}

/// A payment form instance owned by one reservation dialog
///
/// Wraps [`PaymentFormState`] with the date source used for expiry checks
/// and an optional event bus notified on submission.
pub struct PaymentForm {
    state: PaymentFormState,
    clock: Arc<dyn Clock>,
    events: Option<PaymentEventBus>,
}

impl PaymentForm {
    pub fn new(method: PaymentMethod) -> Self {
        Self::with_clock(method, Arc::new(SystemClock))
    }

    pub fn with_clock(method: PaymentMethod, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: PaymentFormState::new(method),
            clock,
            events: None,
        }
    }

    /// Publish submission outcomes on `bus`
    pub fn with_event_bus(mut self, bus: PaymentEventBus) -> Self {
        self.events = Some(bus);
        self
    }

    pub fn state(&self) -> &PaymentFormState {
        &self.state
    }

    pub fn method(&self) -> PaymentMethod {
        self.state.method()
    }

    /// Feed one event through the state machine
    pub fn dispatch(&mut self, event: &FieldEvent) {
        let today = self.clock.today();
        self.state.apply(event, today);
    }

    /// Handle a change event and return the display value to render
    pub fn change(&mut self, field: PaymentField, raw: &str) -> &str {
        self.dispatch(&FieldEvent::Change {
            field,
            value: raw.to_string(),
        });
        self.state.value(field)
    }

    /// Handle a blur event and return the resulting field state
    pub fn blur(&mut self, field: PaymentField) -> &FieldValidationState {
        self.dispatch(&FieldEvent::Blur { field });
        self.state.field_state(field)
    }

    /// Switch payment method, discarding every field
    pub fn select_method(&mut self, method: PaymentMethod) {
        self.state = PaymentFormState::new(method);
    }

    pub fn network(&self) -> CardNetwork {
        self.state.network()
    }

    pub fn can_submit(&self) -> bool {
        self.state.can_submit()
    }

    /// Hand the validated payload to `submitter`
    ///
    /// Field state is never modified, so a failed attempt leaves the form as
    /// it was for the user to retry.
    pub async fn submit(&self, submitter: &dyn PaymentSubmitter) -> CheckoutResult<SubmissionReceipt> {
        let Some(details) = self.state.payment_details() else {
            let errors = self.state.blocking_errors();
            tracing::warn!(
                method = %self.method(),
                blocking = errors.len(),
                "Payment submission blocked"
            );
            return Err(ValidationError::FieldErrors(errors).into());
        };

        let method = details.method;
        let network = details.card.as_ref().map(|card| card.network);
        let last_four = details.card.as_ref().map(|card| card.last_four.clone());

        match submitter.submit(details).await {
            Ok(receipt) => {
                tracing::info!(
                    reference = %receipt.reference,
                    method = %method,
                    network = ?network,
                    last_four = ?last_four,
                    "Payment submitted"
                );
                self.publish(PaymentEvent::Submitted {
                    reference: receipt.reference,
                    method,
                    network,
                    last_four,
                });
                Ok(receipt)
            }
            Err(err) => {
                tracing::warn!(method = %method, error = %err, "Payment submission failed");
                self.publish(PaymentEvent::SubmissionFailed {
                    method,
                    reason: err.to_string(),
                });
                Err(err.into())
            }
        }
    }

    fn publish(&self, event: PaymentEvent) {
        if let Some(bus) = &self.events {
            bus.publish(event);
        }
    }
}
