//! # Checkout
//!
//! Payment form engine of the vehicle rental reservation flow.
//!
//! ## Features
//!
//! - **Formatters**: card number grouping, `MM/YY` expiry, upper-cased cardholder name
//! - **Classifiers**: card network detection, Luhn checksum, expiry, CVV and name checks
//! - **Field State Machine**: untouched / touched-valid / touched-invalid, driven by change and blur events
//! - **Submission Gate**: optimistic display, pessimistic gating for card payments
//! - **Submission**: validated payload handed once to a pluggable payment handler
//! - **HTTP Exposure**: stateless axum routes replaying field events
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use checkout::prelude::*;
//!
//! let mut form = PaymentForm::new(PaymentMethod::Card);
//!
//! form.change(PaymentField::CardNumber, "4111111111111111"); // "4111 1111 1111 1111"
//! assert_eq!(form.network(), CardNetwork::Visa);
//! assert!(!form.can_submit()); // nothing blurred yet
//!
//! form.blur(PaymentField::CardNumber);
//! // ... expiry, CVV, cardholder name ...
//!
//! let receipt = form.submit(&SimulatedSubmitter::default()).await?;
//! ```

pub mod config;
pub mod core;
pub mod server;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        card::{CardNetwork, detect_card_network, is_card_number_valid, luhn_valid},
        clock::{Clock, FixedClock, SystemClock},
        events::{EventEnvelope, PaymentEvent, PaymentEventBus},
        field::{FieldValidationState, PaymentField},
        form::{FieldEntry, FieldEvent, FormSnapshot, PaymentForm, PaymentFormState},
        method::PaymentMethod,
        submission::{
            CardDetails, PaymentDetails, PaymentSubmitter, SimulatedSubmitter, SubmissionReceipt,
        },
        validation::{
            format_card_number, format_cardholder_name, format_expiry, is_cvv_valid,
            is_expiry_valid, is_expiry_valid_at, is_name_valid,
        },
    };

    // === Errors ===
    pub use crate::core::error::{
        CheckoutError, CheckoutResult, ConfigError, ErrorResponse, FieldValidationError,
        SubmissionError, ValidationError,
    };

    // === Config ===
    pub use crate::config::{CheckoutConfig, ServerConfig, SubmissionConfig};

    // === Server ===
    pub use crate::server::{AppState, CheckoutServer, FormRequest};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use chrono::NaiveDate;
}
