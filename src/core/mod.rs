//! Core module containing the payment form engine

pub mod card;
pub mod clock;
pub mod error;
pub mod events;
pub mod field;
pub mod form;
pub mod method;
pub mod submission;
pub mod validation;

pub use card::{CardNetwork, detect_card_network, luhn_valid};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{CheckoutError, CheckoutResult, ConfigError, SubmissionError, ValidationError};
pub use events::{PaymentEvent, PaymentEventBus};
pub use field::{FieldValidationState, PaymentField};
pub use form::{FieldEntry, FieldEvent, FormSnapshot, PaymentForm, PaymentFormState};
pub use method::PaymentMethod;
pub use submission::{
    CardDetails, PaymentDetails, PaymentSubmitter, SimulatedSubmitter, SubmissionReceipt,
};
