//! Typed error handling for the checkout engine
//!
//! Formatters and classifiers never fail; an invalid field is a state, not an
//! error. The errors below cover what happens around them:
//!
//! - [`ValidationError`]: the submission gate refused the form
//! - [`SubmissionError`]: the external payment handler failed
//! - [`ConfigError`]: configuration could not be loaded or is out of bounds
//!
//! # Example
//!
//! ```rust,ignore
//! match form.submit(&submitter).await {
//!     Ok(receipt) => println!("Paid: {}", receipt.reference),
//!     Err(CheckoutError::Validation(ValidationError::FieldErrors(errors))) => {
//!         for e in errors {
//!             println!("{}: {}", e.field, e.message);
//!         }
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::core::field::PaymentField;
use crate::core::method::PaymentMethod;

/// The main error type of the checkout engine
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The form did not pass the submission gate
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The payment handler rejected or failed the submission
    #[error(transparent)]
    Submission(#[from] SubmissionError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Internal errors (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl CheckoutError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            CheckoutError::Validation(_) => StatusCode::BAD_REQUEST,
            CheckoutError::Submission(e) => e.status_code(),
            CheckoutError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CheckoutError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            CheckoutError::Validation(_) => "VALIDATION_ERROR",
            CheckoutError::Submission(e) => e.error_code(),
            CheckoutError::Config(_) => "CONFIG_ERROR",
            CheckoutError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            CheckoutError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            CheckoutError::Validation(ValidationError::MethodNotEnabled { method }) => {
                Some(serde_json::json!({ "method": method }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for CheckoutError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Reasons the submission gate refused a form
#[derive(Debug, Error)]
pub enum ValidationError {
    /// One or more card fields are untouched or invalid
    #[error("Validation errors: {}", join_field_errors(.0))]
    FieldErrors(Vec<FieldValidationError>),

    /// The selected method is switched off in configuration
    #[error("Payment method not enabled: {method}")]
    MethodNotEnabled { method: PaymentMethod },
}

/// A single field blocking submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldValidationError {
    pub field: PaymentField,
    pub message: String,
}

fn join_field_errors(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

// =============================================================================
// Submission Errors
// =============================================================================

/// Failures reported by the external payment handler
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// The handler refused the payment
    #[error("Payment rejected: {message}")]
    Rejected { message: String },

    /// The handler could not be reached
    #[error("Payment service unavailable: {message}")]
    Unavailable { message: String },
}

impl SubmissionError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SubmissionError::Rejected { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            SubmissionError::Unavailable { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            SubmissionError::Rejected { .. } => "PAYMENT_REJECTED",
            SubmissionError::Unavailable { .. } => "SUBMISSION_FAILED",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// YAML could not be parsed
    #[error("Failed to parse config: {message}")]
    Parse { message: String },

    /// Values are out of their allowed bounds
    #[error("Invalid config: {message}")]
    Invalid { message: String },
}

/// Result type alias for checkout operations
pub type CheckoutResult<T> = Result<T, CheckoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn field_errors() -> CheckoutError {
        CheckoutError::Validation(ValidationError::FieldErrors(vec![
            FieldValidationError {
                field: PaymentField::Cvv,
                message: "Code CVV invalide".to_string(),
            },
            FieldValidationError {
                field: PaymentField::Expiry,
                message: "Date d'expiration invalide".to_string(),
            },
        ]))
    }

    #[test]
    fn test_validation_error_returns_400() {
        let err = field_errors();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_validation_error_message_lists_fields() {
        let msg = field_errors().to_string();
        assert!(msg.contains("cvv: Code CVV invalide"));
        assert!(msg.contains("expiry: Date d'expiration invalide"));
    }

    #[test]
    fn test_validation_error_response_details() {
        let response = field_errors().to_response();
        let details = response.details.expect("details should be present");
        assert_eq!(details["fields"][0]["field"], "cvv");
        assert_eq!(details["fields"][0]["message"], "Code CVV invalide");
    }

    #[test]
    fn test_method_not_enabled_details() {
        let err: CheckoutError = ValidationError::MethodNotEnabled {
            method: PaymentMethod::Crypto,
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_response().details.unwrap()["method"], "crypto");
    }

    #[test]
    fn test_submission_unavailable_returns_502() {
        let err: CheckoutError = SubmissionError::Unavailable {
            message: "timeout".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.error_code(), "SUBMISSION_FAILED");
        assert!(err.to_response().details.is_none());
    }

    #[test]
    fn test_submission_rejected_returns_422() {
        let err: CheckoutError = SubmissionError::Rejected {
            message: "insufficient funds".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.to_string(), "Payment rejected: insufficient funds");
    }

    #[test]
    fn test_config_error_returns_500() {
        let err: CheckoutError = ConfigError::Invalid {
            message: "no methods".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }
}
