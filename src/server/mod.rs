//! HTTP exposure of the payment form engine
//!
//! This module provides a `CheckoutServer` builder that mounts:
//! - the payment method listing used by the method picker
//! - form evaluation (formatted values, field states, card network, gate)
//! - payment submission through the configured handler

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::CheckoutServer;
pub use handlers::{AppState, FormRequest, MethodInfo, MethodsResponse};
pub use router::build_payment_routes;
