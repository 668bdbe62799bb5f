//! Router builder for the payment routes

use super::handlers::{AppState, evaluate_form, health, list_methods, submit_payment};
use axum::{
    Router,
    routing::{get, post},
};

/// Build the payment routes
///
/// - GET  /health          - Liveness probe
/// - GET  /payment/methods - Enabled payment methods
/// - POST /payment/form    - Replay field events and return the form state
/// - POST /payment/submit  - Replay field events and submit the payment
pub fn build_payment_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/payment/methods", get(list_methods))
        .route("/payment/form", post(evaluate_form))
        .route("/payment/submit", post(submit_payment))
        .with_state(state)
}
