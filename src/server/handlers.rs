//! HTTP handlers for the payment form
//!
//! The API is stateless: each request carries the selected method and the
//! list of field events the front end recorded, which are replayed through
//! the form state machine.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::CheckoutConfig;
use crate::core::clock::Clock;
use crate::core::error::{CheckoutResult, ValidationError};
use crate::core::events::PaymentEventBus;
use crate::core::form::{FieldEvent, FormSnapshot, PaymentForm};
use crate::core::method::PaymentMethod;
use crate::core::submission::{PaymentSubmitter, SubmissionReceipt};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<CheckoutConfig>,
    pub submitter: Arc<dyn PaymentSubmitter>,
    pub clock: Arc<dyn Clock>,
    pub events: PaymentEventBus,
}

impl AppState {
    /// Rebuild a form from the events recorded by the client
    fn replay(&self, request: &FormRequest) -> CheckoutResult<PaymentForm> {
        if !self.config.is_method_enabled(request.method) {
            return Err(ValidationError::MethodNotEnabled {
                method: request.method,
            }
            .into());
        }

        let mut form = PaymentForm::with_clock(request.method, self.clock.clone())
            .with_event_bus(self.events.clone());
        for event in &request.events {
            form.dispatch(event);
        }
        Ok(form)
    }
}

/// Request body shared by the form and submit endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormRequest {
    pub method: PaymentMethod,
    #[serde(default)]
    pub events: Vec<FieldEvent>,
}

/// One entry of the method picker
#[derive(Debug, Serialize)]
pub struct MethodInfo {
    pub id: PaymentMethod,
    pub label: &'static str,
    pub requires_card_validation: bool,
}

/// Response for the methods endpoint
#[derive(Debug, Serialize)]
pub struct MethodsResponse {
    pub methods: Vec<MethodInfo>,
}

/// GET /health
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// GET /payment/methods
pub async fn list_methods(State(state): State<AppState>) -> Json<MethodsResponse> {
    let methods = state
        .config
        .methods
        .iter()
        .map(|method| MethodInfo {
            id: *method,
            label: method.label(),
            requires_card_validation: method.requires_card_validation(),
        })
        .collect();

    Json(MethodsResponse { methods })
}

/// POST /payment/form
pub async fn evaluate_form(
    State(state): State<AppState>,
    Json(request): Json<FormRequest>,
) -> CheckoutResult<Json<FormSnapshot>> {
    let form = state.replay(&request)?;
    Ok(Json(form.state().snapshot()))
}

/// POST /payment/submit
pub async fn submit_payment(
    State(state): State<AppState>,
    Json(request): Json<FormRequest>,
) -> CheckoutResult<(StatusCode, Json<SubmissionReceipt>)> {
    let form = state.replay(&request)?;
    let receipt = form.submit(state.submitter.as_ref()).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}
