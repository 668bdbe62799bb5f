//! CheckoutServer for a fluent API to build the payment HTTP server

use super::handlers::AppState;
use super::router::build_payment_routes;
use crate::config::CheckoutConfig;
use crate::core::clock::{Clock, SystemClock};
use crate::core::events::PaymentEventBus;
use crate::core::submission::{PaymentSubmitter, SimulatedSubmitter};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builder for the checkout HTTP server
///
/// # Example
///
/// ```ignore
/// CheckoutServer::new(CheckoutConfig::from_yaml_file("checkout.yaml")?)
///     .with_submitter(MyGateway::new())
///     .serve()
///     .await?;
/// ```
pub struct CheckoutServer {
    config: CheckoutConfig,
    submitter: Option<Arc<dyn PaymentSubmitter>>,
    clock: Arc<dyn Clock>,
    events: PaymentEventBus,
}

impl CheckoutServer {
    pub fn new(config: CheckoutConfig) -> Self {
        Self {
            config,
            submitter: None,
            clock: Arc::new(SystemClock),
            events: PaymentEventBus::default(),
        }
    }

    /// Set the payment handler
    ///
    /// Without one, a [`SimulatedSubmitter`] using the configured delay is used.
    pub fn with_submitter(mut self, submitter: impl PaymentSubmitter + 'static) -> Self {
        self.submitter = Some(Arc::new(submitter));
        self
    }

    /// Set the date source used for expiry checks
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Share an existing event bus
    pub fn with_event_bus(mut self, events: PaymentEventBus) -> Self {
        self.events = events;
        self
    }

    /// Bus on which submissions are published
    pub fn event_bus(&self) -> &PaymentEventBus {
        &self.events
    }

    /// Build the router
    pub fn build(self) -> Result<Router> {
        self.config.check()?;

        let submitter = self.submitter.unwrap_or_else(|| {
            Arc::new(SimulatedSubmitter::new(
                self.config.submission.simulated_delay(),
            ))
        });

        let state = AppState {
            config: Arc::new(self.config),
            submitter,
            clock: self.clock,
            events: self.events,
        };

        Ok(build_payment_routes(state)
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http()))
    }

    /// Serve on the configured address with graceful shutdown
    ///
    /// Handles SIGTERM and SIGINT (Ctrl+C).
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.server.bind.clone();
        let app = self.build()?;
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Checkout server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Checkout server shutdown complete");
        Ok(())
    }
}

impl Default for CheckoutServer {
    fn default() -> Self {
        Self::new(CheckoutConfig::default_config())
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
