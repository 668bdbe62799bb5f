//! Checkout server example
//!
//! Serves the payment routes with the simulated payment handler and logs
//! every submission published on the event bus.
//!
//! ```text
//! cargo run --example checkout_server -- checkout.yaml
//! ```

use checkout::prelude::*;
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,checkout=debug")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => CheckoutConfig::from_yaml_file(&path)?,
        None => CheckoutConfig::default_config(),
    };

    let server = CheckoutServer::new(config);

    let mut rx = server.event_bus().subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(envelope) => {
                    tracing::info!(
                        event_id = %envelope.id,
                        action = envelope.event.action(),
                        method = %envelope.event.method(),
                        "Payment event"
                    );
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Payment event logger lagged behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    server.serve().await
}
