//! Outbound mail adapter
//!
//! Mail delivery is outside this service; the notifier records each receipt
//! mail as a structured log event for the delivery pipeline to pick up.

use async_trait::async_trait;
use tracing::info;

use core_kernel::{DomainPort, PortError};
use domain_quote::OrderNotifier;

/// Notifier that emits each mail as a tracing event
#[derive(Debug, Clone)]
pub struct TracingNotifier {
    from: String,
}

impl TracingNotifier {
    pub fn new(from: impl Into<String>) -> Self {
        Self { from: from.into() }
    }

    pub fn from_address(&self) -> &str {
        &self.from
    }
}

impl DomainPort for TracingNotifier {}

#[async_trait]
impl OrderNotifier for TracingNotifier {
    async fn send(&self, address: &str, subject: &str, body: &str) -> Result<(), PortError> {
        if address.trim().is_empty() {
            return Err(PortError::internal("Mail has no recipient"));
        }
        info!(
            target: "mail",
            from = %self.from,
            to = %address,
            subject,
            body_chars = body.chars().count(),
            "Outbound mail"
        );
        Ok(())
    }
}
