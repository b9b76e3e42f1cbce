//! Shared application state

use crate::app::config::Config;
use crate::services::{PaymentProcessorClient, PaymentService, TransactionGateway};
use std::sync::Arc;

/// Read-only after startup; one instance shared by every request.
pub struct AppState {
    pub config: Config,
    pub payments: PaymentService,
}

impl AppState {
    pub fn new(config: Config, gateway: Arc<dyn TransactionGateway>) -> Self {
        let payments = PaymentService::new(gateway, config.product.clone());
        Self { config, payments }
    }

    /// Wires the real HTTP client to the configured processor.
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let client = PaymentProcessorClient::new(&config.processor)?;
        Ok(Self::new(config, Arc::new(client)))
    }
}
