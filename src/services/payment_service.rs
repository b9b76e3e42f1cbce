use crate::app::config::ProductConfig;
use crate::error::RelayError;
use crate::models::payment::{CheckoutRequest, PaymentCreated, PaymentStatus};
use crate::services::normalizer::{self, CallerContext};
use crate::services::payment_processor_client::TransactionGateway;
use crate::services::response_mapper;
use std::sync::Arc;
use tracing::info;

pub struct PaymentService {
    gateway: Arc<dyn TransactionGateway>,
    product: ProductConfig,
}

impl PaymentService {
    pub fn new(gateway: Arc<dyn TransactionGateway>, product: ProductConfig) -> Self {
        Self { gateway, product }
    }

    pub fn product(&self) -> &ProductConfig {
        &self.product
    }

    pub async fn create_payment(
        &self,
        request: CheckoutRequest,
        caller: CallerContext,
    ) -> Result<PaymentCreated, RelayError> {
        let kind = match &request {
            CheckoutRequest::Default => "default",
            CheckoutRequest::Custom(_) => "custom",
        };
        let payload = normalizer::normalize(&request, &self.product, &caller);
        info!(kind, amount = payload.amount.cents(), "Creating PIX payment");

        let transaction = self.gateway.create_transaction(&payload).await?;
        response_mapper::to_payment_created(transaction)
    }

    pub async fn check_payment(&self, transaction_id: &str) -> Result<PaymentStatus, RelayError> {
        let record = self.gateway.fetch_transaction(transaction_id).await?;
        Ok(response_mapper::to_payment_status(record))
    }
}
