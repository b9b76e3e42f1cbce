use crate::app::config::ProcessorConfig;
use crate::error::RelayError;
use crate::models::processor::{ProcessorPayload, ProcessorTransaction};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info};
use url::Url;

const COMPANY_ID_HEADER: &str = "Company-ID";

/// Outbound side of the relay.
#[async_trait]
pub trait TransactionGateway: Send + Sync {
    async fn create_transaction(
        &self,
        payload: &ProcessorPayload,
    ) -> Result<ProcessorTransaction, RelayError>;

    /// Returns the processor's raw record for `id`.
    async fn fetch_transaction(&self, id: &str) -> Result<Value, RelayError>;
}

pub struct PaymentProcessorClient {
    client: Client,
    base_url: Url,
    secret_key: String,
    company_id: String,
}

impl PaymentProcessorClient {
    pub fn new(config: &ProcessorConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_idle_timeout(Duration::from_secs(30))
            .build()
            .context("failed to create HTTP client")?;

        let base_url = Url::parse(&config.base_url)
            .with_context(|| format!("invalid processor base URL: {}", config.base_url))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("processor base URL cannot be a base: {}", config.base_url);
        }

        Ok(Self {
            client,
            base_url,
            secret_key: config.secret_key.clone(),
            company_id: config.company_id.clone(),
        })
    }

    /// `{base}/transactions` or `{base}/transactions/{id}`, with `id` percent-encoded.
    fn transactions_url(&self, id: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("transactions");
            if let Some(id) = id {
                segments.push(id);
            }
        }
        url
    }

    // Basic auth com a secret key como usuário e senha vazia: base64("key:")
    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(ACCEPT, "application/json")
            .basic_auth(&self.secret_key, None::<&str>)
            .header(COMPANY_ID_HEADER, &self.company_id)
    }
}

#[async_trait]
impl TransactionGateway for PaymentProcessorClient {
    async fn create_transaction(
        &self,
        payload: &ProcessorPayload,
    ) -> Result<ProcessorTransaction, RelayError> {
        let url = self.transactions_url(None);
        info!(
            amount = payload.amount.cents(),
            external_ref = ?payload.items.first().map(|item| &item.external_ref),
            "Sending transaction to payment processor"
        );
        debug!(payload = ?payload, "Processor payload");

        let response = self
            .authorized(self.client.post(url))
            .header(CONTENT_TYPE, "application/json")
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        info!(status = status.as_u16(), "Payment processor responded");

        if status == StatusCode::OK || status == StatusCode::CREATED {
            let transaction = response.json::<ProcessorTransaction>().await?;
            info!(id = %transaction.id, "Transaction created");
            Ok(transaction)
        } else {
            let body = response.text().await.unwrap_or_default();
            error!(
                status = status.as_u16(),
                body = %body,
                "Payment processor rejected transaction"
            );
            Err(RelayError::Processor {
                status: status.as_u16(),
                body,
            })
        }
    }

    async fn fetch_transaction(&self, id: &str) -> Result<Value, RelayError> {
        let url = self.transactions_url(Some(id));
        debug!(id = %id, "Fetching transaction from payment processor");

        let response = self.authorized(self.client.get(url)).send().await?;
        let status = response.status();

        if status == StatusCode::OK {
            Ok(response.json::<Value>().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            info!(id = %id, status = status.as_u16(), "Transaction lookup failed");
            Err(RelayError::TransactionNotFound {
                status: status.as_u16(),
                body,
            })
        }
    }
}
