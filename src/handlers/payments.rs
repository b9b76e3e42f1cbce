use axum::{
    body::Bytes,
    extract::{ConnectInfo, Path, State},
    http::HeaderMap,
    response::Json,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, info};

use crate::app::state::AppState;
use crate::error::RelayError;
use crate::models::payment::{
    CheckoutRequest, CustomCheckout, CustomerInfo, PaymentCreated, PaymentStatus,
};
use crate::services::CallerContext;
use crate::utils::client_ip::resolve_client_ip;
use crate::utils::money::Amount;

pub async fn create_payment(
    State(state): State<Arc<AppState>>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<PaymentCreated>, RelayError> {
    let caller = caller_context(&headers, peer);
    debug!(body = %String::from_utf8_lossy(&body), "Checkout received");

    let request = CheckoutRequest::parse(&body, state.payments.product().price)?;
    let created = state.payments.create_payment(request, caller).await?;

    info!(id = %created.transaction.id, "PIX payment created");
    Ok(Json(created))
}

pub async fn check_payment(
    State(state): State<Arc<AppState>>,
    Path(transaction_id): Path<String>,
) -> Result<Json<PaymentStatus>, RelayError> {
    info!(id = %transaction_id, "Checking payment status");
    let status = state.payments.check_payment(&transaction_id).await?;
    Ok(Json(status))
}

/// Runs a fixed sample checkout end to end against the configured processor.
pub async fn test_checkout(
    State(state): State<Arc<AppState>>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
) -> Result<Json<PaymentCreated>, RelayError> {
    info!("Running self-test checkout");
    let request = CheckoutRequest::Custom(sample_checkout());
    let created = state
        .payments
        .create_payment(request, caller_context(&headers, peer))
        .await?;
    Ok(Json(created))
}

fn sample_checkout() -> CustomCheckout {
    CustomCheckout {
        customer: CustomerInfo {
            name: "Cliente Teste Venda Hoje".to_string(),
            email: "teste@vendahoje.com".to_string(),
            phone: None,
            document: Some("12345678909".to_string()),
        },
        amount: Amount::DEFAULT_PRODUCT_PRICE,
        description: Some("Teste de compra - Mentoria Venda Hoje".to_string()),
        postback_url: None,
    }
}

fn caller_context(headers: &HeaderMap, peer: Option<ConnectInfo<SocketAddr>>) -> CallerContext {
    CallerContext::new(resolve_client_ip(headers, peer.map(|ConnectInfo(addr)| addr)))
}
