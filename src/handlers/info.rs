use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::app::state::AppState;
use crate::utils::money::format_currency;

pub async fn home(State(state): State<Arc<AppState>>) -> Json<Value> {
    let product = state.payments.product();

    let mut endpoints = json!({
        "create_payment": "/create-payment (POST)",
        "check_payment": "/check-payment/{id} (GET)",
        "health": "/health (GET)"
    });
    if state.config.self_test_enabled {
        endpoints["test"] = json!("/test-checkout (GET)");
    }

    Json(json!({
        "api": state.config.service_name,
        "version": env!("CARGO_PKG_VERSION"),
        "status": "online",
        "product": product.name,
        "price": format_currency(product.price.cents()),
        "endpoints": endpoints
    }))
}

pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "OK",
            "message": state.config.service_name
        })),
    )
}
