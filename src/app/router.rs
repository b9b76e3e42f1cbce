use crate::app::state::AppState;
use crate::handlers::{info, payments};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

pub fn create_router(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        .route("/", get(info::home))
        .route("/health", get(info::health))
        .route("/create-payment", post(payments::create_payment))
        .route("/check-payment/:transaction_id", get(payments::check_payment));

    if state.config.self_test_enabled {
        router = router.route("/test-checkout", get(payments::test_checkout));
    }

    router.layer(cors_layer()).with_state(state)
}

// Landing pages are served from arbitrary domains.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
