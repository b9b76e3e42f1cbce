//! pix-checkout-relay - relay between a storefront checkout and a PIX payment processor

pub mod app;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

pub use app::{create_router, AppState, Config};
pub use error::RelayError;
