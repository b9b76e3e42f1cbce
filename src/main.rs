use clap::Parser;
use pix_checkout_relay::{create_router, AppState, Config};
use pix_checkout_relay::utils::money::format_currency;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "pix-checkout-relay")]
#[command(about = "Relays storefront checkouts to a PIX payment processor")]
struct Args {
    /// Port to bind to (overrides PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Log filter, e.g. "info" or "pix_checkout_relay=debug"
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::new(&args.log_level))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::from_env();
    if let Some(port) = args.port {
        config.server_port = port;
    }

    info!("Starting {} v{}", config.service_name, env!("CARGO_PKG_VERSION"));
    info!(
        "Product: {} ({})",
        config.product.name,
        format_currency(config.product.price.cents())
    );
    info!("Processor: {}", config.processor.base_url);
    if config.processor.secret_key.is_empty() || config.processor.company_id.is_empty() {
        warn!(
            "PROCESSOR_SECRET_KEY or PROCESSOR_COMPANY_ID not set, processor calls will be rejected"
        );
    }
    if config.self_test_enabled {
        warn!("Self-test route enabled: GET /test-checkout creates real transactions");
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let state = Arc::new(AppState::from_config(config)?);
    let app = create_router(state);

    let listener = TcpListener::bind(addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
