//! MaturaLink HTTP/JSON gateway binary.

use clap::Parser;
use maturalink_core::{seed_subjects, Database};
use maturalink_gateway::{create_router, AppState, Args, GatewayConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line args
    let args = Args::parse();
    let config = GatewayConfig::from(&args);

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.default_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        listen = %config.listen_addr,
        database = %config.database_path.display(),
        "Starting MaturaLink gateway"
    );

    let db = Database::open(&config.database_path)?;
    if config.seed {
        let seeded = db.with_transaction(|tx| seed_subjects(tx))?;
        info!(subjects = seeded, "default subjects seeded");
    }

    // Create application state
    let state = AppState::new(db, config.clone());

    // Create router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    info!(
        request_timeout_ms = config.request_timeout.as_millis(),
        "Gateway listening on {}", config.listen_addr
    );

    axum::serve(listener, app).await?;

    Ok(())
}
