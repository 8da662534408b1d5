//! Drive Q&A server binary
//!
//! Run with: cargo run -p drive-qa --bin drive-qa-server

use drive_qa::{config::AppConfig, server::DriveQaServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "drive_qa=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;

    tracing::info!("Configuration loaded");
    tracing::info!(
        "  - Drive folder: {}",
        config.drive.folder_id.as_deref().unwrap_or("<not set>")
    );
    tracing::info!(
        "  - Service account: {}",
        config.drive.client_email.as_deref().unwrap_or("<not set>")
    );
    tracing::info!("  - LLM model: {}", config.llm.model);
    tracing::info!("  - Max tokens: {}", config.llm.max_tokens);
    match config.ingestion.max_concurrent_files {
        Some(limit) => tracing::info!("  - Concurrent files: {}", limit),
        None => tracing::info!("  - Concurrent files: unbounded"),
    }

    let server = DriveQaServer::new(config)?;

    // Check Anthropic
    if let Ok(answers) = server.state().answers() {
        match answers.health_check().await {
            Ok(true) => tracing::info!("Anthropic API reachable"),
            _ => tracing::warn!("Anthropic API not reachable; chat requests may fail"),
        }
    }

    tracing::info!("Health: http://{}/health", server.address());
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /api/google-drive  - Normalized folder documents");
    tracing::info!("  POST /api/chat          - Ask a question");
    tracing::info!("  GET  /api/config/status - Configuration presence");

    server.start().await?;

    Ok(())
}
