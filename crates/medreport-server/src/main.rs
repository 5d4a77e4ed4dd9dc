use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use medreport_genai::GeminiClient;
use medreport_report::ReportRenderer;
use medreport_server::config::ServerConfig;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::parse();
    info!("medreport-server starting");
    info!("model: {} ({})", config.model, config.api_base);
    if config.api_key.as_deref().is_some_and(|k| !k.is_empty()) {
        info!("gemini API key configured");
    } else {
        warn!("GEMINI_API_KEY not set; report generation will fail until it is");
    }

    let client = GeminiClient::new(config.gemini_config())?;
    let renderer = ReportRenderer::new(Arc::new(client));

    let addr = config.addr();
    let listener = TcpListener::bind(addr).await?;
    info!("medreport-server listening on http://{addr}");

    medreport_server::serve(listener, renderer).await
}
