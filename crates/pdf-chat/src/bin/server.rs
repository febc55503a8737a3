//! Answer gateway binary
//!
//! Run with: cargo run -p pdf-chat --bin pdf-chat-server

use std::path::Path;

use pdf_chat::{config::AppConfig, server::PdfChatServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pdf_chat=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path = std::env::var("PDF_CHAT_CONFIG").unwrap_or_else(|_| "pdf-chat.toml".into());
    let config = AppConfig::load(Path::new(&config_path))?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - LLM model: {}", config.llm.model);
    tracing::info!("  - Embedding model: {}", config.embeddings.model);
    tracing::info!("  - Chunk size: {}", config.chunking.chunk_size);
    tracing::info!("  - Index path: {:?}", config.index.storage_path);

    // Refuses to start when the API-key variable is absent.
    let server = PdfChatServer::new(config)?;

    println!("\nServer starting on http://{}", server.address());
    println!("Endpoints:");
    println!("  POST /AI_Answer/       - Answer from supplied context");
    println!("  POST /Smart_AI_Answer/ - Answer with routing");
    println!("  GET  /health           - Liveness probe\n");

    server.start().await?;

    Ok(())
}
