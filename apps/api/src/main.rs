mod config;
mod copy;
mod errors;
mod llm_client;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::copy::exemplars::ExemplarPool;
use crate::copy::generator::Copywriter;
use crate::copy::vocabulary::Vocabulary;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Copydesk v{}", env!("CARGO_PKG_VERSION"));

    // Vocabulary: built-in lists unless an override file is configured
    let vocabulary = match &config.vocabulary_path {
        Some(path) => {
            let vocabulary = Vocabulary::load(path)?;
            info!("Vocabulary loaded from {}", path.display());
            vocabulary
        }
        None => Vocabulary::default(),
    };

    // Initialize LLM client
    let llm = LlmClient::new(
        config.openai_api_key.clone(),
        config.openai_base_url.clone(),
        config.model.clone(),
    );
    info!("LLM client initialized (model: {})", llm.model());

    let exemplars = ExemplarPool::default();
    info!(
        "Brand voice: {} exemplars, {} per prompt; limits: title {} words, description {} words",
        exemplars.len(),
        config.exemplar_count,
        config.title_max_words,
        config.description_max_words
    );

    let copywriter = Copywriter::new(
        Arc::new(llm),
        config.copy_settings(),
        exemplars,
        vocabulary,
    )?;

    // Build app state
    let state = AppState {
        copywriter: Arc::new(copywriter),
        config: config.clone(),
    };

    // Build router; the spreadsheet script calls from another origin
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
