//! Pharmyx API server.
//!
//! Run with: cargo run -p pharmyx-server

mod config;

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use pharmyx_common::http::{build_http_client, HttpSettings};
use pharmyx_llm::OpenAiBackend;
use pharmyx_report::ReportPipeline;
use pharmyx_retrieval::harvester::KnowledgeHarvester;
use pharmyx_retrieval::sources::anvisa::AnvisaClient;
use pharmyx_retrieval::sources::guidelines::GuidelineStub;
use pharmyx_retrieval::sources::openfda::OpenFdaClient;
use pharmyx_retrieval::sources::pubmed::PubMedClient;
use pharmyx_web::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env first, so OPENAI_API_KEY and RUST_LOG can live there
    dotenvy::dotenv().ok();

    // Initialise structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("pharmyx=debug,info")),
        )
        .init();

    info!("💊 Pharmyx starting up...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = config::Config::load()?;
    info!(
        "Configuration loaded. Model: {}, PubMed tool: {}",
        config.openai.model, config.pubmed.tool
    );

    let api_key = config::OpenAiConfig::api_key()?;

    // One HTTP client, one timeout policy, shared by every outbound call
    let client = build_http_client(&HttpSettings {
        timeout_secs: config.http.timeout_secs,
        user_agent: config.http.user_agent.clone(),
    })?;
    info!("✅ HTTP client ready ({}s timeout).", config.http.timeout_secs);

    let anvisa = Arc::new(AnvisaClient::new(client.clone()));
    let openfda = Arc::new(OpenFdaClient::new(client.clone()));
    let pubmed = Arc::new(PubMedClient::new(
        client.clone(),
        config.pubmed.email.clone(),
        Some(config.pubmed.tool.clone()),
    ));
    let harvester = KnowledgeHarvester::new(
        pubmed,
        Arc::new(GuidelineStub),
        config.pubmed.max_articles,
    );
    info!("✅ Retrieval clients ready (ANVISA, openFDA, PubMed).");

    let llm = OpenAiBackend::new(client, api_key, config.openai.model.clone())
        .with_api_url(config.openai.api_url.clone());
    info!("✅ LLM backend ready: {}.", config.openai.model);

    let pipeline = ReportPipeline::new(anvisa, openfda, harvester, Arc::new(llm));
    let app = pharmyx_web::build_router(AppState::new(pipeline));

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    info!("🚀 Server listening on http://{}", config.server.bind);

    axum::serve(listener, app).await?;

    Ok(())
}
