use std::sync::Arc;

use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use analyst::config::AppConfig;
use analyst::embedder::HttpEmbedder;
use analyst::generator::{Generator, OpenAiCompatGenerator};
use analyst::index::ChromaIndex;
use analyst::rag::RetrievalAnswerer;
use analyst::state::{AppState, PredictorState};
use analyst::{routes_ask, routes_meta, routes_predict};

use worldcup::TeamAliases;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env()?;

    // --- Reference data (immutable after this point) ---
    // A missing table or model bundle degrades prediction to unavailable;
    // retrieval does not depend on any of it and keeps working.
    let (results, results_err) = match worldcup::load_results(&cfg.data_dir.join("results.csv")) {
        Ok(r) => {
            info!("results table: {} records", r.len());
            (r, None)
        }
        Err(e) => {
            warn!("results table unavailable: {e}");
            (Vec::new(), Some(e.to_string()))
        }
    };

    let aliases = match &cfg.aliases_file {
        Some(path) => TeamAliases::with_defaults_and_file(path)
            .with_context(|| format!("Failed to load alias table from {}", path.display()))?,
        None => TeamAliases::with_defaults(),
    };

    let predictor = match results_err {
        Some(reason) => PredictorState::Unavailable { reason },
        None => match predictor::load_bundle(&cfg.model_dir) {
            Ok(bundle) => {
                info!("prediction model loaded ({} known teams)", bundle.teams.len());
                PredictorState::Ready(bundle)
            }
            Err(e) => {
                warn!("prediction model unavailable: {e}");
                PredictorState::Unavailable {
                    reason: e.to_string(),
                }
            }
        },
    };

    // --- External capabilities ---
    if cfg.llm_api_key.is_none() {
        warn!("LLM_API_KEY not set; generation requests will likely be rejected upstream");
    }
    let embedder = Arc::new(HttpEmbedder::new(
        cfg.embedding_url.clone(),
        cfg.upstream_timeout,
    )?);
    let generator = Arc::new(OpenAiCompatGenerator::new(
        cfg.llm_base_url.clone(),
        cfg.llm_api_key.clone(),
        cfg.llm_model.clone(),
        cfg.upstream_timeout,
    )?);
    let index = Arc::new(ChromaIndex::new(
        cfg.chroma_url.clone(),
        cfg.chroma_collection.clone(),
        cfg.upstream_timeout,
    )?);

    // Non-fatal reachability check; per-request errors still surface.
    if let Err(e) = generator.ping().await {
        warn!("llm endpoint unreachable at startup: {e}");
    }

    let answerer = RetrievalAnswerer::new(embedder, index, generator);

    let state = Arc::new(AppState {
        results,
        aliases,
        predictor,
        answerer,
    });

    let app = Router::new()
        .route("/health", get(routes_meta::health))
        .route("/teams", get(routes_meta::teams))
        .route("/ask", post(routes_ask::ask))
        .route("/predict", post(routes_predict::predict))
        .layer(CorsLayer::permissive())
        .with_state(state);

    info!("analyst listening on http://{}", cfg.bind_addr);
    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", cfg.bind_addr))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
