//! Offline ingestion: source tables -> chunks -> embeddings -> vector index.
//!
//! Rebuilds the collection from scratch on every run; chunk generation is
//! deterministic so a reingest always converges to the same content.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use analyst::config::AppConfig;
use analyst::embedder::{Embedder, HttpEmbedder};
use analyst::index::{ChromaIndex, VectorIndex};

use worldcup::ChunkMetadata;

const BATCH_SIZE: usize = 100;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env()?;

    let matches = worldcup::load_matches(&cfg.data_dir.join("WorldCupMatches.csv"))
        .context("Failed to load matches table")?;
    let cups = worldcup::load_tournaments(&cfg.data_dir.join("WorldCups.csv"))
        .context("Failed to load tournaments table")?;
    info!("loaded {} matches, {} tournaments", matches.len(), cups.len());

    let chunks = worldcup::generate_all_chunks(&matches, &cups);
    let (mut n_match, mut n_tournament, mut n_team) = (0, 0, 0);
    for c in &chunks {
        match c.metadata {
            ChunkMetadata::Match { .. } => n_match += 1,
            ChunkMetadata::Tournament { .. } => n_tournament += 1,
            ChunkMetadata::TeamHistory { .. } => n_team += 1,
        }
    }
    info!(
        "generated {} chunks ({n_match} match, {n_tournament} tournament, {n_team} team history)",
        chunks.len()
    );

    let embedder = Arc::new(HttpEmbedder::new(
        cfg.embedding_url.clone(),
        cfg.upstream_timeout,
    )?);
    let index = Arc::new(ChromaIndex::new(
        cfg.chroma_url.clone(),
        cfg.chroma_collection.clone(),
        cfg.upstream_timeout,
    )?);

    index
        .recreate_collection()
        .await
        .context("Failed to recreate collection")?;

    let total_batches = chunks.len().div_ceil(BATCH_SIZE);
    for (i, batch) in chunks.chunks(BATCH_SIZE).enumerate() {
        let texts: Vec<String> = batch.iter().map(|c| c.text.clone()).collect();
        let embeddings = embedder
            .embed_batch(&texts)
            .await
            .with_context(|| format!("Embedding batch {} failed", i + 1))?;
        index
            .add_batch(batch, &embeddings)
            .await
            .with_context(|| format!("Ingesting batch {} failed", i + 1))?;
        info!("ingested batch {}/{total_batches}", i + 1);
    }

    info!("done: {} chunks stored", chunks.len());
    Ok(())
}
