//! Embedding capability.
//!
//! The same endpoint must be used at chunk-ingestion time and at query
//! time; vectors from two different embedding models share no space and
//! retrieval would silently degrade to noise.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;

#[async_trait]
pub trait Embedder: Send + Sync {
    /// One vector per input text, in input order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let texts = [text.to_string()];
        let mut vectors = self.embed_batch(&texts).await?;
        vectors.pop().context("embedding service returned no vector")
    }
}

/// Client for a text-embeddings-inference style HTTP endpoint.
pub struct HttpEmbedder {
    base_url: String,
    client: reqwest::Client,
}

impl HttpEmbedder {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, client })
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let url = format!("{}/embed", self.base_url.trim_end_matches('/'));
        let resp = self
            .client
            .post(url)
            .json(&serde_json::json!({ "inputs": texts }))
            .send()
            .await
            .context("embedding request failed")?
            .error_for_status()
            .context("embedding service returned an error status")?;

        let vectors: Vec<Vec<f32>> = resp
            .json()
            .await
            .context("malformed embedding response")?;

        if vectors.len() != texts.len() {
            bail!(
                "embedding count mismatch: sent {} texts, got {} vectors",
                texts.len(),
                vectors.len()
            );
        }
        Ok(vectors)
    }
}
