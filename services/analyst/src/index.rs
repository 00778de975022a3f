//! Vector index, treated as an opaque nearest-neighbor store.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use worldcup::TextChunk;

/// One retrieved passage with its provenance metadata, nearest first.
#[derive(Clone, Debug)]
pub struct RetrievedChunk {
    pub text: String,
    pub metadata: serde_json::Value,
}

#[async_trait]
pub trait VectorIndex: Send + Sync {
    async fn query(&self, embedding: &[f32], n_results: usize) -> Result<Vec<RetrievedChunk>>;

    /// Drop and recreate the collection ahead of a full reingest.
    async fn recreate_collection(&self) -> Result<()>;

    async fn add_batch(&self, chunks: &[TextChunk], embeddings: &[Vec<f32>]) -> Result<()>;
}

/// Client for the Chroma REST API.
pub struct ChromaIndex {
    base_url: String,
    collection: String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct CollectionInfo {
    id: String,
}

#[derive(Deserialize)]
struct QueryResponse {
    documents: Vec<Vec<String>>,
    metadatas: Vec<Vec<serde_json::Value>>,
}

impl ChromaIndex {
    pub fn new(base_url: String, collection: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url,
            collection,
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn collection_id(&self) -> Result<String> {
        let url = self.url(&format!("/collections/{}", self.collection));
        let info: CollectionInfo = self
            .client
            .get(url)
            .send()
            .await
            .context("vector index unreachable")?
            .error_for_status()
            .with_context(|| format!("collection {:?} not found", self.collection))?
            .json()
            .await
            .context("malformed collection response")?;
        Ok(info.id)
    }
}

#[async_trait]
impl VectorIndex for ChromaIndex {
    async fn query(&self, embedding: &[f32], n_results: usize) -> Result<Vec<RetrievedChunk>> {
        let id = self.collection_id().await?;
        let body = serde_json::json!({
            "query_embeddings": [embedding],
            "n_results": n_results,
            "include": ["documents", "metadatas"]
        });

        let resp: QueryResponse = self
            .client
            .post(self.url(&format!("/collections/{id}/query")))
            .json(&body)
            .send()
            .await
            .context("vector query failed")?
            .error_for_status()
            .context("vector index returned an error status")?
            .json()
            .await
            .context("malformed query response")?;

        let documents = resp.documents.into_iter().next().unwrap_or_default();
        let metadatas = resp.metadatas.into_iter().next().unwrap_or_default();

        Ok(documents
            .into_iter()
            .zip(metadatas)
            .map(|(text, metadata)| RetrievedChunk { text, metadata })
            .collect())
    }

    async fn recreate_collection(&self) -> Result<()> {
        // Absent collection is the expected first-run case and is not an
        // error; any other delete failure must propagate.
        let delete_url = self.url(&format!("/collections/{}", self.collection));
        let resp = self
            .client
            .delete(delete_url)
            .send()
            .await
            .context("vector index unreachable")?;
        if resp.status() == StatusCode::NOT_FOUND {
            debug!(collection = %self.collection, "no existing collection to delete");
        } else {
            resp.error_for_status()
                .context("failed to delete existing collection")?;
            debug!(collection = %self.collection, "deleted existing collection");
        }

        let body = serde_json::json!({
            "name": self.collection,
            "metadata": {"hnsw:space": "cosine"}
        });
        self.client
            .post(self.url("/collections"))
            .json(&body)
            .send()
            .await
            .context("collection create request failed")?
            .error_for_status()
            .context("failed to create collection")?;
        Ok(())
    }

    async fn add_batch(&self, chunks: &[TextChunk], embeddings: &[Vec<f32>]) -> Result<()> {
        let id = self.collection_id().await?;
        let ids: Vec<&str> = chunks.iter().map(|c| c.id.as_str()).collect();
        let documents: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let metadatas: Vec<serde_json::Value> = chunks
            .iter()
            .map(|c| serde_json::to_value(&c.metadata))
            .collect::<std::result::Result<_, _>>()?;

        let body = serde_json::json!({
            "ids": ids,
            "embeddings": embeddings,
            "documents": documents,
            "metadatas": metadatas
        });
        self.client
            .post(self.url(&format!("/collections/{id}/add")))
            .json(&body)
            .send()
            .await
            .context("vector add request failed")?
            .error_for_status()
            .context("vector index rejected the batch")?;
        Ok(())
    }
}
