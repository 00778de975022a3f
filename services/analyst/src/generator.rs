//! Text-generation capability behind an OpenAI-compatible chat endpoint.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;

#[async_trait]
pub trait Generator: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
    async fn ping(&self) -> Result<()>;
}

pub struct OpenAiCompatGenerator {
    base_url: String,
    api_key: Option<String>,
    model: String,
    client: reqwest::Client,
}

impl OpenAiCompatGenerator {
    pub fn new(
        base_url: String,
        api_key: Option<String>,
        model: String,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url,
            api_key,
            model,
            client,
        })
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => req.bearer_auth(key),
            None => req,
        }
    }
}

#[async_trait]
impl Generator for OpenAiCompatGenerator {
    async fn complete(&self, prompt: &str) -> Result<String> {
        // Near-deterministic sampling, bounded output.
        let body = serde_json::json!({
            "model": self.model,
            "messages": [{"role": "user", "content": prompt}],
            "temperature": 0.1,
            "max_tokens": 500
        });

        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let resp = self
            .authorize(self.client.post(url).json(&body))
            .send()
            .await
            .context("generation request failed")?
            .error_for_status()
            .context("generation service returned an error status")?;

        let json: serde_json::Value = resp.json().await.context("malformed generation response")?;
        let content = json
            .pointer("/choices/0/message/content")
            .and_then(serde_json::Value::as_str)
            .context("generation response missing message content")?;
        Ok(content.to_string())
    }

    async fn ping(&self) -> Result<()> {
        let url = format!("{}/models", self.base_url.trim_end_matches('/'));
        self.authorize(self.client.get(url))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
