use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_addr: String,
    pub data_dir: PathBuf,
    pub model_dir: PathBuf,
    pub aliases_file: Option<PathBuf>,

    pub chroma_url: String,
    pub chroma_collection: String,
    pub embedding_url: String,

    pub llm_base_url: String,
    pub llm_api_key: Option<String>,
    pub llm_model: String,

    pub upstream_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let bind_addr =
            std::env::var("ANALYST_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let data_dir =
            PathBuf::from(std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()));
        let model_dir =
            PathBuf::from(std::env::var("MODEL_DIR").unwrap_or_else(|_| "data/model".to_string()));
        let aliases_file = std::env::var("TEAM_ALIASES_FILE").ok().map(PathBuf::from);

        let chroma_url =
            std::env::var("CHROMA_URL").unwrap_or_else(|_| "http://127.0.0.1:8000".to_string());
        let chroma_collection =
            std::env::var("CHROMA_COLLECTION").unwrap_or_else(|_| "fifa_data".to_string());
        let embedding_url =
            std::env::var("EMBEDDING_URL").unwrap_or_else(|_| "http://127.0.0.1:8081".to_string());

        let llm_base_url = std::env::var("LLM_BASE_URL")
            .unwrap_or_else(|_| "https://api.groq.com/openai/v1".to_string());
        let llm_api_key = std::env::var("LLM_API_KEY").ok().filter(|k| !k.is_empty());
        let llm_model =
            std::env::var("LLM_MODEL").unwrap_or_else(|_| "llama-3.1-8b-instant".to_string());

        let upstream_timeout = Duration::from_secs(
            std::env::var("UPSTREAM_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        );

        // Tiny sanity checks (fail fast, fail loud)
        for (name, url) in [
            ("CHROMA_URL", &chroma_url),
            ("EMBEDDING_URL", &embedding_url),
            ("LLM_BASE_URL", &llm_base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                bail!("{name} must start with http:// or https://");
            }
        }

        Ok(Self {
            bind_addr,
            data_dir,
            model_dir,
            aliases_file,
            chroma_url,
            chroma_collection,
            embedding_url,
            llm_base_url,
            llm_api_key,
            llm_model,
            upstream_timeout,
        })
    }
}
