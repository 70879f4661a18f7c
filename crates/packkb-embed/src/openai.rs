//! Blocking embeddings client for OpenAI-compatible endpoints.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use packkb_core::config::EmbedJobConfig;
use packkb_core::error::Error;

use crate::EmbedProvider;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Talks to the `/embeddings` endpoint. A failed call surfaces immediately;
/// the batch pipeline owns the retry policy.
#[derive(Debug)]
pub struct OpenAiProvider {
    client: Client,
    endpoint: String,
    model: String,
    dimensions: usize,
}

impl OpenAiProvider {
    /// Build a client from `OPENAI_API_KEY` (and optionally
    /// `OPENAI_BASE_URL`). A missing or empty key is a startup error.
    pub fn from_env(job: &EmbedJobConfig) -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(Error::MissingCredential)?;
        let base_url = std::env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(&api_key, &base_url, job)
    }

    pub fn new(api_key: &str, base_url: &str, job: &EmbedJobConfig) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        let auth = format!("Bearer {}", api_key.trim());
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth).context("invalid OpenAI API key")?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(headers)
            .build()
            .context("failed to build OpenAI HTTP client")?;
        let endpoint = format!("{}/embeddings", base_url.trim_end_matches('/'));
        Ok(Self {
            client,
            endpoint,
            model: job.model.clone(),
            dimensions: job.dimensions,
        })
    }
}

impl EmbedProvider for OpenAiProvider {
    fn embedder_id(&self) -> &str {
        &self.model
    }

    fn dim(&self) -> usize {
        self.dimensions
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let request = EmbeddingRequest {
            model: &self.model,
            input: texts,
            dimensions: self.dimensions,
        };
        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .context("embeddings request failed")?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .unwrap_or_else(|_| "<body unavailable>".to_string());
            anyhow::bail!("embeddings request failed ({status}): {body}");
        }
        let mut parsed: EmbeddingResponse = response
            .json()
            .context("failed to parse embedding response")?;
        // The service is contracted to preserve order; sorting by the echoed
        // index makes that explicit.
        parsed.data.sort_by_key(|entry| entry.index);
        anyhow::ensure!(
            parsed.data.len() == texts.len(),
            "service returned {} embeddings for {} inputs",
            parsed.data.len(),
            texts.len()
        );
        Ok(parsed.data.into_iter().map(|entry| entry.embedding).collect())
    }
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
    dimensions: usize,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}
