//! Embedding providers.
//!
//! The pipeline only sees the `EmbedProvider` trait, so tests swap in the
//! deterministic fake and never touch the network.

use anyhow::Result;

use packkb_core::config::EmbedJobConfig;

pub mod openai;

pub use openai::OpenAiProvider;

pub trait EmbedProvider: Send + Sync {
    /// Stable identifier for the provider/model (e.g. `text-embedding-3-small`).
    fn embedder_id(&self) -> &str;
    /// Embedding dimensionality (D).
    fn dim(&self) -> usize;
    /// Compute embeddings for a batch of input texts, one vector per text,
    /// in submission order.
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// Deterministic offline embedder: hashed tokens into a fixed-size vector,
/// L2-normalized. Same input, same vector, every run.
pub struct FakeProvider {
    id: String,
    dim: usize,
}

impl FakeProvider {
    pub fn new(dim: usize) -> Self {
        Self { id: format!("fake:d{dim}"), dim }
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        use std::hash::{Hash, Hasher};
        use twox_hash::XxHash64;
        let mut v = vec![0f32; self.dim];
        for (i, token) in text.split_whitespace().enumerate() {
            let mut hasher = XxHash64::with_seed(0);
            token.hash(&mut hasher);
            let h = hasher.finish();
            let idx = (h as usize) % self.dim;
            let val = (((h >> 32) as u32) as f32) / (u32::MAX as f32);
            v[idx] += val + (i as f32 % 3.0) * 0.01;
        }
        let norm = (v.iter().map(|x| x * x).sum::<f32>()).sqrt().max(1e-6);
        for x in &mut v {
            *x /= norm;
        }
        v
    }
}

impl EmbedProvider for FakeProvider {
    fn embedder_id(&self) -> &str {
        &self.id
    }

    fn dim(&self) -> usize {
        self.dim
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }
}

/// Pick the provider for a run: the remote OpenAI client, or the fake
/// embedder when `APP_USE_FAKE_EMBEDDINGS=1` (no credential needed).
pub fn get_default_provider(job: &EmbedJobConfig) -> Result<Box<dyn EmbedProvider>> {
    let use_fake = std::env::var("APP_USE_FAKE_EMBEDDINGS")
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    if use_fake {
        println!("🧪 Using FakeProvider");
        return Ok(Box::new(FakeProvider::new(job.dimensions)));
    }
    Ok(Box::new(OpenAiProvider::from_env(job)?))
}
