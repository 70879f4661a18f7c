//! Configuration loader and run constants.
//!
//! Uses Figment to merge `config.toml` + `APP_*` env vars for file paths;
//! the embedding-run constants themselves are compile-time defaults on
//! `EmbedJobConfig`, not runtime inputs.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::PathBuf;
use std::time::Duration;

/// Fixed constants steering one embedding run.
///
/// Kept in one struct (instead of module-level globals) so the embedder takes
/// them at construction and tests can build small, fast variants.
#[derive(Debug, Clone)]
pub struct EmbedJobConfig {
    /// Embedding model identifier sent to the service.
    pub model: String,
    /// Vector length requested from the service; every output vector must
    /// have exactly this length.
    pub dimensions: usize,
    /// Maximum items per service call.
    pub batch_size: usize,
    /// Total attempts per batch before the run aborts.
    pub retry_attempts: usize,
    pub retry_delay_ms: u64,
    pub batch_delay_ms: u64,
}

impl Default for EmbedJobConfig {
    fn default() -> Self {
        Self {
            model: "text-embedding-3-small".to_string(),
            dimensions: 1536,
            batch_size: 100,
            retry_attempts: 3,
            retry_delay_ms: 2_000,
            batch_delay_ms: 500,
        }
    }
}

impl EmbedJobConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }
}

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let figment = Figment::new()
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("APP_"));
        Ok(Self { figment })
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}
