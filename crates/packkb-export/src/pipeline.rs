//! Drives the embedding service over the whole knowledge base.
//!
//! Items are processed in contiguous batches of at most `batch_size`, in
//! order. Each batch is retried up to the ceiling with a fixed delay; a batch
//! that keeps failing aborts the run, so nothing partial reaches the writer.

use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use uuid::Uuid;

use packkb_core::config::EmbedJobConfig;
use packkb_core::types::{EmbeddingPoint, KnowledgeItem};
use packkb_embed::EmbedProvider;

type SleepFn = Box<dyn Fn(Duration) + Send + Sync>;

pub struct BatchEmbedder<'a> {
    provider: &'a dyn EmbedProvider,
    config: EmbedJobConfig,
    sleep: SleepFn,
}

impl<'a> BatchEmbedder<'a> {
    pub fn new(provider: &'a dyn EmbedProvider, config: EmbedJobConfig) -> Self {
        Self::with_sleep(provider, config, std::thread::sleep)
    }

    /// Same as `new` but with the delay function swapped out, so tests record
    /// sleeps instead of waiting them out.
    pub fn with_sleep(
        provider: &'a dyn EmbedProvider,
        config: EmbedJobConfig,
        sleep: impl Fn(Duration) + Send + Sync + 'static,
    ) -> Self {
        Self { provider, config, sleep: Box::new(sleep) }
    }

    /// Embed every item, one point per item, in input order.
    pub fn run(&self, items: &[KnowledgeItem]) -> Result<Vec<EmbeddingPoint>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        println!("\n🤖 Generating embeddings for {} items...", items.len());
        println!("   Model: {} ({} dimensions)", self.config.model, self.config.dimensions);
        println!("   Batch size: {}", self.config.batch_size);

        let batches: Vec<&[KnowledgeItem]> = items.chunks(self.config.batch_size).collect();
        let pb = ProgressBar::new(batches.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} batches ({percent}%) {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );

        let mut points = Vec::with_capacity(items.len());
        for (batch_index, batch) in batches.iter().enumerate() {
            let texts: Vec<String> = batch.iter().map(KnowledgeItem::embedding_text).collect();
            let vectors = self.embed_with_retry(&texts, batch_index)?;
            for (item, vector) in batch.iter().zip(vectors) {
                anyhow::ensure!(
                    vector.len() == self.config.dimensions,
                    "dim mismatch: got {} expected {}",
                    vector.len(),
                    self.config.dimensions
                );
                points.push(EmbeddingPoint {
                    id: Uuid::new_v4().to_string(),
                    vector,
                    payload: item.clone(),
                });
            }
            pb.set_position((batch_index + 1) as u64);
            // Pacing between calls; the last batch needs none.
            if batch_index + 1 < batches.len() {
                (self.sleep)(self.config.batch_delay());
            }
        }
        pb.finish_with_message("embedding batches complete");
        println!("\n✅ Generated {} embeddings successfully", points.len());
        Ok(points)
    }

    fn embed_with_retry(&self, texts: &[String], batch_index: usize) -> Result<Vec<Vec<f32>>> {
        let mut attempt = 1usize;
        loop {
            match self.provider.embed_batch(texts) {
                Ok(vectors) => {
                    anyhow::ensure!(
                        vectors.len() == texts.len(),
                        "service returned {} vectors for {} inputs",
                        vectors.len(),
                        texts.len()
                    );
                    return Ok(vectors);
                }
                Err(e) if attempt < self.config.retry_attempts => {
                    eprintln!(
                        "⚠️  batch {} attempt {}/{} failed: {e}",
                        batch_index + 1,
                        attempt,
                        self.config.retry_attempts
                    );
                    tracing::warn!(batch = batch_index, attempt, error = %e, "embed batch failed; retrying");
                    (self.sleep)(self.config.retry_delay());
                    attempt += 1;
                }
                Err(e) => {
                    return Err(e).with_context(|| {
                        format!(
                            "batch {} failed after {} attempts",
                            batch_index + 1,
                            self.config.retry_attempts
                        )
                    });
                }
            }
        }
    }
}
