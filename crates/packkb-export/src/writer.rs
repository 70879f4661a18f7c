//! JSON export writer.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;

use packkb_core::config::EmbedJobConfig;
use packkb_core::types::{EmbeddingPoint, ExportFile, ExportMetadata};

/// Serialize the finished points plus run metadata to `output_path`.
///
/// Parent directories are created on demand and an existing file is replaced.
/// Runs only after every batch succeeded, so a failed run leaves no file.
pub fn write_export(
    output_path: &Path,
    points: Vec<EmbeddingPoint>,
    job: &EmbedJobConfig,
) -> Result<()> {
    println!("\n💾 Saving embeddings to {}...", output_path.display());

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }

    let total = points.len();
    let export = ExportFile {
        points,
        metadata: ExportMetadata {
            total_items: total,
            embedding_model: job.model.clone(),
            dimensions: job.dimensions,
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        },
    };

    let json = serde_json::to_string_pretty(&export).context("failed to serialize export file")?;
    fs::write(output_path, &json)
        .with_context(|| format!("failed to write {}", output_path.display()))?;

    let size_mb = json.len() as f64 / (1024.0 * 1024.0);
    println!("✅ Saved {total} points to {}", output_path.display());
    println!("   File size: {size_mb:.2} MB");
    Ok(())
}
