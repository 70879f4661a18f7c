//! CSV knowledge-base loader.
//!
//! Row order is preserved. Multi-valued fields use two different in-field
//! delimiters: `season` splits on commas, `tags` and `climate` on semicolons.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::Error;
use crate::types::KnowledgeItem;

/// Load the packing knowledge base, one `KnowledgeItem` per data row.
pub fn load_knowledge_base(csv_path: &Path) -> Result<Vec<KnowledgeItem>> {
    println!("📖 Loading knowledge base from {}...", csv_path.display());

    let file = match File::open(csv_path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(Error::KnowledgeBaseNotFound(csv_path.display().to_string()).into());
        }
        Err(e) => {
            return Err(anyhow::Error::new(e)
                .context(format!("failed to open {}", csv_path.display())));
        }
    };

    let mut reader = csv::Reader::from_reader(file);
    let headers = reader
        .headers()
        .context("failed to read CSV header")?
        .clone();
    let columns = ColumnMap::from_headers(&headers)?;

    let mut items = Vec::new();
    for (i, record) in reader.records().enumerate() {
        // 1-based file line, counting the header
        let row = i + 2;
        let record = record.with_context(|| format!("row {row}: malformed CSV record"))?;
        items.push(columns.parse_row(&record, row)?);
    }

    tracing::debug!(rows = items.len(), "knowledge base loaded");
    println!("✅ Loaded {} items from knowledge base", items.len());
    Ok(items)
}

/// Header positions for one CSV file. `tags` and `climate` are optional and
/// default to empty lists when the column is absent.
struct ColumnMap {
    item: usize,
    category: usize,
    destination_type: usize,
    travel_type: usize,
    season: usize,
    quantity: usize,
    reason: usize,
    importance: usize,
    tags: Option<usize>,
    climate: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let position = |name: &'static str| -> Result<usize> {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| Error::MissingColumn(name).into())
        };
        Ok(Self {
            item: position("item")?,
            category: position("category")?,
            destination_type: position("destination_type")?,
            travel_type: position("travel_type")?,
            season: position("season")?,
            quantity: position("quantity")?,
            reason: position("reason")?,
            importance: position("importance")?,
            tags: headers.iter().position(|h| h.trim() == "tags"),
            climate: headers.iter().position(|h| h.trim() == "climate"),
        })
    }

    fn parse_row(&self, record: &csv::StringRecord, row: usize) -> Result<KnowledgeItem> {
        let field = |idx: usize| record.get(idx).unwrap_or("").trim().to_string();

        let raw_quantity = field(self.quantity);
        let quantity: u32 = raw_quantity.parse().map_err(|_| Error::InvalidQuantity {
            row,
            value: raw_quantity.clone(),
        })?;

        Ok(KnowledgeItem {
            item: field(self.item),
            category: field(self.category),
            destination_type: field(self.destination_type),
            travel_type: field(self.travel_type),
            season: split_list(&field(self.season), ','),
            quantity,
            reason: field(self.reason),
            importance: field(self.importance),
            tags: self.tags.map(|i| split_list(&field(i), ';')).unwrap_or_default(),
            climate: self
                .climate
                .map(|i| split_list(&field(i), ';'))
                .unwrap_or_default(),
        })
    }
}

/// Split a multi-valued field, trimming entries and dropping empty ones.
fn split_list(raw: &str, sep: char) -> Vec<String> {
    raw.split(sep)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}
