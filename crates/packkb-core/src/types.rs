//! Domain types shared by the loader, embedder and writer.

use serde::{Deserialize, Serialize};

pub type PointId = String;

/// One packing-list entry from the knowledge base.
///
/// - `item`: display name ("Passport")
/// - `category`: flat grouping ("documents", "clothing", ...)
/// - `destination_type`/`travel_type`: trip facets used for filtering
/// - `season`: seasons the item applies to (comma-delimited in the source)
/// - `quantity`: suggested count to pack
/// - `importance`: critical/high/medium/low by convention, not validated
/// - `tags`/`climate`: filter lists (semicolon-delimited in the source)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeItem {
    pub item: String,
    pub category: String,
    pub destination_type: String,
    pub travel_type: String,
    pub season: Vec<String>,
    pub quantity: u32,
    pub reason: String,
    pub importance: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub climate: Vec<String>,
}

impl KnowledgeItem {
    /// Text representation sent to the embedding model.
    ///
    /// Field order and separators are fixed: the same item must produce the
    /// same bytes on every run, or vectors stop being reproducible.
    pub fn embedding_text(&self) -> String {
        format!(
            "Item: {}\nCategory: {}\nTravel Type: {}\nDestination: {}\nSeason: {}\nReason: {}\nTags: {}\nClimate: {}\nImportance: {}",
            self.item,
            self.category,
            self.travel_type,
            self.destination_type,
            self.season.join(", "),
            self.reason,
            self.tags.join(", "),
            self.climate.join(", "),
            self.importance,
        )
    }
}

/// One vector-database point ready for import.
///
/// `id` is minted fresh each run and carries no meaning beyond uniqueness.
/// `payload` is the originating item verbatim, for query-time filtering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingPoint {
    pub id: PointId,
    pub vector: Vec<f32>,
    pub payload: KnowledgeItem,
}

/// Run summary recorded next to the points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub total_items: usize,
    pub embedding_model: String,
    pub dimensions: usize,
    pub generated_at: String,
}

/// Shape of the emitted JSON import file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportFile {
    pub points: Vec<EmbeddingPoint>,
    pub metadata: ExportMetadata,
}
