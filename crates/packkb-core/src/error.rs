use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("OPENAI_API_KEY environment variable not set")]
    MissingCredential,

    #[error("knowledge base not found: {0}")]
    KnowledgeBaseNotFound(String),

    #[error("missing required column: {0}")]
    MissingColumn(&'static str),

    #[error("row {row}: invalid quantity {value:?}")]
    InvalidQuantity { row: usize, value: String },
}

pub type Result<T> = std::result::Result<T, Error>;
