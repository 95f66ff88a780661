use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Model runner error: {0}")]
    ModelApi(String),

    #[error("Failed to parse model response: {0}")]
    ParseError(String),

    #[error("Column '{0}' not found in CSV header")]
    MissingColumn(String),

    #[error("Prompt template error: {0}")]
    Template(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
