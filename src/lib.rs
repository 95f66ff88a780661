pub mod config;
pub mod error;
pub mod models;
pub mod llm;
pub mod batch;
pub mod classify;
pub mod storage;

pub use config::Config;
pub use error::{Error, Result};
pub use llm::{ModelProvider, OllamaProvider, PromptTemplate};
pub use batch::{BatchRunner, ColumnSpec};
pub use classify::Classifier;
pub use storage::RunStore;
