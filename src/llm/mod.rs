pub mod provider;
pub mod ollama;
pub mod prompts;
pub mod parser;

pub use provider::{ModelProvider, OutputMode};
pub use ollama::OllamaProvider;
pub use prompts::PromptTemplate;
