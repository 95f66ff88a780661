use std::env;

use crate::error::{Error, Result};

pub const DEFAULT_MODEL: &str = "qwen3:30b-a3b-instruct-2507-q4_K_M";

#[derive(Debug, Clone)]
pub struct Config {
    pub ollama_host: String,
    pub model: String,
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let ollama_host = env::var("OLLAMA_HOST")
            .unwrap_or_else(|_| "http://localhost:11434".to_string());

        let model = env::var("PYROSIFT_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let request_timeout_secs = match env::var("PYROSIFT_TIMEOUT_SECS") {
            Ok(value) => value.parse().map_err(|_| {
                Error::Config(format!(
                    "PYROSIFT_TIMEOUT_SECS must be a number of seconds, got '{}'",
                    value
                ))
            })?,
            Err(_) => 300,
        };

        Ok(Self {
            ollama_host,
            model,
            request_timeout_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_env() {
        std::env::remove_var("OLLAMA_HOST");
        std::env::remove_var("PYROSIFT_MODEL");
        std::env::remove_var("PYROSIFT_TIMEOUT_SECS");

        let config = Config::from_env().unwrap();
        assert_eq!(config.ollama_host, "http://localhost:11434");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.request_timeout_secs, 300);
    }
}
