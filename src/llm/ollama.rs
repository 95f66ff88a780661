use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::llm::provider::{ModelProvider, OutputMode};

pub struct OllamaProvider {
    client: Client,
    base_url: String,
}

#[derive(Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<String>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
    #[serde(default)]
    error: Option<String>,
}

impl OllamaProvider {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ModelProvider for OllamaProvider {
    async fn generate(&self, model: &str, prompt: &str, mode: OutputMode) -> Result<String> {
        tracing::debug!("Sending {} chars to Ollama model {}", prompt.len(), model);

        let request_body = GenerateRequest {
            model: model.to_string(),
            prompt: prompt.to_string(),
            stream: false,
            format: match mode {
                OutputMode::Json => Some("json".to_string()),
                OutputMode::Text => None,
            },
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::ModelApi(format!(
                "Ollama API error ({}): {}",
                status, body
            )));
        }

        let result: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::ModelApi(format!("Failed to parse Ollama response: {}", e)))?;

        if let Some(error) = result.error {
            return Err(Error::ModelApi(error));
        }

        let text = result.response.trim().to_string();
        if text.is_empty() {
            return Err(Error::ModelApi("Empty response from Ollama".to_string()));
        }

        Ok(text)
    }

    fn name(&self) -> &str {
        "Ollama"
    }
}
