use std::path::PathBuf;
use std::sync::Arc;

use crate::error::Result;
use crate::llm::parser::parse_classification;
use crate::llm::{ModelProvider, OutputMode, PromptTemplate};
use crate::models::Classification;
use crate::storage::{RunArtifacts, RunStore};

pub struct ClassifyOutcome {
    pub classification: Classification,
    pub run_dir: PathBuf,
}

/// Single-shot classifier: one abstract in, one typed verdict out. A response
/// that does not parse as the declared shape is a hard error, never a
/// partially-filled result.
pub struct Classifier {
    provider: Arc<dyn ModelProvider>,
    template: PromptTemplate,
    model: String,
}

impl Classifier {
    pub fn new(
        provider: impl ModelProvider + 'static,
        template: PromptTemplate,
        model: String,
    ) -> Self {
        Self {
            provider: Arc::new(provider),
            template,
            model,
        }
    }

    pub async fn classify(&self, abstract_text: &str) -> Result<Classification> {
        let (classification, _raw) = self.run_model(abstract_text).await?;
        Ok(classification)
    }

    /// Classify and persist the run artifacts into a timestamped folder under
    /// the store root.
    pub async fn classify_and_save(
        &self,
        abstract_text: &str,
        store: &RunStore,
    ) -> Result<ClassifyOutcome> {
        let (classification, raw) = self.run_model(abstract_text).await?;

        let run_dir = store.save_run(
            &RunStore::timestamped_run_name(),
            &RunArtifacts {
                result: &raw,
                prompt_used: &self.template.fill(abstract_text),
                input: abstract_text,
                input_filename: "abstract.txt",
                template: self.template.source_text(),
            },
        )?;
        tracing::info!("All artifacts saved in folder: {}", run_dir.display());

        Ok(ClassifyOutcome {
            classification,
            run_dir,
        })
    }

    async fn run_model(&self, abstract_text: &str) -> Result<(Classification, String)> {
        let prompt = self.template.fill(abstract_text);
        tracing::info!("Running model {}", self.model);

        let raw = self
            .provider
            .generate(&self.model, &prompt, OutputMode::Json)
            .await?;

        let classification = parse_classification(&raw)?;
        tracing::info!(
            "Verdict: {} ({})",
            classification.pyrolysis_related,
            classification.reason
        );

        Ok((classification, raw))
    }
}
