use std::path::Path;
use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};

use crate::batch::reader::{ColumnSpec, CsvSource, InputRow};
use crate::error::Result;
use crate::llm::parser::parse_classification;
use crate::llm::{ModelProvider, OutputMode, PromptTemplate};
use crate::models::BatchReport;
use crate::storage::{RunArtifacts, RunStore};

pub struct BatchRunner {
    provider: Arc<dyn ModelProvider>,
    template: PromptTemplate,
    store: RunStore,
    model: String,
}

impl BatchRunner {
    pub fn new(
        provider: impl ModelProvider + 'static,
        template: PromptTemplate,
        store: RunStore,
        model: String,
    ) -> Self {
        Self {
            provider: Arc::new(provider),
            template,
            store,
            model,
        }
    }

    /// Process min(limit, row_count) rows sequentially. Column resolution
    /// happens before the first model call; a per-row model failure is
    /// recorded and skipped without stopping the batch.
    pub async fn run<P: AsRef<Path>>(
        &self,
        csv_path: P,
        spec: &ColumnSpec,
        limit: Option<usize>,
    ) -> Result<BatchReport> {
        let source = CsvSource::open(csv_path, spec)?;
        let rows = source.read_rows(limit)?;
        tracing::info!("Processing {} rows with model {}", rows.len(), self.model);

        let pb = ProgressBar::new(rows.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} rows")
                .unwrap()
                .progress_chars("#>-"),
        );

        let mut report = BatchReport::default();

        for row in &rows {
            self.process_row(row, &mut report).await;
            pb.inc(1);
        }

        pb.finish_with_message("Batch complete");
        tracing::info!(
            "Batch done: {} processed, {} succeeded, {} failed",
            report.rows_processed,
            report.rows_succeeded,
            report.rows_failed()
        );

        Ok(report)
    }

    async fn process_row(&self, row: &InputRow, report: &mut BatchReport) {
        let display_name = row
            .name
            .clone()
            .unwrap_or_else(|| format!("row_{}", row.index));

        let prompt = self.template.fill(&row.text);

        let result = match self
            .provider
            .generate(&self.model, &prompt, OutputMode::Json)
            .await
        {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!("[Row {}] model call failed: {}", row.index, e);
                if let Err(log_err) = self.store.record_failure(&display_name, &e.to_string()) {
                    tracing::error!("Cannot write failure log: {}", log_err);
                }
                report.record_failure(row.index, &display_name, e.to_string());
                return;
            }
        };

        let dir_name = match &row.name {
            Some(name) => name.clone(),
            None => RunStore::row_run_name(row.index),
        };

        let saved = self.store.save_run(
            &dir_name,
            &RunArtifacts {
                result: &result,
                prompt_used: &prompt,
                input: &row.text,
                input_filename: "input.txt",
                template: self.template.source_text(),
            },
        );

        match saved {
            Ok(run_dir) => {
                tracing::info!("[Row {}] OK -> {}", row.index, run_dir.display());
                report.record_success();

                // Shape sanity check on the raw output; a miss goes to the
                // failure log for later review but the artifact stands.
                if let Err(e) = parse_classification(&result) {
                    tracing::warn!("[Row {}] shape check failed: {}", row.index, e);
                    let _ = self
                        .store
                        .record_failure(&display_name, &format!("shape check: {}", e));
                }
            }
            Err(e) => {
                tracing::warn!("[Row {}] failed to save artifacts: {}", row.index, e);
                let _ = self.store.record_failure(&display_name, &e.to_string());
                report.record_failure(row.index, &display_name, e.to_string());
            }
        }
    }
}
