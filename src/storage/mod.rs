use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::Result;

pub const FAIL_LOG: &str = "failures.log";

/// Artifacts persisted for one model invocation, matching the folder layout
/// the review tooling downstream reads back.
pub struct RunArtifacts<'a> {
    /// Raw model output, written as result.json.
    pub result: &'a str,
    /// Prompt after substitution, written as prompt_used.txt.
    pub prompt_used: &'a str,
    /// The input text, written under `input_filename`.
    pub input: &'a str,
    /// File name for the input copy (input.txt for batch rows, abstract.txt
    /// for single-shot runs).
    pub input_filename: &'a str,
    /// Original template text, written as prompt_template.txt.
    pub template: &'a str,
}

/// Filesystem store: one folder per model invocation under a root output
/// directory, plus an append-only failure log at the root.
pub struct RunStore {
    root: PathBuf,
}

impl RunStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Folder name for a single-shot run: run_{timestamp}.
    pub fn timestamped_run_name() -> String {
        format!("run_{}", Local::now().format("%Y%m%d_%H%M%S"))
    }

    /// Folder name for a batch row without a naming column: run_{timestamp}_{row}.
    pub fn row_run_name(row: u64) -> String {
        format!("run_{}_{}", Local::now().format("%Y%m%d_%H%M%S"), row)
    }

    pub fn save_run(&self, dir_name: &str, artifacts: &RunArtifacts<'_>) -> Result<PathBuf> {
        let run_dir = self.root.join(sanitize_name(dir_name));
        fs::create_dir_all(&run_dir)?;

        fs::write(run_dir.join("result.json"), artifacts.result)?;
        fs::write(run_dir.join("prompt_used.txt"), artifacts.prompt_used)?;
        fs::write(run_dir.join(artifacts.input_filename), artifacts.input)?;
        fs::write(run_dir.join("prompt_template.txt"), artifacts.template)?;

        Ok(run_dir)
    }

    /// Append one line to failures.log under the output root.
    pub fn record_failure(&self, name: &str, message: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.root.join(FAIL_LOG))?;
        writeln!(file, "{} | {}", name, message)?;
        Ok(())
    }
}

/// Replace anything outside [A-Za-z0-9._-] so CSV-derived values cannot
/// escape the output directory or produce unusable folder names.
pub fn sanitize_name(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn sanitize_replaces_path_separators() {
        assert_eq!(sanitize_name("../etc/passwd"), ".._etc_passwd");
        assert_eq!(sanitize_name("paper (2021).pdf"), "paper__2021_.pdf");
        assert_eq!(sanitize_name("  spaced name  "), "spaced_name");
    }

    #[test]
    fn save_run_writes_all_artifacts() {
        let dir = tempdir().unwrap();
        let store = RunStore::new(dir.path().join("results")).unwrap();

        let run_dir = store
            .save_run(
                "paper_001",
                &RunArtifacts {
                    result: r#"{"pyrolysis_related":"YES","reason":"ok"}"#,
                    prompt_used: "filled prompt",
                    input: "abstract text",
                    input_filename: "input.txt",
                    template: "template <<<ABSTRACT>>>",
                },
            )
            .unwrap();

        assert!(run_dir.join("result.json").exists());
        assert!(run_dir.join("prompt_used.txt").exists());
        assert!(run_dir.join("input.txt").exists());
        assert!(run_dir.join("prompt_template.txt").exists());
        assert_eq!(
            std::fs::read_to_string(run_dir.join("input.txt")).unwrap(),
            "abstract text"
        );
    }

    #[test]
    fn record_failure_appends_lines() {
        let dir = tempdir().unwrap();
        let store = RunStore::new(dir.path()).unwrap();

        store.record_failure("row_3", "timeout").unwrap();
        store.record_failure("row_7", "empty response").unwrap();

        let log = std::fs::read_to_string(dir.path().join(FAIL_LOG)).unwrap();
        assert_eq!(log.lines().count(), 2);
        assert!(log.contains("row_3 | timeout"));
    }
}
