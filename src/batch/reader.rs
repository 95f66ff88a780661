use std::fs::File;
use std::path::Path;

use crate::error::{Error, Result};

/// Which CSV columns drive the run. The text column is the fallback; when a
/// title/abstract pair is configured it takes precedence and both columns
/// must exist.
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    pub text_col: String,
    pub title_col: Option<String>,
    pub abstract_col: Option<String>,
    pub name_col: Option<String>,
}

impl Default for ColumnSpec {
    fn default() -> Self {
        Self {
            text_col: "QWEN_INPUT".to_string(),
            title_col: None,
            abstract_col: None,
            name_col: None,
        }
    }
}

/// One unit of work for the batch runner.
#[derive(Debug, Clone)]
pub struct InputRow {
    pub index: u64,
    /// Value of the naming column, if one was configured.
    pub name: Option<String>,
    pub text: String,
}

#[derive(Debug)]
enum TextSource {
    Single(usize),
    TitleAbstract { title: usize, abstract_: usize },
}

/// CSV input with columns resolved up front, so a missing column fails the
/// run before any model call.
#[derive(Debug)]
pub struct CsvSource {
    reader: csv::Reader<File>,
    source: TextSource,
    name_idx: Option<usize>,
}

impl CsvSource {
    pub fn open<P: AsRef<Path>>(path: P, spec: &ColumnSpec) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = csv::Reader::from_path(path)?;
        let headers = reader.headers()?.clone();

        let find = |name: &str| -> Result<usize> {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| Error::MissingColumn(name.to_string()))
        };

        let source = match (&spec.title_col, &spec.abstract_col) {
            (Some(title_col), Some(abstract_col)) => {
                tracing::info!(
                    "Using title/abstract columns: '{}' + '{}'",
                    title_col,
                    abstract_col
                );
                TextSource::TitleAbstract {
                    title: find(title_col)?,
                    abstract_: find(abstract_col)?,
                }
            }
            _ => {
                tracing::info!("Using text column: '{}'", spec.text_col);
                TextSource::Single(find(&spec.text_col)?)
            }
        };

        let name_idx = match &spec.name_col {
            Some(name_col) => Some(find(name_col)?),
            None => None,
        };

        tracing::info!("Loaded CSV: {}", path.display());

        Ok(Self {
            reader,
            source,
            name_idx,
        })
    }

    /// Read at most `limit` rows (all rows when None).
    pub fn read_rows(mut self, limit: Option<usize>) -> Result<Vec<InputRow>> {
        let mut rows = Vec::new();

        for (index, record) in self.reader.records().enumerate() {
            if let Some(limit) = limit {
                if rows.len() >= limit {
                    break;
                }
            }

            let record = record?;
            let field = |idx: usize| record.get(idx).unwrap_or("").trim().to_string();

            let text = match &self.source {
                TextSource::Single(idx) => field(*idx),
                TextSource::TitleAbstract { title, abstract_ } => {
                    format!(
                        "Title: {}\nAbstract: {}",
                        field(*title),
                        field(*abstract_)
                    )
                }
            };

            rows.push(InputRow {
                index: index as u64,
                name: self.name_idx.map(&field),
                text,
            });
        }

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn reads_text_column() {
        let file = write_csv("source_file,QWEN_INPUT\na.pdf,first text\nb.pdf,second text\n");
        let source = CsvSource::open(file.path(), &ColumnSpec::default()).unwrap();
        let rows = source.read_rows(None).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].text, "first text");
        assert_eq!(rows[1].index, 1);
    }

    #[test]
    fn missing_column_fails_before_reading_rows() {
        let file = write_csv("other,cols\n1,2\n");
        let err = CsvSource::open(file.path(), &ColumnSpec::default()).unwrap_err();
        match err {
            Error::MissingColumn(col) => assert_eq!(col, "QWEN_INPUT"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn limit_truncates_rows() {
        let file = write_csv("QWEN_INPUT\na\nb\nc\nd\n");
        let spec = ColumnSpec::default();

        let rows = CsvSource::open(file.path(), &spec)
            .unwrap()
            .read_rows(Some(2))
            .unwrap();
        assert_eq!(rows.len(), 2);

        // Limits beyond the row count read everything
        let rows = CsvSource::open(file.path(), &spec)
            .unwrap()
            .read_rows(Some(100))
            .unwrap();
        assert_eq!(rows.len(), 4);
    }

    #[test]
    fn title_abstract_pair_composes_text() {
        let file = write_csv("title,abstract,QWEN_INPUT\nPyrolysis of PP,Study of cracking,ignored\n");
        let spec = ColumnSpec {
            title_col: Some("title".to_string()),
            abstract_col: Some("abstract".to_string()),
            ..Default::default()
        };

        let rows = CsvSource::open(file.path(), &spec)
            .unwrap()
            .read_rows(None)
            .unwrap();
        assert_eq!(rows[0].text, "Title: Pyrolysis of PP\nAbstract: Study of cracking");
    }

    #[test]
    fn name_column_is_captured() {
        let file = write_csv("source_file,QWEN_INPUT\npaper one.pdf,text\n");
        let spec = ColumnSpec {
            name_col: Some("source_file".to_string()),
            ..Default::default()
        };

        let rows = CsvSource::open(file.path(), &spec)
            .unwrap()
            .read_rows(None)
            .unwrap();
        assert_eq!(rows[0].name.as_deref(), Some("paper one.pdf"));
    }
}
