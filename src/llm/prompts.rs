use std::path::Path;

use crate::error::{Error, Result};

/// Substitution marker the original prompt files use.
pub const ABSTRACT_MARKER: &str = "<<<ABSTRACT>>>";

/// Built-in classification prompt, used when no template file is supplied.
pub const CLASSIFY_PROMPT: &str = r#"You are a research assistant screening scientific abstracts for a review on plastic pyrolysis.

Read the abstract below and decide whether the paper is about pyrolysis of plastics (thermal or catalytic decomposition of plastic/polymer feedstock). Papers about pyrolysis of biomass, coal, or tires WITHOUT any plastic feedstock are NOT related.

You must respond with valid JSON matching this exact schema, and nothing else:
{
    "pyrolysis_related": "YES or NO",
    "reason": "one short sentence justifying the verdict"
}

Abstract:
<<<ABSTRACT>>>
"#;

/// Sample abstract used by the single-shot classifier when no input file is
/// given. A correctly working model must label it YES.
pub const SAMPLE_ABSTRACT: &str = "Catalytic pyrolysis of waste polypropylene and high-density polyethylene was \
carried out in a fixed-bed reactor over HZSM-5 and USY zeolite catalysts at \
450-600 \u{00b0}C. The influence of catalyst acidity and pore structure on the yield \
and composition of the pyrolysis oil was investigated. HZSM-5 favored the \
formation of light aromatics, raising the gasoline-range fraction of the \
liquid product to 78 wt%, while USY promoted heavier alkylaromatics. The \
results indicate that zeolite-catalyzed pyrolysis is a viable route for the \
chemical recycling of mixed polyolefin waste into fuel-range hydrocarbons.";

/// A prompt template with one substitution point for the row text.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    text: String,
}

impl PromptTemplate {
    /// Build a template from raw text. A missing marker is not fatal: it is
    /// appended at the end with a warning, matching how the batch scripts have
    /// always treated handwritten prompt files.
    pub fn new(text: &str) -> Self {
        let text = if text.contains(ABSTRACT_MARKER) {
            text.to_string()
        } else {
            tracing::warn!(
                "Prompt missing {} placeholder, appending it at the bottom",
                ABSTRACT_MARKER
            );
            format!("{}\n\n{}", text.trim_end(), ABSTRACT_MARKER)
        };

        Self { text }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::Template(format!("Cannot read prompt file {}: {}", path.display(), e))
        })?;

        tracing::info!("Loaded prompt template: {}", path.display());
        Ok(Self::new(&text))
    }

    pub fn classify_default() -> Self {
        Self::new(CLASSIFY_PROMPT)
    }

    /// Substitute the abstract text into the template.
    pub fn fill(&self, abstract_text: &str) -> String {
        self.text.replace(ABSTRACT_MARKER, abstract_text.trim())
    }

    pub fn source_text(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_substitutes_marker() {
        let template = PromptTemplate::new("Classify this:\n<<<ABSTRACT>>>\nAnswer as JSON.");
        let filled = template.fill("Pyrolysis of PP at 600 C.");
        assert!(filled.contains("Pyrolysis of PP at 600 C."));
        assert!(!filled.contains(ABSTRACT_MARKER));
    }

    #[test]
    fn missing_marker_is_appended() {
        let template = PromptTemplate::new("Classify the following abstract.");
        assert!(template.source_text().ends_with(ABSTRACT_MARKER));
        let filled = template.fill("some text");
        assert!(filled.ends_with("some text"));
    }

    #[test]
    fn default_prompt_has_marker_and_schema() {
        let template = PromptTemplate::classify_default();
        assert!(template.source_text().contains(ABSTRACT_MARKER));
        assert!(template.source_text().contains("pyrolysis_related"));
    }

    #[test]
    fn fill_trims_input_text() {
        let template = PromptTemplate::new("<<<ABSTRACT>>>");
        assert_eq!(template.fill("  padded  \n"), "padded");
    }
}
