use crate::error::{Error, Result};
use crate::models::Classification;

/// Parse the model's reply into the typed classification. The reply may wrap
/// the JSON object in markdown fences or surrounding prose; the extracted
/// object itself must match the declared shape exactly.
pub fn parse_classification(response: &str) -> Result<Classification> {
    let json_str = extract_json(response)?;

    let classification: Classification = serde_json::from_str(&json_str)
        .map_err(|e| Error::ParseError(format!("Response does not match expected shape: {}", e)))?;

    if classification.reason.trim().is_empty() {
        return Err(Error::ParseError("Empty 'reason' in response".to_string()));
    }

    Ok(classification)
}

fn extract_json(text: &str) -> Result<String> {
    // Try to find JSON block in markdown code blocks
    if let Some(start) = text.find("```json") {
        let start = start + 7;
        if let Some(end) = text[start..].find("```") {
            return Ok(text[start..start + end].trim().to_string());
        }
    }

    // Try plain code block
    if let Some(start) = text.find("```") {
        let start = start + 3;
        // Skip any language identifier on the same line
        let start = text[start..]
            .find('\n')
            .map(|i| start + i + 1)
            .unwrap_or(start);
        if let Some(end) = text[start..].find("```") {
            let content = text[start..start + end].trim();
            if content.starts_with('{') {
                return Ok(content.to_string());
            }
        }
    }

    // Try to find raw JSON object
    if let Some(start) = text.find('{') {
        let mut depth = 0;
        let mut end = start;
        let mut in_string = false;
        let mut escape_next = false;

        for (i, c) in text[start..].char_indices() {
            if escape_next {
                escape_next = false;
                continue;
            }

            match c {
                '\\' if in_string => escape_next = true,
                '"' => in_string = !in_string,
                '{' if !in_string => depth += 1,
                '}' if !in_string => {
                    depth -= 1;
                    if depth == 0 {
                        end = start + i + 1;
                        break;
                    }
                }
                _ => {}
            }
        }

        if depth == 0 && end > start {
            return Ok(text[start..end].to_string());
        }
    }

    Err(Error::ParseError("No valid JSON found in response".to_string()))
}
