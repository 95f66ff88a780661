use serde::{Deserialize, Serialize};

/// YES/NO label the classification prompt asks the model for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Verdict {
    #[serde(rename = "YES")]
    Yes,
    #[serde(rename = "NO")]
    No,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Yes => write!(f, "YES"),
            Verdict::No => write!(f, "NO"),
        }
    }
}

/// Typed result of the classification prompt. Exactly these two fields;
/// anything else the model sends back is a parse failure, not a pass-through.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Classification {
    pub pyrolysis_related: Verdict,
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_exact_shape() {
        let c: Classification = serde_json::from_str(
            r#"{"pyrolysis_related": "YES", "reason": "Reports catalytic pyrolysis of PP."}"#,
        )
        .unwrap();
        assert_eq!(c.pyrolysis_related, Verdict::Yes);
        assert!(!c.reason.is_empty());
    }

    #[test]
    fn rejects_unknown_fields() {
        let result = serde_json::from_str::<Classification>(
            r#"{"pyrolysis_related": "NO", "reason": "x", "confidence": 0.9}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn rejects_bad_verdict() {
        let result = serde_json::from_str::<Classification>(
            r#"{"pyrolysis_related": "MAYBE", "reason": "x"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn verdict_display_round_trips() {
        assert_eq!(Verdict::Yes.to_string(), "YES");
        assert_eq!(Verdict::No.to_string(), "NO");
    }
}
