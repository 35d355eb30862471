use serde::{Deserialize, Serialize};

/// Strict two-value exploitability verdict. Any other oracle output is a
/// parse failure, not a third state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Exploitable {
    Yes,
    No,
}

impl Exploitable {
    pub fn is_exploitable(&self) -> bool {
        matches!(self, Exploitable::Yes)
    }
}

/// Classification of one probe execution, produced by the outcome
/// analyzer and consumed exactly once by the decision router.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decision {
    pub exploitable: Exploitable,
    pub reason: String,
}

impl Decision {
    /// The documented fallback for an unparsable analyzer reply: never
    /// ticket on ambiguity, log instead, keeping the raw reply visible.
    pub fn unparsed(raw_reply: &str) -> Self {
        Self {
            exploitable: Exploitable::No,
            reason: format!("unparsed: {}", raw_reply),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exploitable_parses_yes_no_only() {
        let yes: Exploitable = serde_json::from_str("\"yes\"").unwrap();
        let no: Exploitable = serde_json::from_str("\"no\"").unwrap();
        assert!(yes.is_exploitable());
        assert!(!no.is_exploitable());
        assert!(serde_json::from_str::<Exploitable>("\"maybe\"").is_err());
    }

    #[test]
    fn test_decision_from_json_reply() {
        let d: Decision =
            serde_json::from_str(r#"{"exploitable": "yes", "reason": "sentinel found"}"#).unwrap();
        assert_eq!(d.exploitable, Exploitable::Yes);
        assert_eq!(d.reason, "sentinel found");
    }

    #[test]
    fn test_unparsed_default_is_not_exploitable() {
        let d = Decision::unparsed("garbage reply");
        assert_eq!(d.exploitable, Exploitable::No);
        assert!(d.reason.contains("garbage reply"));
    }
}
