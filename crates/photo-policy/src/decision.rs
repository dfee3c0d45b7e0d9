use serde::Serialize;

use crate::schema::Decision;

/// Message used when no configured rule applies.
pub const DEFAULT_ALLOW_MESSAGE: &str = "🟢 ERLAUBT: Keine Regel greift restriktiv.";

/// The outcome of evaluating a photo context against the loaded policy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyDecision {
    pub decision: Decision,
    /// Human-readable summary, taken from the matching rule.
    pub message: String,
    /// Base reasons describing the context, followed by rule-specific ones.
    pub reasons: Vec<String>,
    /// Id of the rule that matched, if any.
    pub rule_id: Option<String>,
    /// Catalog keys declared by the matching rule; `None` for the default.
    pub legal_ref_keys: Option<Vec<String>>,
}

impl PolicyDecision {
    /// Permissive decision used when no rule matched.
    pub fn allow_default(reasons: Vec<String>) -> Self {
        Self {
            decision: Decision::Allowed,
            message: DEFAULT_ALLOW_MESSAGE.to_string(),
            reasons,
            rule_id: None,
            legal_ref_keys: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_default_has_correct_fields() {
        let d = PolicyDecision::allow_default(vec!["Gruppenfoto.".to_string()]);
        assert_eq!(d.decision, Decision::Allowed);
        assert_eq!(d.message, DEFAULT_ALLOW_MESSAGE);
        assert_eq!(d.reasons, vec!["Gruppenfoto."]);
        assert!(d.rule_id.is_none());
        assert!(d.legal_ref_keys.is_none());
    }

    #[test]
    fn serializes_with_wire_decision() {
        let d = PolicyDecision::allow_default(Vec::new());
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["decision"], "ALLOWED");
        assert!(json["rule_id"].is_null());
    }
}
