use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

use crate::schema::{Channel, PolicyConfig};

/// Load a [`PolicyConfig`] from disk.
///
/// Files ending in `.json` are parsed as JSON, everything else as YAML. Only
/// structural problems (unreadable file, bad syntax, a rule without a valid
/// `decision` or `message`) are errors; every lint finding is logged as a
/// warning and the configuration is used as written.
pub fn load_policy(path: impl AsRef<Path>) -> Result<PolicyConfig> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read policy file: {}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let config = if is_json {
        load_policy_from_json(&contents)
    } else {
        load_policy_from_str(&contents)
    }
    .with_context(|| format!("failed to parse policy file: {}", path.display()))?;

    for finding in lint_policy(&config) {
        warn!(path = %path.display(), %finding, "policy lint");
    }
    Ok(config)
}

/// Parse a [`PolicyConfig`] from a YAML string.
pub fn load_policy_from_str(yaml: &str) -> Result<PolicyConfig> {
    serde_yml::from_str(yaml).context("YAML deserialization failed")
}

/// Parse a [`PolicyConfig`] from a JSON string.
pub fn load_policy_from_json(json: &str) -> Result<PolicyConfig> {
    serde_json::from_str(json).context("JSON deserialization failed")
}

/// A non-fatal problem in a policy. Evaluation still works, but the rule
/// probably does not do what its author intended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LintFinding {
    /// A `when` key the matcher does not know; it is ignored.
    UnrecognizedCondition { rule: String, key: String },
    /// A `channel_in` entry no context can ever have.
    UnknownChannel { rule: String, channel: String },
    /// A `legal_refs` key with no catalog entry; it is dropped when resolving.
    MissingLegalRef { rule: String, key: String },
    /// A rule that can never fire because an earlier rule matches everything.
    Unreachable { rule: String, shadowed_by: String },
    /// An `id` that is present but empty, so results cannot be traced back.
    EmptyId { rule: String },
    /// An `id` already carried by an earlier rule.
    DuplicateId {
        rule: String,
        id: String,
        first: String,
    },
}

impl fmt::Display for LintFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintFinding::UnrecognizedCondition { rule, key } => {
                write!(f, "rule {rule}: unrecognized condition '{key}' is ignored")
            }
            LintFinding::UnknownChannel { rule, channel } => {
                write!(
                    f,
                    "rule {rule}: channel_in entry '{channel}' is not a known channel"
                )
            }
            LintFinding::MissingLegalRef { rule, key } => {
                write!(
                    f,
                    "rule {rule}: legal reference '{key}' is not in the catalog"
                )
            }
            LintFinding::Unreachable { rule, shadowed_by } => {
                write!(
                    f,
                    "rule {rule}: unreachable, rule {shadowed_by} matches every photo"
                )
            }
            LintFinding::EmptyId { rule } => write!(f, "rule {rule}: id is empty"),
            LintFinding::DuplicateId { rule, id, first } => {
                write!(f, "rule {rule}: id '{id}' is already used by rule {first}")
            }
        }
    }
}

/// Collect every [`LintFinding`] for `config`, in rule order.
///
/// Rules are labelled `'<id>'`, or `#<index>` when the id is absent or empty.
pub fn lint_policy(config: &PolicyConfig) -> Vec<LintFinding> {
    let mut findings = Vec::new();
    let mut catch_all: Option<String> = None;
    let mut first_with_id: HashMap<&str, usize> = HashMap::new();

    for (index, rule) in config.rules_ordered.iter().enumerate() {
        let label = match rule.id.as_deref() {
            Some(id) if !id.is_empty() => format!("'{id}'"),
            _ => format!("#{index}"),
        };

        match rule.id.as_deref() {
            Some("") => findings.push(LintFinding::EmptyId {
                rule: label.clone(),
            }),
            Some(id) => {
                if let Some(first) = first_with_id.get(id) {
                    findings.push(LintFinding::DuplicateId {
                        rule: format!("#{index}"),
                        id: id.to_string(),
                        first: format!("#{first}"),
                    });
                } else {
                    first_with_id.insert(id, index);
                }
            }
            None => {}
        }

        if let Some(shadowed_by) = &catch_all {
            findings.push(LintFinding::Unreachable {
                rule: label.clone(),
                shadowed_by: shadowed_by.clone(),
            });
        }

        for key in rule.when.unrecognized.keys() {
            findings.push(LintFinding::UnrecognizedCondition {
                rule: label.clone(),
                key: key.clone(),
            });
        }

        for channel in rule.when.channel_in.iter().flatten() {
            if !Channel::ALL.iter().any(|c| c.as_str() == channel.as_str()) {
                findings.push(LintFinding::UnknownChannel {
                    rule: label.clone(),
                    channel: channel.clone(),
                });
            }
        }

        for key in &rule.legal_refs {
            if !config.legal_ref_catalog.contains_key(key) {
                findings.push(LintFinding::MissingLegalRef {
                    rule: label.clone(),
                    key: key.clone(),
                });
            }
        }

        if catch_all.is_none() && rule.when.is_empty() {
            catch_all = Some(label);
        }
    }

    findings
}
