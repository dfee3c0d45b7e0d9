use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};

/// Top-level policy configuration, usually loaded from `config.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Rules consulted in list order; the first match decides.
    #[serde(default)]
    pub rules_ordered: Vec<PolicyRule>,
    /// Citation lookup table keyed by the names rules use in `legal_refs`.
    #[serde(default)]
    pub legal_ref_catalog: BTreeMap<String, LegalRef>,
    /// Optional logo shown in the HTML report, relative to the config file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_path: Option<PathBuf>,
}

/// A single configured precondition/outcome pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyRule {
    /// Optional identifier, reported back for traceability.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Conditions that must all hold for the rule to fire.
    #[serde(default)]
    pub when: RuleConditions,
    pub decision: Decision,
    pub message: String,
    /// Appended after the base reasons when the rule fires.
    #[serde(default)]
    pub extra_reasons: Vec<String>,
    /// Keys into [`PolicyConfig::legal_ref_catalog`].
    #[serde(default)]
    pub legal_refs: Vec<String>,
}

/// The `when` clause of a rule: a conjunction of equality checks.
///
/// Every field is optional and an absent field means "don't care". Values of
/// the wrong shape (for instance `minors: "yes"`) are read as absent rather
/// than rejected, and keys that are not recognized end up in
/// [`unrecognized`](Self::unrecognized) where the loader can lint them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleConditions {
    #[serde(
        default,
        deserialize_with = "lenient_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub minors: Option<bool>,
    #[serde(
        default,
        deserialize_with = "lenient_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub identifiable: Option<bool>,
    #[serde(
        default,
        deserialize_with = "lenient_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub group_photo: Option<bool>,
    #[serde(
        default,
        deserialize_with = "lenient_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub prominent_subject: Option<bool>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub consent_status: Option<String>,
    /// Membership test on the context channel.
    #[serde(
        default,
        deserialize_with = "lenient_strings",
        skip_serializing_if = "Option::is_none"
    )]
    pub channel_in: Option<Vec<String>>,
    #[serde(flatten)]
    pub unrecognized: BTreeMap<String, serde_json::Value>,
}

impl RuleConditions {
    /// Number of conditions this clause actually checks.
    pub fn len(&self) -> usize {
        [
            self.minors.is_some(),
            self.identifiable.is_some(),
            self.group_photo.is_some(),
            self.prominent_subject.is_some(),
            self.consent_status.is_some(),
            self.channel_in.is_some(),
        ]
        .into_iter()
        .filter(|set| *set)
        .count()
    }

    /// True when the clause matches every context.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The three-way publication verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Allowed,
    Limited,
    NotAllowed,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Allowed => "ALLOWED",
            Decision::Limited => "LIMITED",
            Decision::NotAllowed => "NOT_ALLOWED",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A citation shown next to a decision.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalRef {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub url: String,
}

/// Where the photo is going to be published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Website,
    Social,
    Print,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Website, Channel::Social, Channel::Print];

    /// The value used in configuration files and reasons.
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Website => "website",
            Channel::Social => "social",
            Channel::Print => "print",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How much of the pictured people's consent is on record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsentStatus {
    /// Everyone pictured has consented.
    #[serde(rename = "alle")]
    Full,
    #[serde(rename = "teilweise")]
    Partial,
    #[serde(rename = "unbekannt")]
    Unknown,
}

impl ConsentStatus {
    pub const ALL: [ConsentStatus; 3] = [
        ConsentStatus::Full,
        ConsentStatus::Partial,
        ConsentStatus::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConsentStatus::Full => "alle",
            ConsentStatus::Partial => "teilweise",
            ConsentStatus::Unknown => "unbekannt",
        }
    }
}

impl fmt::Display for ConsentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The facts about a photo and its intended use that every decision is based on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoContext {
    pub minors: bool,
    pub identifiable: bool,
    pub group_photo: bool,
    /// One or a few people are centered, large or portrait-like.
    pub prominent_subject: bool,
    pub channel: Channel,
    pub consent_status: ConsentStatus,
}

#[cfg(test)]
impl PhotoContext {
    /// Every context in the domain, 144 in total.
    pub(crate) fn all() -> Vec<PhotoContext> {
        let mut out = Vec::new();
        for bits in 0u8..16 {
            for channel in Channel::ALL {
                for consent_status in ConsentStatus::ALL {
                    out.push(PhotoContext {
                        minors: bits & 1 != 0,
                        identifiable: bits & 2 != 0,
                        group_photo: bits & 4 != 0,
                        prominent_subject: bits & 8 != 0,
                        channel,
                        consent_status,
                    });
                }
            }
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Lenient field readers used by `RuleConditions`
// ---------------------------------------------------------------------------

fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_bool()))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_str().map(str::to_string)))
}

fn lenient_strings<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::Array(items) => Some(
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
        ),
        _ => None,
    }))
}
