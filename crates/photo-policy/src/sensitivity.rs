//! Advisory risk scoring, independent of the rule engine.
//!
//! The tier may disagree with the configured decision; it is shown next to
//! it and never overrides it.

use std::fmt;

use serde::Serialize;

use crate::schema::{Channel, ConsentStatus, PhotoContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SensitivityTier {
    Low,
    Medium,
    High,
}

impl SensitivityTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            SensitivityTier::Low => "LOW",
            SensitivityTier::Medium => "MEDIUM",
            SensitivityTier::High => "HIGH",
        }
    }
}

impl fmt::Display for SensitivityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tier together with the sentence explaining it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Sensitivity {
    pub tier: SensitivityTier,
    pub message: &'static str,
}

impl Sensitivity {
    const fn new(tier: SensitivityTier, message: &'static str) -> Self {
        Self { tier, message }
    }
}

/// Score how sensitive publishing this photo is.
///
/// Branches are tried top to bottom and the first that applies wins. Missing
/// consent outranks everything, and minors outrank the channel and framing
/// factors.
pub fn calculate_sensitivity(ctx: &PhotoContext) -> Sensitivity {
    use SensitivityTier::{High, Low, Medium};

    if ctx.consent_status != ConsentStatus::Full {
        return Sensitivity::new(
            High,
            "🔶 Hohe Sensibilität – Einwilligung ist nicht vollständig geklärt.",
        );
    }

    if ctx.prominent_subject && ctx.identifiable {
        if ctx.minors {
            return Sensitivity::new(
                High,
                "🔶 Hohe Sensibilität – hervorgehobene minderjährige Person.",
            );
        }
        return Sensitivity::new(
            Medium,
            "🟡 Erhöhte Sensibilität – hervorgehobene Person (portraitähnlich).",
        );
    }

    let social = ctx.channel == Channel::Social;

    if ctx.minors && social {
        return Sensitivity::new(
            High,
            "🔶 Hohe Sensibilität – Minderjährige in sozialen Medien.",
        );
    }
    if ctx.minors && !ctx.group_photo {
        return Sensitivity::new(
            High,
            "🔶 Hohe Sensibilität – Einzelportrait Minderjähriger.",
        );
    }
    if ctx.minors {
        return Sensitivity::new(Medium, "🟡 Erhöhte Sensibilität – Minderjährige beteiligt.");
    }
    if social {
        return Sensitivity::new(
            Medium,
            "🟡 Erhöhte Sensibilität – Veröffentlichung in sozialen Medien.",
        );
    }
    if !ctx.group_photo {
        return Sensitivity::new(Medium, "🟡 Erhöhte Sensibilität – Einzelportrait.");
    }

    Sensitivity::new(Low, "🟢 Niedrige Sensibilität.")
}
