use tracing::{debug, trace};

use crate::decision::PolicyDecision;
use crate::matcher::rule_matches;
use crate::schema::{PhotoContext, PolicyConfig, PolicyRule};

// ---------------------------------------------------------------------------
// Decision orchestrator
// ---------------------------------------------------------------------------

/// Evaluate a photo context against the configured rules.
///
/// The first rule in `rules_ordered` whose conditions hold decides. If none
/// does, the photo is allowed with [`DEFAULT_ALLOW_MESSAGE`](crate::DEFAULT_ALLOW_MESSAGE)
/// and only the base reasons.
pub fn evaluate(ctx: &PhotoContext, config: &PolicyConfig) -> PolicyDecision {
    debug!(?ctx, rules = config.rules_ordered.len(), "evaluating photo context");

    let reasons = base_reasons(ctx);
    match apply_rules(ctx, &config.rules_ordered, &reasons) {
        Some(decision) => decision,
        None => {
            debug!("no rule matched; allowing by default");
            PolicyDecision::allow_default(reasons)
        }
    }
}

/// One descriptive sentence per context field, in a fixed order:
/// identifiability, minors, framing, prominence, channel, consent.
pub fn base_reasons(ctx: &PhotoContext) -> Vec<String> {
    vec![
        if ctx.identifiable {
            "Personen sind erkennbar."
        } else {
            "Personen sind nicht erkennbar."
        }
        .to_string(),
        if ctx.minors {
            "Minderjährige beteiligt."
        } else {
            "Keine Minderjährigen."
        }
        .to_string(),
        if ctx.group_photo {
            "Gruppenfoto."
        } else {
            "Einzelportrait oder kleine Gruppe."
        }
        .to_string(),
        if ctx.prominent_subject {
            "Eine oder wenige Personen sind deutlich hervorgehoben (portraitähnlich)."
        } else {
            "Keine einzelne Person ist deutlich hervorgehoben."
        }
        .to_string(),
        format!("Kanal: {}.", ctx.channel),
        format!("Einwilligung: {}.", ctx.consent_status),
    ]
}

// ---------------------------------------------------------------------------
// Rule engine
// ---------------------------------------------------------------------------

/// Return the decision of the first rule whose conditions hold, or `None`.
///
/// The reasons of the result are `base_reasons` followed by the rule's
/// `extra_reasons`.
pub fn apply_rules(
    ctx: &PhotoContext,
    rules: &[PolicyRule],
    base_reasons: &[String],
) -> Option<PolicyDecision> {
    let (index, rule) = rules
        .iter()
        .enumerate()
        .find(|(_, rule)| rule_matches(ctx, &rule.when))?;

    trace!(index, rule = rule.id.as_deref(), decision = %rule.decision, "rule matched");
    Some(decision_from_rule(rule, base_reasons))
}

fn decision_from_rule(rule: &PolicyRule, base_reasons: &[String]) -> PolicyDecision {
    let mut reasons = Vec::with_capacity(base_reasons.len() + rule.extra_reasons.len());
    reasons.extend_from_slice(base_reasons);
    reasons.extend_from_slice(&rule.extra_reasons);

    PolicyDecision {
        decision: rule.decision,
        message: rule.message.clone(),
        reasons,
        rule_id: rule.id.clone(),
        legal_ref_keys: Some(rule.legal_refs.clone()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
