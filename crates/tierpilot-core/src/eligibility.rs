//! Per-tier eligibility verdicts.

use serde::Serialize;

use crate::answers::{AnswerField, AnswerSet};
use crate::catalog::{RequirementRule, TierCapability};
use crate::ranking::rank_for;

pub const GAP_PRODUCTION_READY: &str = "Requires production-ready tier";
pub const GAP_PUBLISHED_SLA: &str = "Requires published SLA";
pub const REASON_FALLBACK: &str = "Meets selected requirements";

/// Verdict for one tier. Rebuilt on every request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierEvaluation {
    #[serde(flatten)]
    pub tier: TierCapability,
    pub eligible: bool,
    /// Unmet requirement labels, in rule order.
    pub gaps: Vec<String>,
    /// Met requirement labels, in rule order.
    pub reasons: Vec<String>,
    /// Lower is preferred.
    pub rank: u32,
}

/// Check one tier against the answers and the rule set.
pub fn evaluate(answers: &AnswerSet, tier: &TierCapability, rules: &[RequirementRule]) -> TierEvaluation {
    let caps = &tier.capabilities;
    let mut gaps = Vec::new();
    let mut reasons = Vec::new();

    for rule in rules.iter().filter(|r| answers.flag(r.answer)) {
        if caps.flag(&rule.capability) {
            reasons.push(format!("Meets requirement: {}", rule.label));
        } else {
            gaps.push(rule.label.clone());
        }
    }

    if answers.is_production() && !caps.production_ready {
        gaps.push(GAP_PRODUCTION_READY.to_string());
    }
    if answers.flag(AnswerField::RequireSla) && !caps.has_sla() {
        gaps.push(GAP_PUBLISHED_SLA.to_string());
    }

    if gaps.is_empty() && reasons.is_empty() {
        reasons.push(REASON_FALLBACK.to_string());
    }

    TierEvaluation {
        tier: tier.clone(),
        eligible: gaps.is_empty(),
        gaps,
        reasons,
        rank: rank_for(&tier.key),
    }
}
