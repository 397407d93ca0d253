//! End-to-end evaluation of one answer set against a catalog snapshot.
//!
//! Tier evaluation and pack selection are independent branches; they only
//! meet here, where the response is assembled. Missing packs and bad policy
//! references become `warnings` so the result is always complete.

use serde::Serialize;

use crate::answers::AnswerSet;
use crate::bundle::{assemble, ResolvedPolicy};
use crate::catalog::{Catalog, PolicyPack};
use crate::eligibility::{evaluate, TierEvaluation};
use crate::{checklist, packs, params, ranking};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedTier {
    pub key: String,
    pub name: String,
    pub tier: String,
    pub reasons: Vec<String>,
}

impl From<&TierEvaluation> for RecommendedTier {
    fn from(e: &TierEvaluation) -> Self {
        Self {
            key: e.tier.key.clone(),
            name: e.tier.name.clone(),
            tier: e.tier.tier.clone(),
            reasons: e.reasons.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Exports {
    pub checklist_markdown: String,
    pub policy_bundle: String,
    pub resolved_policies: Vec<ResolvedPolicy>,
}

/// Response body of `POST /flow/evaluate`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    pub input: AnswerSet,
    pub deployment_model: String,
    pub recommended_tier: Option<RecommendedTier>,
    pub tiers: Vec<TierEvaluation>,
    pub pack_ids: Vec<String>,
    pub packs: Vec<PolicyPack>,
    pub checklist: Vec<String>,
    pub exports: Exports,
    pub warnings: Vec<String>,
}

pub fn evaluate_tiers(answers: &AnswerSet, catalog: &Catalog) -> Vec<TierEvaluation> {
    let evals = catalog
        .tiers
        .iter()
        .map(|t| evaluate(answers, t, &catalog.rules))
        .collect();
    ranking::rank(evals)
}

/// Resolve every policy reference of the selected packs, in pack order.
pub fn resolve_packs(
    pack_ids: &[&str],
    catalog: &Catalog,
    warnings: &mut Vec<String>,
) -> (Vec<PolicyPack>, Vec<ResolvedPolicy>) {
    let mut bodies = Vec::with_capacity(pack_ids.len());
    let mut resolved = Vec::new();

    for &pack_id in pack_ids {
        let Some(pack) = catalog.pack(pack_id) else {
            warnings.push(format!("policy pack not found: {pack_id}"));
            continue;
        };

        for raw in &pack.policies {
            let Some(r) = raw.compile() else {
                warnings.push(format!("invalid policy reference in pack {pack_id}"));
                continue;
            };
            let Some(def) = catalog.policy(r.category, r.id) else {
                warnings.push(format!(
                    "policy not found: {}/{} (pack {pack_id})",
                    r.category, r.id
                ));
                continue;
            };
            let values = params::resolve(def, r.defaults);
            resolved.push(ResolvedPolicy::new(pack_id, def, values));
        }

        bodies.push(pack.clone());
    }

    (bodies, resolved)
}

pub fn evaluate_flow(answers: &AnswerSet, catalog: &Catalog) -> EvaluationResult {
    let tiers = evaluate_tiers(answers, catalog);
    let recommended_tier = ranking::recommend(&tiers).map(RecommendedTier::from);

    let pack_ids = packs::select_pack_ids(answers);
    let mut warnings = Vec::new();
    let (pack_bodies, resolved) = resolve_packs(&pack_ids, catalog, &mut warnings);
    let bundle = assemble(&resolved);

    let checklist = checklist::build(answers);

    EvaluationResult {
        input: answers.clone(),
        deployment_model: packs::deployment_model(answers).to_string(),
        recommended_tier,
        tiers,
        pack_ids: pack_ids.iter().map(|s| s.to_string()).collect(),
        packs: pack_bodies,
        exports: Exports {
            checklist_markdown: checklist::to_markdown(&checklist),
            policy_bundle: bundle.render(),
            resolved_policies: resolved,
        },
        checklist,
        warnings,
    }
}
