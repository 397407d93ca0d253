//! Cost-preference ranking of evaluated tiers.

use crate::eligibility::TierEvaluation;

/// Rank assigned to tiers missing from [`TIER_RANKS`]; sorts them last.
pub const UNKNOWN_RANK: u32 = 1000;

/// Well-known tier keys in order of increasing cost/complexity.
pub const TIER_RANKS: [(&str, u32); 5] = [
    ("consumption", 1),
    ("developer", 2),
    ("basic", 3),
    ("standard", 4),
    ("premium", 5),
];

pub fn rank_for(key: &str) -> u32 {
    TIER_RANKS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, r)| *r)
        .unwrap_or(UNKNOWN_RANK)
}

/// Ascending by rank. `sort_by_key` is stable, so equal ranks keep catalog order.
pub fn rank(mut evals: Vec<TierEvaluation>) -> Vec<TierEvaluation> {
    evals.sort_by_key(|e| e.rank);
    evals
}

/// First eligible entry of an already ranked list.
pub fn recommend(ranked: &[TierEvaluation]) -> Option<&TierEvaluation> {
    ranked.iter().find(|e| e.eligible)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TierCapability;

    fn eval(key: &str, eligible: bool) -> TierEvaluation {
        TierEvaluation {
            tier: TierCapability {
                key: key.into(),
                ..Default::default()
            },
            eligible,
            gaps: vec![],
            reasons: vec![],
            rank: rank_for(key),
        }
    }

    fn keys(v: &[TierEvaluation]) -> Vec<&str> {
        v.iter().map(|e| e.tier.key.as_str()).collect()
    }

    #[test]
    fn unknown_tiers_sort_last_in_catalog_order() {
        let ranked = rank(vec![
            eval("zeta-custom", true),
            eval("premium", true),
            eval("alpha-custom", true),
            eval("consumption", true),
        ]);
        assert_eq!(
            keys(&ranked),
            ["consumption", "premium", "zeta-custom", "alpha-custom"]
        );
    }

    #[test]
    fn recommendation_skips_ineligible() {
        let ranked = rank(vec![eval("standard", true), eval("developer", false)]);
        assert_eq!(keys(&ranked), ["developer", "standard"]);
        assert_eq!(recommend(&ranked).map(|e| e.tier.key.as_str()), Some("standard"));

        let none = rank(vec![eval("basic", false)]);
        assert!(recommend(&none).is_none());
    }
}
