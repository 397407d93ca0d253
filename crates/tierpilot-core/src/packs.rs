//! Policy pack selection and deployment-model labelling.
//!
//! Both are pure functions of the answer flags; catalog contents never
//! influence which pack ids are chosen.

use crate::answers::{AnswerField, AnswerSet};

pub const SECURITY_BASELINE: &str = "security-baseline";
pub const OBSERVABILITY_BASELINE: &str = "observability-baseline";
pub const AI_GATEWAY_BASELINE: &str = "ai-gateway-baseline";
pub const PRIVATE_BACKEND: &str = "private-backend";
pub const PUBLIC_API: &str = "public-api";

/// Always selected, in this order, before any conditional pack.
pub const BASELINE_PACKS: [&str; 2] = [SECURITY_BASELINE, OBSERVABILITY_BASELINE];

pub const MODEL_HYBRID: &str = "Hybrid with self-hosted gateway";
pub const MODEL_PRIVATE_BACKENDS: &str = "Public gateway, private backends";
pub const MODEL_PUBLIC: &str = "Public gateway, public backends";

fn needs_private_backend(answers: &AnswerSet) -> bool {
    answers.flag(AnswerField::RequirePrivateNetworking)
        || answers.flag(AnswerField::RequireSelfHostedGateway)
}

/// Ordered, duplicate-free pack ids. The order is the pack processing order.
pub fn select_pack_ids(answers: &AnswerSet) -> Vec<&'static str> {
    let mut ids: Vec<&'static str> = BASELINE_PACKS.to_vec();

    if answers.flag(AnswerField::RequireAiGateway) {
        ids.push(AI_GATEWAY_BASELINE);
    }

    ids.push(if needs_private_backend(answers) {
        PRIVATE_BACKEND
    } else {
        PUBLIC_API
    });

    ids
}

pub fn deployment_model(answers: &AnswerSet) -> &'static str {
    if answers.flag(AnswerField::RequireSelfHostedGateway) {
        MODEL_HYBRID
    } else if answers.flag(AnswerField::RequirePrivateNetworking) {
        MODEL_PRIVATE_BACKENDS
    } else {
        MODEL_PUBLIC
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_answers_select_public_baselines() {
        let a = AnswerSet::default();
        assert_eq!(
            select_pack_ids(&a),
            [SECURITY_BASELINE, OBSERVABILITY_BASELINE, PUBLIC_API]
        );
        assert_eq!(deployment_model(&a), MODEL_PUBLIC);
    }

    #[test]
    fn self_hosted_gateway_implies_private_backend() {
        let a = AnswerSet {
            require_self_hosted_gateway: Some(true),
            ..Default::default()
        };
        let ids = select_pack_ids(&a);
        assert!(ids.contains(&PRIVATE_BACKEND));
        assert!(!ids.contains(&PUBLIC_API));
        assert_eq!(deployment_model(&a), MODEL_HYBRID);
    }

    #[test]
    fn self_hosted_label_takes_precedence_over_private() {
        let a = AnswerSet {
            require_self_hosted_gateway: Some(true),
            require_private_networking: Some(true),
            require_ai_gateway: Some(true),
            ..Default::default()
        };
        assert_eq!(
            select_pack_ids(&a),
            [
                SECURITY_BASELINE,
                OBSERVABILITY_BASELINE,
                AI_GATEWAY_BASELINE,
                PRIVATE_BACKEND
            ]
        );
        assert_eq!(deployment_model(&a), MODEL_HYBRID);

        let a = AnswerSet {
            require_private_networking: Some(true),
            ..Default::default()
        };
        assert_eq!(deployment_model(&a), MODEL_PRIVATE_BACKENDS);
    }
}
