//! tierpilot core: gateway tier selection and policy bundle engine.
//!
//! This crate holds the decision logic: requirement evaluation against tier
//! capabilities, cost-ordered ranking, policy pack selection, parameter
//! resolution, template rendering, and bundle assembly. It carries no
//! transport, runtime, or storage dependencies; the catalog arrives fully
//! materialised and every operation is a pure function over it.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Catalog and template content is untrusted: malformed entries degrade to
//! warnings or empty output instead of aborting an evaluation.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod answers;
pub mod bundle;
pub mod catalog;
pub mod checklist;
pub mod eligibility;
pub mod error;
pub mod flow;
pub mod packs;
pub mod params;
pub mod ranking;
pub mod template;

pub use answers::{AnswerField, AnswerSet, Environment};
pub use bundle::{assemble, PolicyBundleDocument, ResolvedPolicy};
pub use catalog::{
    Capabilities, CapabilityField, Catalog, ParameterSpec, PolicyDefinition, PolicyPack,
    PolicyReference, PolicyTemplates, RawPolicyReference, RawRequirementRule, RequirementRule,
    TierCapability,
};
pub use eligibility::{evaluate, TierEvaluation};
pub use flow::{evaluate_flow, EvaluationResult, Exports, RecommendedTier};

/// Shared result type.
pub use error::{Result, TierPilotError};
