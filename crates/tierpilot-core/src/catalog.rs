//! Catalog records: tier capabilities, requirement rules, policy packs and
//! policy definitions.
//!
//! Records deserialize from the JSON shapes the catalog loader reads. Raw
//! forms (`RawRequirementRule`, `RawPolicyReference`) keep identifiers
//! optional so partially authored entries can be filtered instead of
//! failing the whole catalog.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::answers::AnswerField;

/// Boolean capability flags addressable by name from requirement rules.
///
/// Names outside the built-in set resolve against `Capabilities::extra`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CapabilityField {
    PrivateNetworking,
    MultiRegion,
    SelfHostedGateway,
    AiGateway,
    ProductionReady,
    Other(String),
}

impl CapabilityField {
    pub const ALL: [CapabilityField; 5] = [
        CapabilityField::PrivateNetworking,
        CapabilityField::MultiRegion,
        CapabilityField::SelfHostedGateway,
        CapabilityField::AiGateway,
        CapabilityField::ProductionReady,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            CapabilityField::PrivateNetworking => "privateNetworking",
            CapabilityField::MultiRegion => "multiRegion",
            CapabilityField::SelfHostedGateway => "selfHostedGateway",
            CapabilityField::AiGateway => "aiGateway",
            CapabilityField::ProductionReady => "productionReady",
            CapabilityField::Other(name) => name,
        }
    }
}

impl FromStr for CapabilityField {
    type Err = ();

    /// Fails only on a blank name.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(());
        }
        Ok(CapabilityField::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .unwrap_or_else(|| CapabilityField::Other(s.to_string())))
    }
}

/// `null` reads as `false`, like an absent flag.
fn null_as_false<'de, D>(de: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(de)?.unwrap_or(false))
}

/// Capability facts of one tier. Absent or `null` flags read as `false`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    #[serde(default, deserialize_with = "null_as_false")]
    pub private_networking: bool,
    #[serde(default, deserialize_with = "null_as_false")]
    pub multi_region: bool,
    #[serde(default, deserialize_with = "null_as_false")]
    pub self_hosted_gateway: bool,
    #[serde(default, deserialize_with = "null_as_false")]
    pub ai_gateway: bool,
    #[serde(default, deserialize_with = "null_as_false")]
    pub production_ready: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sla: Option<String>,
    /// Additional catalog facts. Rules may name them as capability fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Capabilities {
    /// Extra facts count only when they are literally `true`.
    pub fn flag(&self, field: &CapabilityField) -> bool {
        match field {
            CapabilityField::PrivateNetworking => self.private_networking,
            CapabilityField::MultiRegion => self.multi_region,
            CapabilityField::SelfHostedGateway => self.self_hosted_gateway,
            CapabilityField::AiGateway => self.ai_gateway,
            CapabilityField::ProductionReady => self.production_ready,
            CapabilityField::Other(name) => matches!(self.extra.get(name), Some(Value::Bool(true))),
        }
    }

    /// True when a non-blank SLA statement is published.
    pub fn has_sla(&self) -> bool {
        self.sla.as_deref().is_some_and(|s| !s.trim().is_empty())
    }
}

/// One selectable product tier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierCapability {
    /// Stable key; the loader fills it from the source file stem.
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub capabilities: Capabilities,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Requirement rule as authored. Identifiers may be missing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRequirementRule {
    #[serde(default)]
    pub answer_field: Option<String>,
    #[serde(default)]
    pub capability_field: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
}

/// Validated rule: answer flag `answer` demands capability `capability`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementRule {
    pub answer: AnswerField,
    pub capability: CapabilityField,
    pub label: String,
}

impl RequirementRule {
    pub fn new(answer: AnswerField, capability: CapabilityField, label: impl Into<String>) -> Self {
        Self {
            answer,
            capability,
            label: label.into(),
        }
    }
}

/// Keep only well-formed rules. A rule missing either identifier, or naming
/// an answer field that does not exist, is dropped without error. Unknown
/// capability names are kept and read from the tier's extra facts.
pub fn compile_rules(raw: &[RawRequirementRule]) -> Vec<RequirementRule> {
    let mut out = Vec::with_capacity(raw.len());
    for r in raw {
        let (Some(answer_s), Some(cap_s)) = (r.answer_field.as_deref(), r.capability_field.as_deref())
        else {
            tracing::debug!(?r, "requirement rule without answer/capability field dropped");
            continue;
        };
        let Ok(capability) = cap_s.parse::<CapabilityField>() else {
            tracing::debug!(answer = %answer_s, "requirement rule with blank capability field dropped");
            continue;
        };
        let Ok(answer) = answer_s.parse::<AnswerField>() else {
            tracing::debug!(answer = %answer_s, capability = %cap_s, "requirement rule with unknown answer field dropped");
            continue;
        };
        let label = r
            .label
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(answer_s)
            .to_string();
        out.push(RequirementRule {
            answer,
            capability,
            label,
        });
    }
    out
}

/// Policy reference as authored inside a pack.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPolicyReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Pack defaults: parameter name -> override value.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub defaults: Map<String, Value>,
}

/// Reference with both identifiers present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolicyReference<'a> {
    pub category: &'a str,
    pub id: &'a str,
    pub defaults: &'a Map<String, Value>,
}

impl RawPolicyReference {
    /// `None` when category or id is missing or blank.
    pub fn compile(&self) -> Option<PolicyReference<'_>> {
        let category = self.category.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let id = self.id.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        Some(PolicyReference {
            category,
            id,
            defaults: &self.defaults,
        })
    }
}

/// Named bundle of policy references.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyPack {
    /// Stable id; the loader falls back to the file stem.
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub policies: Vec<RawPolicyReference>,
}

/// Declared parameter of a policy definition.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ParameterSpec {
    /// A JSON `null` default is treated as no default.
    #[serde(default)]
    pub default: Option<Value>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Text templates of one policy. On-error may be authored as `on-error`
/// or `onError`; the hyphenated key wins when both are present.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PolicyTemplates {
    #[serde(default)]
    pub inbound: Option<String>,
    #[serde(default)]
    pub outbound: Option<String>,
    #[serde(default, rename = "on-error")]
    pub on_error: Option<String>,
    #[serde(default, rename = "onError")]
    pub on_error_camel: Option<String>,
}

impl PolicyTemplates {
    pub fn on_error_template(&self) -> Option<&str> {
        self.on_error.as_deref().or(self.on_error_camel.as_deref())
    }
}

/// Versioned policy template keyed by `(category, id)`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PolicyDefinition {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Declared parameters in authoring order.
    #[serde(default, deserialize_with = "ordered_parameters")]
    pub parameters: Vec<(String, ParameterSpec)>,
    #[serde(default)]
    pub templates: PolicyTemplates,
}

fn ordered_parameters<'de, D>(d: D) -> std::result::Result<Vec<(String, ParameterSpec)>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Map::<String, Value>::deserialize(d)?;
    raw.into_iter()
        .map(|(name, v)| {
            let spec = serde_json::from_value(v)
                .map_err(|e| serde::de::Error::custom(format!("parameter {name}: {e}")))?;
            Ok((name, spec))
        })
        .collect()
}

/// Fully loaded, read-only catalog snapshot for one evaluation.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Tiers in catalog order; ranking ties keep this order.
    pub tiers: Vec<TierCapability>,
    pub rules: Vec<RequirementRule>,
    pub packs: Vec<PolicyPack>,
    policies: HashMap<(String, String), PolicyDefinition>,
}

impl Catalog {
    pub fn new(
        tiers: Vec<TierCapability>,
        rules: Vec<RequirementRule>,
        packs: Vec<PolicyPack>,
        policies: Vec<PolicyDefinition>,
    ) -> Self {
        let mut by_key = HashMap::with_capacity(policies.len());
        for p in policies {
            let key = (p.category.clone(), p.id.clone());
            if by_key.insert(key.clone(), p).is_some() {
                tracing::warn!(category = %key.0, id = %key.1, "duplicate policy definition replaced");
            }
        }
        Self {
            tiers,
            rules,
            packs,
            policies: by_key,
        }
    }

    pub fn policy(&self, category: &str, id: &str) -> Option<&PolicyDefinition> {
        self.policies.get(&(category.to_string(), id.to_string()))
    }

    pub fn pack(&self, id: &str) -> Option<&PolicyPack> {
        self.packs.iter().find(|p| p.id == id)
    }

    pub fn policy_count(&self) -> usize {
        self.policies.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_rules_are_dropped() {
        let raw: Vec<RawRequirementRule> = serde_json::from_str(
            r#"[
                {"answerField": "requireMultiRegion", "capabilityField": "multiRegion", "label": "Multi-region deployment"},
                {"answerField": "requireMultiRegion", "label": "no capability"},
                {"capabilityField": "aiGateway", "label": "no answer"},
                {"answerField": "requireTelepathy", "capabilityField": "aiGateway", "label": "unknown"},
                {"answerField": "requireAiGateway", "capabilityField": "  ", "label": "blank capability"}
            ]"#,
        )
        .unwrap();

        let rules = compile_rules(&raw);
        assert_eq!(
            rules,
            vec![RequirementRule::new(
                AnswerField::RequireMultiRegion,
                CapabilityField::MultiRegion,
                "Multi-region deployment"
            )]
        );
    }

    #[test]
    fn unknown_capability_reads_extra_facts() {
        let raw: Vec<RawRequirementRule> = serde_json::from_str(
            r#"[{"answerField": "requireMultiRegion", "capabilityField": "availabilityZones", "label": "Zone redundancy"}]"#,
        )
        .unwrap();
        let rules = compile_rules(&raw);
        assert_eq!(
            rules,
            vec![RequirementRule::new(
                AnswerField::RequireMultiRegion,
                CapabilityField::Other("availabilityZones".into()),
                "Zone redundancy"
            )]
        );

        let with: Capabilities =
            serde_json::from_str(r#"{"multiRegion": true, "availabilityZones": true}"#).unwrap();
        let without: Capabilities = serde_json::from_str(r#"{"multiRegion": true}"#).unwrap();
        let stringly: Capabilities =
            serde_json::from_str(r#"{"availabilityZones": "yes"}"#).unwrap();
        assert!(with.flag(&rules[0].capability));
        assert!(!without.flag(&rules[0].capability));
        assert!(!stringly.flag(&rules[0].capability));
    }

    #[test]
    fn known_capability_names_parse_to_builtins() {
        for f in CapabilityField::ALL {
            assert_eq!(f.as_str().parse::<CapabilityField>(), Ok(f.clone()));
        }
        assert_eq!(" ".parse::<CapabilityField>(), Err(()));
    }

    #[test]
    fn null_capability_flags_read_false() {
        let tier: TierCapability = serde_json::from_value(serde_json::json!({
            "key": "basic",
            "capabilities": {"multiRegion": null, "productionReady": true}
        }))
        .unwrap();
        assert!(!tier.capabilities.multi_region);
        assert!(tier.capabilities.production_ready);
        assert!(tier.capabilities.extra.is_empty());
    }

    #[test]
    fn parameters_keep_declaration_order() {
        let def: PolicyDefinition = serde_json::from_str(
            r#"{"category":"traffic","id":"rate-limit",
                "parameters": {"zeta": {"default": 1}, "alpha": {}, "mid": {"default": null}},
                "templates": {"inbound": "<rate-limit calls=\"{{zeta}}\" />"}}"#,
        )
        .unwrap();
        let names: Vec<&str> = def.parameters.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
        assert!(def.parameters[2].1.default.is_none());
    }

    #[test]
    fn duplicate_policy_definition_keeps_last() {
        let first: PolicyDefinition =
            serde_json::from_str(r#"{"category":"security","id":"cors","name":"first"}"#).unwrap();
        let second: PolicyDefinition =
            serde_json::from_str(r#"{"category":"security","id":"cors","name":"second"}"#).unwrap();
        let c = Catalog::new(vec![], vec![], vec![], vec![first, second]);
        assert_eq!(c.policy_count(), 1);
        assert_eq!(c.policy("security", "cors").and_then(|p| p.name.as_deref()), Some("second"));
    }

    #[test]
    fn hyphenated_on_error_wins() {
        let t: PolicyTemplates =
            serde_json::from_str(r#"{"onError": "camel", "on-error": "hyphen"}"#).unwrap();
        assert_eq!(t.on_error_template(), Some("hyphen"));

        let t: PolicyTemplates = serde_json::from_str(r#"{"onError": "camel"}"#).unwrap();
        assert_eq!(t.on_error_template(), Some("camel"));
    }

    #[test]
    fn blank_reference_ids_are_invalid() {
        let r = RawPolicyReference {
            category: Some("security".into()),
            id: Some("  ".into()),
            defaults: Map::new(),
        };
        assert!(r.compile().is_none());
    }

    #[test]
    fn whitespace_sla_is_not_published() {
        let mut c = Capabilities::default();
        assert!(!c.has_sla());
        c.sla = Some("   ".into());
        assert!(!c.has_sla());
        c.sla = Some("99.95%".into());
        assert!(c.has_sla());
    }
}
