//! Operator answers (the input of one evaluation).

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Deployment environment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Test,
    Production,
}

/// Requirement answers. Every field is optional; an absent flag means "not required".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AnswerSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<Environment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_private_networking: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_multi_region: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_self_hosted_gateway: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_ai_gateway: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_sla: Option<bool>,
}

/// Boolean answer fields addressable by name from requirement rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnswerField {
    RequirePrivateNetworking,
    RequireMultiRegion,
    RequireSelfHostedGateway,
    RequireAiGateway,
    RequireSla,
}

impl AnswerField {
    pub const ALL: [AnswerField; 5] = [
        AnswerField::RequirePrivateNetworking,
        AnswerField::RequireMultiRegion,
        AnswerField::RequireSelfHostedGateway,
        AnswerField::RequireAiGateway,
        AnswerField::RequireSla,
    ];

    /// Field name as it appears in request bodies and rule files.
    pub fn as_str(self) -> &'static str {
        match self {
            AnswerField::RequirePrivateNetworking => "requirePrivateNetworking",
            AnswerField::RequireMultiRegion => "requireMultiRegion",
            AnswerField::RequireSelfHostedGateway => "requireSelfHostedGateway",
            AnswerField::RequireAiGateway => "requireAiGateway",
            AnswerField::RequireSla => "requireSla",
        }
    }
}

impl FromStr for AnswerField {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        AnswerField::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or(())
    }
}

impl AnswerSet {
    /// Truthiness of a boolean answer (absent = false).
    pub fn flag(&self, field: AnswerField) -> bool {
        let v = match field {
            AnswerField::RequirePrivateNetworking => self.require_private_networking,
            AnswerField::RequireMultiRegion => self.require_multi_region,
            AnswerField::RequireSelfHostedGateway => self.require_self_hosted_gateway,
            AnswerField::RequireAiGateway => self.require_ai_gateway,
            AnswerField::RequireSla => self.require_sla,
        };
        v.unwrap_or(false)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Some(Environment::Production)
    }
}
