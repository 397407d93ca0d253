//! Follow-up action items for the operator.

use crate::answers::{AnswerField, AnswerSet};

pub const BASE_ITEMS: [&str; 4] = [
    "Confirm the recommended tier against expected traffic and budget",
    "Register APIs and products in the gateway",
    "Apply the generated policy bundle at the global scope",
    "Configure diagnostics and log forwarding",
];

const CONDITIONAL_ITEMS: [(AnswerField, &str); 3] = [
    (
        AnswerField::RequirePrivateNetworking,
        "Plan private network integration for backends",
    ),
    (
        AnswerField::RequireSelfHostedGateway,
        "Provision self-hosted gateway infrastructure and connectivity",
    ),
    (
        AnswerField::RequireAiGateway,
        "Configure AI backend endpoints and token limits",
    ),
];

pub fn build(answers: &AnswerSet) -> Vec<String> {
    let conditional = CONDITIONAL_ITEMS
        .iter()
        .filter(|(field, _)| answers.flag(*field))
        .map(|(_, item)| *item);

    BASE_ITEMS
        .iter()
        .copied()
        .chain(conditional)
        .map(str::to_string)
        .collect()
}

/// One `- [ ] item` line per item.
pub fn to_markdown(items: &[String]) -> String {
    items
        .iter()
        .map(|i| format!("- [ ] {i}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conditional_items_follow_base_list() {
        let a = AnswerSet {
            require_ai_gateway: Some(true),
            require_private_networking: Some(true),
            ..Default::default()
        };
        let items = build(&a);
        assert_eq!(items.len(), BASE_ITEMS.len() + 2);
        assert_eq!(items[4], "Plan private network integration for backends");
        assert_eq!(items[5], "Configure AI backend endpoints and token limits");
    }

    #[test]
    fn markdown_lines() {
        let md = to_markdown(&["a".to_string(), "b".to_string()]);
        assert_eq!(md, "- [ ] a\n- [ ] b");
    }
}
