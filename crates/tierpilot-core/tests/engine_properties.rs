//! Invariants checked over every answer combination.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use serde_json::{json, Map, Value};

use tierpilot_core::catalog::{compile_rules, RawRequirementRule};
use tierpilot_core::packs::select_pack_ids;
use tierpilot_core::params::resolve;
use tierpilot_core::ranking::{rank, rank_for};
use tierpilot_core::template::render;
use tierpilot_core::{
    evaluate, AnswerSet, Capabilities, Catalog, Environment, PolicyDefinition, TierCapability,
};

fn all_answer_sets() -> Vec<AnswerSet> {
    let envs = [
        None,
        Some(Environment::Development),
        Some(Environment::Test),
        Some(Environment::Production),
    ];
    let mut out = Vec::new();
    for env in envs {
        for bits in 0u8..32 {
            let flag = |i: u8| if bits & (1 << i) != 0 { Some(true) } else { None };
            out.push(AnswerSet {
                environment: env,
                require_private_networking: flag(0),
                require_multi_region: flag(1),
                require_self_hosted_gateway: flag(2),
                require_ai_gateway: flag(3),
                require_sla: flag(4),
            });
        }
    }
    out
}

fn rules() -> Vec<RawRequirementRule> {
    serde_json::from_value(json!([
        { "answerField": "requirePrivateNetworking", "capabilityField": "privateNetworking", "label": "Private networking" },
        { "answerField": "requireMultiRegion", "capabilityField": "multiRegion", "label": "Multi-region deployment" },
        { "answerField": "requireSelfHostedGateway", "capabilityField": "selfHostedGateway", "label": "Self-hosted gateway" },
        { "answerField": "requireAiGateway", "capabilityField": "aiGateway", "label": "AI gateway" }
    ]))
    .unwrap()
}

fn tier(key: &str, caps: Capabilities) -> TierCapability {
    TierCapability {
        key: key.into(),
        name: key.into(),
        tier: key.into(),
        capabilities: caps,
        ..Default::default()
    }
}

fn values(v: Value) -> Map<String, Value> {
    v.as_object().cloned().unwrap()
}

#[test]
fn evaluate_is_deterministic() {
    let rules = compile_rules(&rules());
    let t = tier(
        "standard",
        Capabilities {
            private_networking: true,
            production_ready: true,
            ..Default::default()
        },
    );
    for a in all_answer_sets() {
        let first = evaluate(&a, &t, &rules);
        let second = evaluate(&a, &t, &rules);
        assert_eq!(first, second);
        assert_eq!(first.eligible, first.gaps.is_empty());
        assert!(!first.reasons.is_empty() || !first.gaps.is_empty());
    }
}

#[test]
fn ranking_is_stable_for_equal_ranks() {
    let rules = compile_rules(&rules());
    let catalog_order = ["custom-b", "basic", "custom-a", "consumption", "custom-c"];
    let evals = catalog_order
        .iter()
        .map(|k| evaluate(&AnswerSet::default(), &tier(k, Capabilities::default()), &rules))
        .collect();

    let ranked = rank(evals);
    let keys: Vec<&str> = ranked.iter().map(|e| e.tier.key.as_str()).collect();
    assert_eq!(keys, ["consumption", "basic", "custom-b", "custom-a", "custom-c"]);
    assert_eq!(rank_for("custom-a"), rank_for("custom-c"));
}

#[test]
fn pack_selection_ignores_catalog() {
    // Pack selection takes only answers; two catalogs cannot influence it.
    let empty = Catalog::default();
    let populated = Catalog::new(
        vec![tier("premium", Capabilities::default())],
        compile_rules(&rules()),
        vec![],
        vec![],
    );
    for a in all_answer_sets() {
        let ids = select_pack_ids(&a);
        let from_empty = tierpilot_core::evaluate_flow(&a, &empty).pack_ids;
        let from_populated = tierpilot_core::evaluate_flow(&a, &populated).pack_ids;
        assert_eq!(from_empty, from_populated);
        assert_eq!(from_empty, ids.iter().map(|s| s.to_string()).collect::<Vec<_>>());

        let mut dedup = ids.clone();
        dedup.sort_unstable();
        dedup.dedup();
        assert_eq!(dedup.len(), ids.len());
        assert!(ids.contains(&"public-api") != ids.contains(&"private-backend"));
    }
}

#[test]
fn resolution_keeps_pack_keys_and_omits_undefaulted() {
    let def: PolicyDefinition = serde_json::from_value(json!({
        "category": "traffic",
        "id": "backend-timeout",
        "parameters": {
            "timeout": { "default": 30 },
            "bufferResponse": {},
            "retries": { "default": null }
        }
    }))
    .unwrap();

    let cases = [
        json!({}),
        json!({ "timeout": 5 }),
        json!({ "unexpected": "x", "timeout": 1 }),
        json!({ "retries": 3 }),
    ];
    for c in cases {
        let pack = values(c);
        let out = resolve(&def, &pack);
        for k in pack.keys() {
            assert!(out.contains_key(k), "pack key {k} missing");
        }
        assert!(!out.contains_key("bufferResponse"));
        assert_eq!(out.contains_key("retries"), pack.contains_key("retries"));
    }

    let out = resolve(&def, &values(json!({ "timeout": 5 })));
    assert_eq!(out.get("timeout"), Some(&json!(5)));
}

#[test]
fn single_placeholder_never_leaks_reserved_chars() {
    let inputs = [
        "plain",
        "<script>alert(1)</script>",
        "a & b",
        r#"x" onload="y"#,
        "it's",
        "&amp;",
        "]]><!--",
    ];
    for s in inputs {
        let out = render("{{v}}", &values(json!({ "v": s })));
        let stripped = out
            .replace("&amp;", "")
            .replace("&lt;", "")
            .replace("&gt;", "")
            .replace("&quot;", "")
            .replace("&apos;", "");
        assert!(
            !stripped.contains(['<', '>', '&', '"', '\'']),
            "unescaped output for {s:?}: {out}"
        );
    }
}

#[test]
fn rendering_clean_output_is_a_fixed_point() {
    let template = "<set-header name=\"{{name}}\" exists-action=\"{{action}}\" />";
    let first = render(
        template,
        &values(json!({ "name": "X-Request-Id", "action": "override" })),
    );
    let again = render(&first, &values(json!({ "name": "ignored" })));
    assert_eq!(first, again);
    assert_eq!(
        first,
        "<set-header name=\"X-Request-Id\" exists-action=\"override\" />"
    );
}

#[test]
fn quote_breakout_becomes_one_attribute() {
    let out = render(
        "<a b=\"{{v}}\"/>",
        &values(json!({ "v": "x\" onload=\"y" })),
    );
    assert_eq!(out, "<a b=\"x&quot; onload=&quot;y\"/>");
    assert_eq!(out.matches('"').count(), 2);
}
