//! Parameter resolution: pack defaults merged over declared defaults.

use serde_json::{Map, Value};

use crate::catalog::PolicyDefinition;

/// Concrete parameters for one policy instance.
///
/// Declared parameters come first, in declaration order; a pack override
/// wins over the declared default, and a parameter with neither is left
/// out. Pack keys the definition never declared are appended afterwards.
pub fn resolve(definition: &PolicyDefinition, pack_defaults: &Map<String, Value>) -> Map<String, Value> {
    let mut out = Map::new();

    for (name, spec) in &definition.parameters {
        if let Some(v) = pack_defaults.get(name) {
            out.insert(name.clone(), v.clone());
        } else if let Some(v) = &spec.default {
            out.insert(name.clone(), v.clone());
        }
    }

    for (name, v) in pack_defaults {
        if !out.contains_key(name) {
            out.insert(name.clone(), v.clone());
        }
    }

    out
}
