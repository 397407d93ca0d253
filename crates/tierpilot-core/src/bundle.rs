//! Policy bundle assembly.
//!
//! Every section always starts with `<base />`; a section with no
//! contributed fragment carries a fixed comment instead, so identical input
//! yields an identical document shape.

use std::fmt::{self, Write};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::catalog::{PolicyDefinition, PolicyTemplates};
use crate::template::render;

const INDENT: &str = "    ";

/// Policy definition bound to concrete parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPolicy {
    /// Pack the reference came from.
    pub pack: String,
    pub category: String,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub parameters: Map<String, Value>,
    #[serde(skip)]
    pub templates: PolicyTemplates,
}

impl ResolvedPolicy {
    pub fn new(pack: &str, definition: &PolicyDefinition, parameters: Map<String, Value>) -> Self {
        Self {
            pack: pack.to_string(),
            category: definition.category.clone(),
            id: definition.id.clone(),
            name: definition.name.clone(),
            version: definition.version.clone(),
            parameters,
            templates: definition.templates.clone(),
        }
    }
}

/// Rendered fragments per section, in policy order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyBundleDocument {
    pub inbound: Vec<String>,
    /// Never receives fragments; kept so the document has all four sections.
    pub backend: Vec<String>,
    pub outbound: Vec<String>,
    pub on_error: Vec<String>,
}

fn push_rendered(section: &mut Vec<String>, template: Option<&str>, values: &Map<String, Value>) {
    let Some(t) = template else { return };
    let fragment = render(t, values);
    if !fragment.trim().is_empty() {
        section.push(fragment);
    }
}

/// Render every resolved policy into its sections.
pub fn assemble(resolved: &[ResolvedPolicy]) -> PolicyBundleDocument {
    let mut doc = PolicyBundleDocument::default();
    for p in resolved {
        push_rendered(&mut doc.inbound, p.templates.inbound.as_deref(), &p.parameters);
        push_rendered(&mut doc.outbound, p.templates.outbound.as_deref(), &p.parameters);
        push_rendered(&mut doc.on_error, p.templates.on_error_template(), &p.parameters);
    }
    doc
}

fn write_fragment(out: &mut String, fragment: &str) -> fmt::Result {
    let lines = fragment
        .trim_end()
        .lines()
        .skip_while(|l| l.trim().is_empty());
    for line in lines {
        let line = line.trim_end();
        if line.is_empty() {
            writeln!(out)?;
        } else {
            writeln!(out, "{INDENT}{line}")?;
        }
    }
    Ok(())
}

fn write_section(out: &mut String, tag: &str, fragments: &[String], placeholder: bool) -> fmt::Result {
    writeln!(out, "  <{tag}>")?;
    writeln!(out, "{INDENT}<base />")?;
    if fragments.is_empty() {
        if placeholder {
            writeln!(out, "{INDENT}<!-- No {tag} policies selected -->")?;
        }
    } else {
        for f in fragments {
            write_fragment(out, f)?;
        }
    }
    writeln!(out, "  </{tag}>")
}

impl PolicyBundleDocument {
    /// Final document text.
    pub fn render(&self) -> String {
        self.to_string()
    }

    pub fn is_empty(&self) -> bool {
        self.inbound.is_empty() && self.outbound.is_empty() && self.on_error.is_empty()
    }
}

impl fmt::Display for PolicyBundleDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        writeln!(out, "<policies>")?;
        write_section(&mut out, "inbound", &self.inbound, true)?;
        write_section(&mut out, "backend", &self.backend, false)?;
        write_section(&mut out, "outbound", &self.outbound, true)?;
        write_section(&mut out, "on-error", &self.on_error, true)?;
        writeln!(out, "</policies>")?;
        f.write_str(&out)
    }
}
