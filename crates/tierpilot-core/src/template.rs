//! `{{name}}` placeholder substitution with XML-safe values.
//!
//! Rendered fragments land inside a gateway policy document, so every
//! substituted string is entity-escaped. Unknown placeholders render as
//! empty text; templates and pack configuration are authored separately.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::{Map, Value};

// Constant pattern; compilation cannot fail.
#[allow(clippy::unwrap_used)]
static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{([^{}]*)\}\}").unwrap());

/// Escape the five reserved XML characters.
pub fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

fn stringify(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::String(s) => escape_xml(s).into_owned(),
        Value::Number(n) => escape_xml(&n.to_string()).into_owned(),
        Value::Array(_) | Value::Object(_) => escape_xml(&v.to_string()).into_owned(),
    }
}

/// Substitute every `{{ key }}` token in `template` from `values`.
pub fn render(template: &str, values: &Map<String, Value>) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            let key = caps.get(1).map_or("", |m| m.as_str().trim());
            values.get(key).map(stringify).unwrap_or_default()
        })
        .into_owned()
}
