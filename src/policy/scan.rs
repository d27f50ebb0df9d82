//! Keyword scanner — flattens a payload into one searchable string and tests
//! it against the banned-phrase list.
//!
//! Matching is naive case-insensitive substring containment, not
//! word-boundary aware: `idiot` matches inside `idiotic`. That is documented
//! policy behavior, not a defect to fix here.

use serde_json::Value;

// ─── Payload flattening ───────────────────────────────────────────────────────

/// Render the entire payload into a single flat string.
///
/// Keys, scalar values, and element boundaries are all preserved, so a
/// substring search over the result sees every piece of the tree. Numbers,
/// booleans, and null render in their canonical JSON text, which keeps
/// matching against purely numeric phrases deterministic.
pub fn flatten_payload(payload: &Value) -> String {
    let mut out = String::new();
    render(payload, &mut out);
    out
}

fn render(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => out.push_str(s),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                render(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            out.push('{');
            for (i, (key, val)) in map.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(key);
                out.push_str(": ");
                render(val, out);
            }
            out.push('}');
        }
    }
}

// ─── Phrase matching ──────────────────────────────────────────────────────────

/// Test each banned phrase, in policy order, against the flattened payload.
///
/// Returns the first phrase found and stops scanning — the scan is a
/// short-circuit, not an exhaustive collection of every hit. `None` means no
/// phrase matched anywhere in the tree.
pub fn find_banned_phrase<'a>(payload: &Value, phrases: &'a [String]) -> Option<&'a str> {
    let haystack = flatten_payload(payload).to_lowercase();
    phrases
        .iter()
        .find(|phrase| haystack.contains(&phrase.to_lowercase()))
        .map(String::as_str)
}
