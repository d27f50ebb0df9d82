//! Refund-limit rule — inspects refund-like fields against the numeric
//! business threshold, independent of the keyword scanner.

use serde_json::Value;

/// Check the payload's refund-like fields against `max_amount`.
///
/// Only applies when the payload is an object at its top level; anything else
/// means no rule fires. Candidate field names are tried in policy order. A
/// field that is present but not coercible to a number is skipped as if it
/// were absent, and the next alias is tried. The first usable numeric value
/// ends the search: `Some(amount)` when strictly over the limit, `None` when
/// within it — later aliases are not consulted once a number was obtained.
pub fn evaluate_refund_limit(payload: &Value, fields: &[String], max_amount: f64) -> Option<f64> {
    let map = payload.as_object()?;

    for field in fields {
        let Some(value) = map.get(field.as_str()) else {
            continue;
        };
        if let Some(amount) = coerce_amount(value) {
            return (amount > max_amount).then_some(amount);
        }
    }

    None
}

/// Interpret a JSON value as a refund amount.
///
/// Accepts numbers and numeric-looking strings (whitespace-trimmed).
/// Booleans, null, arrays, and objects do not coerce.
fn coerce_amount(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
