//! Audit policy definitions — banned phrases, refund field aliases, and the
//! refund threshold.
//!
//! `AuditPolicy` is loaded once at daemon start from `{data_dir}/policy.json`
//! (if it exists) and falls back to `AuditPolicy::default_rules()` for any
//! field the file omits. After startup the policy is shared behind an `Arc`
//! and never written again — audits only read it.

use std::path::Path;

use serde::Deserialize;
use tracing::warn;

// ─── Policy value ─────────────────────────────────────────────────────────────

/// The immutable rule set governing audit decisions.
#[derive(Debug, Clone)]
pub struct AuditPolicy {
    /// Banned phrases, matched case-insensitively in list order. When several
    /// phrases appear in a payload, the earliest one in this list is reported.
    pub banned_phrases: Vec<String>,
    /// Candidate field names treated as aliases for the refund amount,
    /// checked in order.
    pub refund_fields: Vec<String>,
    /// Refund amounts strictly greater than this are blocked.
    pub max_refund_amount: f64,
}

/// JSON shape expected in `policy.json`. Every field is optional — absent
/// fields keep their built-in defaults.
#[derive(Debug, Deserialize)]
struct PolicyFile {
    #[serde(default)]
    banned_phrases: Option<Vec<String>>,
    #[serde(default)]
    refund_fields: Option<Vec<String>>,
    #[serde(default)]
    max_refund_amount: Option<f64>,
}

impl AuditPolicy {
    /// Compiled-in default rules.
    ///
    /// List order is part of the contract: the scanner reports the first
    /// matching phrase in this order, and the refund evaluator tries field
    /// aliases in this order.
    pub fn default_rules() -> Self {
        let banned_phrases = [
            // Destructive SQL fragments.
            "DROP TABLE",
            "DELETE FROM",
            // High-value refunds require manual review.
            "refund > 500",
            // Escalate hostile customer interactions.
            "angry",
            "unauthorized",
            // Code-injection fragments.
            "exec(",
            "eval(",
            "wasting our time",
            "shut up",
            "idiot",
        ];

        Self {
            banned_phrases: banned_phrases.iter().map(|s| s.to_string()).collect(),
            refund_fields: ["refund_amount", "refund", "amount"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_refund_amount: 500.0,
        }
    }

    /// Load a policy from a JSON file.
    ///
    /// Missing or malformed files emit a warning and return the default
    /// rules. Fields absent from the file keep their default values, so a
    /// deployment can override just the threshold without restating the
    /// phrase list.
    pub fn load_from_json(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                warn!(path = %path.display(), err = %e, "policy.json not found — using defaults");
                return Self::default_rules();
            }
        };

        let file: PolicyFile = match serde_json::from_str(&content) {
            Ok(f) => f,
            Err(e) => {
                warn!(err = %e, "policy.json parse error — using defaults");
                return Self::default_rules();
            }
        };

        let mut policy = Self::default_rules();
        if let Some(phrases) = file.banned_phrases {
            policy.banned_phrases = phrases;
        }
        if let Some(fields) = file.refund_fields {
            policy.refund_fields = fields;
        }
        if let Some(max) = file.max_refund_amount {
            policy.max_refund_amount = max;
        }

        policy
    }
}
