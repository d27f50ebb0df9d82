//! Decision composer — the single external entry point of the audit engine.
//!
//! Runs the keyword scanner, then the refund-limit rule, in a fixed priority
//! order and returns the first violation found. Pure computation over the
//! in-memory payload: no I/O, no shared mutable state, so any number of
//! audits may run concurrently over the same shared policy.

use std::sync::Arc;

use serde_json::Value;

use super::rules::AuditPolicy;
use super::{limits, scan};

// ─── Verdict ──────────────────────────────────────────────────────────────────

/// The engine's output: one of exactly two terminal outcomes, produced fresh
/// per call.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Approved,
    /// The payload violated policy; `reason` names the triggering phrase or
    /// the offending amount.
    Blocked { reason: String },
}

impl Verdict {
    pub fn is_blocked(&self) -> bool {
        matches!(self, Verdict::Blocked { .. })
    }

    /// The block reason, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Verdict::Blocked { reason } => Some(reason),
            Verdict::Approved => None,
        }
    }
}

// ─── Engine ───────────────────────────────────────────────────────────────────

/// Stateless audit engine over a shared immutable policy.
#[derive(Debug, Clone)]
pub struct AuditEngine {
    policy: Arc<AuditPolicy>,
}

impl AuditEngine {
    pub fn new(policy: Arc<AuditPolicy>) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &AuditPolicy {
        &self.policy
    }

    /// Audit a parsed payload.
    ///
    /// Total over any well-formed JSON value — the only possible outcomes are
    /// `Approved` and `Blocked`; the engine never errors. Checks run in fixed
    /// order and stop at the first violation: banned keywords take priority
    /// over the refund limit.
    pub fn audit(&self, payload: &Value) -> Verdict {
        if let Some(phrase) = scan::find_banned_phrase(payload, &self.policy.banned_phrases) {
            return Verdict::Blocked {
                reason: format!("Banned keyword detected: \"{phrase}\""),
            };
        }

        if let Some(amount) = limits::evaluate_refund_limit(
            payload,
            &self.policy.refund_fields,
            self.policy.max_refund_amount,
        ) {
            return Verdict::Blocked {
                reason: format!(
                    "Refund amount ${amount:.2} exceeds maximum of ${max}",
                    max = self.policy.max_refund_amount
                ),
            };
        }

        Verdict::Approved
    }
}
