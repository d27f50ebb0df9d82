//! `policy` — the sentineld audit decision engine.
//!
//! Everything that turns a parsed payload into an APPROVED/BLOCKED verdict
//! lives here:
//!
//! - **Rules** — the immutable policy value: banned phrases, refund field
//!   aliases, and the refund threshold.
//! - **Keyword scanner** — flattens the payload into one searchable string
//!   and tests it against the banned-phrase list.
//! - **Refund limit** — inspects refund-like fields against the numeric
//!   business threshold.
//! - **Engine** — the decision composer: runs both checks in a fixed priority
//!   order and returns the first violation found.
//!
//! The engine performs no I/O and holds no mutable state; every audit is a
//! pure function of the payload and the policy.

pub mod engine;
pub mod limits;
pub mod rules;
pub mod scan;

// ─── Top-level re-exports ─────────────────────────────────────────────────────

pub use engine::{AuditEngine, Verdict};
pub use rules::AuditPolicy;
