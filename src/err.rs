//! Error handling.
//!
//! Per §7, the overwhelming majority of this crate's API is infallible by construction: tree
//! mutations either succeed, are benign no-ops that return silently, or hit an invariant
//! violation that gets logged at `error!` and otherwise ignored, because a correct caller can
//! never trigger one. Those are modeled with plain `bool`/`Option` returns and the
//! [`assert_invariant`] helper below, not `Result`.
//!
//! A handful of call sites are different: they can fail for reasons external callers legitimately
//! need to branch on (a stale id, an output with no usable geometry yet). Those return
//! `Result<_, CoreError>`.

use crate::ids::NodeId;

/// Errors from the small set of genuinely fallible entry points.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreError {
    /// The given id does not resolve to a node in this tree, most likely because its subtree was
    /// destroyed after the id was obtained.
    #[error("node {0:?} is not present in this tree")]
    StaleNode(NodeId),

    /// The node is not of the kind the operation requires (e.g. attaching a `Workspace` directly
    /// under `Root`).
    #[error("node {0:?} has an unexpected kind for this operation")]
    WrongKind(NodeId),

    /// An `Output` was asked to arrange before it has a usable resolution.
    #[error("output {0:?} has no usable geometry yet")]
    OutputNotReady(NodeId),
}

/// Log an invariant violation at `error!` and return `false`/`None`-shaped failure to the caller
/// without mutating anything. Centralizes the "this must never happen in a correct caller"
/// discipline from §7 so call sites read as a single line instead of a repeated `log::error!`.
pub fn assert_invariant(condition: bool, message: &str) -> bool {
    if !condition {
        log::error!("invariant violation: {}", message);
    }
    condition
}
