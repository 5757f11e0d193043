use crate::ast::{NodeId, NodeKind};

/// Failures raised by the passes.
///
/// None of these are user errors: they mean the tree contains a node kind the
/// passes were not taught about, or the passes were wired up incorrectly. A
/// pass that returns an error leaves the tree partially rewritten.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An assignment or loop target has no declaration handler.
    #[error("no declaration handler for target {node} of kind {kind}")]
    UnhandledTarget { kind: NodeKind, node: NodeId },

    /// An alias was requested for a kind that has no handler of its own.
    #[error("cannot alias to {primary}: no handler registered for it")]
    UnregisteredAlias { primary: NodeKind },

    /// A frame was requested while no scope was active.
    #[error("frame stack is empty")]
    EmptyFrameStack,

    /// A node of the wrong kind sits where the grammar requires another.
    #[error("expected {expected} at {node}, found {found}")]
    UnexpectedNode {
        expected: NodeKind,
        found: NodeKind,
        node: NodeId,
    },
}
