//! Syntax tree consumed and rewritten by the passes.
//!
//! The tree is an arena of [`Node`]s addressed by [`NodeId`]. Identifier text
//! and child lists are allocated in a [`bumpalo::Bump`]; the node table itself
//! is owned by [`Ast`] so that passes can overwrite a node in place.

mod builder;
mod display;
mod node;
mod tree;

pub use builder::AstBuilder;
pub use node::{BinaryOp, ComparisonOp, ExprContext, Node, NodeId, NodeKind, Number, UnaryOp};
pub use tree::{Ast, Children};
