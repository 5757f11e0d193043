//! Literal hoisting.
//!
//! Every numeric or string literal is replaced by a reference to a fresh name,
//! and the literal itself becomes the value of a `name = literal` statement
//! that the caller places ahead of the rewritten code.

mod assignments;
mod constant_finder;
mod names;

pub use assignments::{AssignmentManager, HoistRecord};
pub use constant_finder::ConstantFinder;
pub use names::{Declaration, DeclarationSource, NameGenerator};
