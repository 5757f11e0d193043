//! Scope analysis and constant hoisting for Python-style syntax trees.
//!
//! Two passes run over an arena-allocated [`ast::Ast`]:
//!
//! - [`Declarer`] records which names every module, function and class body
//!   binds, producing [`Scopes`].
//! - [`ConstantFinder`] replaces each numeric and string literal with a
//!   reference to a freshly generated name, and produces the assignments that
//!   bind those names.
//!
//! [`prepare`] runs both and splices the assignments into the module.

#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

extern crate alloc;

// Re-export for convenience so other modules don't need alloc:: prefix
#[allow(unused_imports)]
pub(crate) use alloc::{boxed::Box, format, string::String, string::ToString, vec, vec::Vec};

pub mod ast;
pub mod declarer;
pub mod dispatch;
pub mod errors;
pub mod hoister;
pub mod options;
pub mod pipeline;
pub mod scope_stack;
pub mod visitor;

pub use declarer::Declarer;
pub use dispatch::DispatchTable;
pub use errors::Error;
pub use hoister::{
    AssignmentManager, ConstantFinder, Declaration, DeclarationSource, HoistRecord, NameGenerator,
};
pub use options::HoistOptions;
pub use pipeline::{Prepared, prepare};
pub use scope_stack::{Binding, Frame, FrameKind, FrameStack, Scopes};
pub use visitor::Visitor;

#[cfg(test)]
pub mod test_utils {
    /// Route pass events to the test output; `RUST_LOG` overrides the `debug` default.
    pub fn init_test_logging() {
        use tracing_subscriber::{EnvFilter, fmt};

        // Several tests may call this; only the first subscriber sticks.
        let _ = fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    }
}
