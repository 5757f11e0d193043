//! Hoist - scope analysis and constant hoisting for Python-style trees
//!
//! # Overview
//!
//! Hoist prepares a parsed module for code generation in two passes:
//!
//! - **Scope analysis** records, for every module, function and class body,
//!   which names the body binds and which of them were declared `global`.
//! - **Constant hoisting** replaces every numeric and string literal with a
//!   reference to a generated name and binds those names at the top of the
//!   module.
//!
//! # Quick Start
//!
//! ```
//! use hoist::{Bump, HoistOptions, prepare};
//! use hoist::ast::AstBuilder;
//!
//! // Trees live in an arena owned by the caller
//! let arena = Bump::new();
//! let mut b = AstBuilder::new(&arena);
//!
//! // def scale(x): return x * 10
//! let x = b.param("x");
//! let args = b.arguments(&[x], &[]);
//! let x_load = b.load("x");
//! let ten = b.int(10);
//! let product = b.bin_op(x_load, hoist::ast::BinaryOp::Mult, ten);
//! let ret = b.ret(Some(product));
//! let scale = b.function_def("scale", args, &[ret]);
//! let mut ast = b.finish(&[scale]);
//!
//! let prepared = prepare(&mut ast, &HoistOptions::default()).unwrap();
//!
//! let frame = prepared.scopes.get(scale).unwrap();
//! assert_eq!(frame.names().collect::<Vec<_>>(), vec!["x"]);
//! assert_eq!(ast.unparse(), "_c0 = 10\ndef scale(x):\n    return x * _c0\n");
//! ```
//!
//! # Running the passes separately
//!
//! [`Declarer`] and [`ConstantFinder`] can be driven on their own. The
//! constant finder takes any [`DeclarationSource`], so callers control how
//! generated names are spelled.

pub use bumpalo::Bump;

pub use hoist_core::{ast, dispatch, visitor};
pub use hoist_core::{
    AssignmentManager, Binding, ConstantFinder, Declaration, DeclarationSource, Declarer,
    DispatchTable, Error, Frame, FrameKind, FrameStack, HoistOptions, HoistRecord, NameGenerator,
    Prepared, Scopes, Visitor, prepare,
};
