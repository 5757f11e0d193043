//! Generic traversal over an [`Ast`].
//!
//! Passes implement [`Visitor`] and override [`Visitor::visit`] to intercept
//! the node kinds they care about, falling back to [`Visitor::super_visit`]
//! to recurse into children. The visitor holds exclusive access to the tree
//! for the duration of the walk, so handlers may rewrite the node they are
//! visiting.

use crate::ast::{Ast, NodeId};

/// Trait for walking (and possibly rewriting) a syntax tree.
///
/// # Example
///
/// ```
/// use bumpalo::Bump;
/// use hoist_core::ast::{Ast, AstBuilder, NodeId, NodeKind};
/// use hoist_core::visitor::Visitor;
///
/// struct NameCounter {
///     count: usize,
/// }
///
/// impl<'a> Visitor<'a> for NameCounter {
///     type Error = core::convert::Infallible;
///
///     fn visit(&mut self, ast: &mut Ast<'a>, id: NodeId) -> Result<(), Self::Error> {
///         if ast.kind(id) == NodeKind::Name {
///             self.count += 1;
///         }
///         self.super_visit(ast, id)
///     }
/// }
///
/// let arena = Bump::new();
/// let mut b = AstBuilder::new(&arena);
/// let f = b.load("f");
/// let x = b.load("x");
/// let call = b.call(f, &[x]);
/// let stmt = b.expr(call);
/// let mut ast = b.finish(&[stmt]);
///
/// let mut counter = NameCounter { count: 0 };
/// let root = ast.root();
/// counter.visit(&mut ast, root).unwrap();
/// assert_eq!(counter.count, 2);
/// ```
pub trait Visitor<'a> {
    type Error;

    /// Visit a node.
    ///
    /// Override this to customize behavior. Call `super_visit` to recurse
    /// into the node's children.
    fn visit(&mut self, ast: &mut Ast<'a>, id: NodeId) -> Result<(), Self::Error> {
        self.super_visit(ast, id)
    }

    /// Visit every child of `id`, left to right in grammar field order.
    ///
    /// Override `visit` instead of this method.
    fn super_visit(&mut self, ast: &mut Ast<'a>, id: NodeId) -> Result<(), Self::Error> {
        for child in ast.children(id) {
            self.visit(ast, child)?;
        }
        Ok(())
    }
}
