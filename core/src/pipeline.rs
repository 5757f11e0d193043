//! The two passes run back to back on one module.

use crate::Vec;
use crate::ast::{Ast, Node, NodeId};
use crate::declarer::Declarer;
use crate::errors::Error;
use crate::hoister::{ConstantFinder, HoistRecord, NameGenerator};
use crate::options::HoistOptions;
use crate::scope_stack::Scopes;

/// Result of [`prepare`].
#[derive(Debug)]
pub struct Prepared<'a> {
    /// Bindings of every scope in the module, as seen before hoisting.
    pub scopes: Scopes<'a>,
    /// One record per hoisted literal, in hoist order.
    pub hoisted: Vec<HoistRecord<'a>>,
    /// The `name = literal` statements now at the head of the module body.
    pub prologue: Vec<NodeId>,
}

/// Analyze scopes, then hoist every literal of the module.
///
/// Generated names never collide with a name that is bound or referenced
/// anywhere in the module. When at least one literal was hoisted, the
/// assignments binding the generated names are prepended to the module body.
///
/// # Example
///
/// ```
/// use bumpalo::Bump;
/// use hoist_core::ast::AstBuilder;
/// use hoist_core::{HoistOptions, prepare};
///
/// let arena = Bump::new();
/// let mut b = AstBuilder::new(&arena);
/// let target = b.store("greeting");
/// let hello = b.string("hello");
/// let assign = b.assign(&[target], hello);
/// let mut ast = b.finish(&[assign]);
///
/// let prepared = prepare(&mut ast, &HoistOptions::default()).unwrap();
/// assert_eq!(prepared.hoisted.len(), 1);
/// assert_eq!(ast.unparse(), "_c0 = 'hello'\ngreeting = _c0\n");
/// ```
pub fn prepare<'a>(ast: &mut Ast<'a>, options: &HoistOptions) -> Result<Prepared<'a>, Error> {
    let scopes = Declarer::new(ast.arena())?.run(ast)?;

    let mut names = NameGenerator::new(ast.arena(), options);
    names.reserve(scopes.names()).reserve(referenced_names(ast));

    let mut finder = ConstantFinder::new(&mut names)?;
    let hoisted = finder.run(ast)?.to_vec();
    let prologue = finder.into_assignments(ast);
    if !prologue.is_empty() {
        ast.prepend_to_module(&prologue);
    }

    tracing::debug!(
        frames = scopes.len(),
        hoisted = hoisted.len(),
        "module prepared"
    );
    Ok(Prepared {
        scopes,
        hoisted,
        prologue,
    })
}

fn referenced_names<'a>(ast: &Ast<'a>) -> Vec<&'a str> {
    ast.preorder(ast.root())
        .into_iter()
        .filter_map(|id| match *ast.node(id) {
            Node::Name { id, .. } => Some(id),
            _ => None,
        })
        .collect()
}
