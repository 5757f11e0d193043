use crate::Vec;
use crate::ast::{Ast, ExprContext, Node, NodeId, NodeKind};
use crate::dispatch::DispatchTable;
use crate::errors::Error;
use crate::visitor::Visitor;

use super::assignments::{AssignmentManager, HoistRecord};
use super::names::{Declaration, DeclarationSource};

type Handler<'a, 'g> = fn(&mut ConstantFinder<'a, 'g>, &mut Ast<'a>, NodeId) -> Result<(), Error>;

/// Replaces every literal in a tree with a reference to a generated name.
///
/// Literals are recorded in pre-order, left to right. Once the walk is done,
/// [`ConstantFinder::into_assignments`] turns the records into the statements
/// that bind the generated names to the original literals.
pub struct ConstantFinder<'a, 'g> {
    names: &'g mut dyn DeclarationSource<'a>,
    assignments: AssignmentManager<'a>,
    visitors: DispatchTable<Handler<'a, 'g>>,
}

impl<'a, 'g> ConstantFinder<'a, 'g> {
    pub fn new(names: &'g mut dyn DeclarationSource<'a>) -> Result<Self, Error> {
        let mut visitors: DispatchTable<Handler<'a, 'g>> = DispatchTable::new();
        visitors
            .register(NodeKind::Num, Self::visit_literal)
            .alias(NodeKind::Num, &[NodeKind::Str])?;

        Ok(Self {
            names,
            assignments: AssignmentManager::new(),
            visitors,
        })
    }

    /// Rewrite every literal reachable from the root of `ast`.
    pub fn run(&mut self, ast: &mut Ast<'a>) -> Result<&[HoistRecord<'a>], Error> {
        let root = ast.root();
        self.visit(ast, root)?;
        tracing::debug!(hoisted = self.assignments.len(), "constant hoisting finished");
        Ok(self.assignments.records())
    }

    /// True once at least one literal has been hoisted.
    pub fn has_constants(&self) -> bool {
        !self.assignments.is_empty()
    }

    pub fn records(&self) -> &[HoistRecord<'a>] {
        self.assignments.records()
    }

    /// The `name = literal` statements for every hoisted literal, in hoist order.
    ///
    /// The statements are added to the node table but not attached anywhere;
    /// the caller decides where the prologue goes.
    pub fn into_assignments(self, ast: &mut Ast<'a>) -> Vec<NodeId> {
        self.assignments.into_assign_nodes(ast)
    }

    fn visit_literal(&mut self, ast: &mut Ast<'a>, id: NodeId) -> Result<(), Error> {
        let Declaration { name } = self.names.next_declaration();
        let reference = Node::Name {
            id: name,
            ctx: ExprContext::Load,
        };
        let literal = ast.replace(id, reference);
        tracing::trace!(generated = name, node = %id, "hoisted literal");
        self.assignments.add_assignment(name, literal);
        Ok(())
    }
}

impl<'a, 'g> Visitor<'a> for ConstantFinder<'a, 'g> {
    type Error = Error;

    fn visit(&mut self, ast: &mut Ast<'a>, id: NodeId) -> Result<(), Error> {
        match self.visitors.get(ast.kind(id)) {
            Some(handler) => handler(self, ast, id),
            None => self.super_visit(ast, id),
        }
    }
}
