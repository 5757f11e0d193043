use crate::Vec;
use crate::ast::{Ast, ExprContext, Node, NodeId};

/// A literal that was replaced by a reference to `name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoistRecord<'a> {
    pub name: &'a str,
    /// The original literal node, detached from its former parent.
    pub node: NodeId,
}

/// Collects `(name, literal)` pairs and turns them into assignments.
#[derive(Debug, Default)]
pub struct AssignmentManager<'a> {
    records: Vec<HoistRecord<'a>>,
}

impl<'a> AssignmentManager<'a> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn add_assignment(&mut self, name: &'a str, node: NodeId) {
        self.records.push(HoistRecord { name, node });
    }

    pub fn records(&self) -> &[HoistRecord<'a>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Build one `name = literal` statement per record, in record order.
    ///
    /// Each literal node becomes the right-hand side of its assignment.
    pub fn into_assign_nodes(self, ast: &mut Ast<'a>) -> Vec<NodeId> {
        self.records
            .into_iter()
            .map(|record| {
                let target = ast.push(Node::Name {
                    id: record.name,
                    ctx: ExprContext::Store,
                });
                let targets = ast.alloc_ids(&[target]);
                ast.push(Node::Assign {
                    targets,
                    value: record.node,
                })
            })
            .collect()
    }
}
