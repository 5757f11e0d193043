use bumpalo::Bump;
use smallvec::SmallVec;

use super::node::{Node, NodeId, NodeKind};
use crate::{Vec, vec};

/// Children of a node, in grammar field order.
pub type Children = SmallVec<[NodeId; 4]>;

/// Arena-backed syntax tree.
///
/// Nodes are stored in a flat table and addressed by [`NodeId`]. Passes get
/// exclusive access through `&mut Ast`, so replacing a node in its parent slot
/// is a plain write to the table: the parent keeps the same id and observes
/// the new node.
#[derive(Debug)]
pub struct Ast<'a> {
    arena: &'a Bump,
    nodes: Vec<Node<'a>>,
    root: NodeId,
}

impl<'a> Ast<'a> {
    /// Create a tree whose root module has an empty body.
    pub fn new(arena: &'a Bump) -> Self {
        Self {
            arena,
            nodes: vec![Node::Module { body: &[] }],
            root: NodeId(0),
        }
    }

    pub fn arena(&self) -> &'a Bump {
        self.arena
    }

    /// The root `Module` node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append a node to the table without attaching it anywhere.
    pub fn push(&mut self, node: Node<'a>) -> NodeId {
        debug_assert!(self.nodes.len() < u32::MAX as usize);
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn node(&self, id: NodeId) -> &Node<'a> {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node<'a> {
        &mut self.nodes[id.index()]
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.node(id).kind()
    }

    /// Put `node` at `id` and move the previous occupant to a fresh slot.
    ///
    /// Returns the new id of the previous node, which is no longer referenced
    /// by its former parent.
    pub fn replace(&mut self, id: NodeId, node: Node<'a>) -> NodeId {
        let old = core::mem::replace(&mut self.nodes[id.index()], node);
        self.push(old)
    }

    pub fn alloc_str(&self, s: &str) -> &'a str {
        self.arena.alloc_str(s)
    }

    pub fn alloc_ids(&self, ids: &[NodeId]) -> &'a [NodeId] {
        self.arena.alloc_slice_copy(ids)
    }

    /// Insert `prologue` at the front of the root module body.
    pub fn prepend_to_module(&mut self, prologue: &[NodeId]) {
        let root = self.root;
        if let Node::Module { body } = *self.node(root) {
            let mut combined = Vec::with_capacity(prologue.len() + body.len());
            combined.extend_from_slice(prologue);
            combined.extend_from_slice(body);
            let body = self.alloc_ids(&combined);
            *self.node_mut(root) = Node::Module { body };
        }
    }

    /// Direct children of `id`, in grammar field order.
    pub fn children(&self, id: NodeId) -> Children {
        let mut out = Children::new();
        match *self.node(id) {
            Node::Module { body } => out.extend_from_slice(body),
            Node::FunctionDef {
                args,
                body,
                decorators,
                ..
            } => {
                out.push(args);
                out.extend_from_slice(body);
                out.extend_from_slice(decorators);
            }
            Node::ClassDef {
                bases,
                body,
                decorators,
                ..
            } => {
                out.extend_from_slice(bases);
                out.extend_from_slice(body);
                out.extend_from_slice(decorators);
            }
            Node::Arguments { args, defaults, .. } => {
                out.extend_from_slice(args);
                out.extend_from_slice(defaults);
            }
            Node::Return { value } => out.extend(value),
            Node::Assign { targets, value } => {
                out.extend_from_slice(targets);
                out.push(value);
            }
            Node::AugAssign { target, value, .. } => {
                out.push(target);
                out.push(value);
            }
            Node::For {
                target,
                iter,
                body,
                orelse,
            } => {
                out.push(target);
                out.push(iter);
                out.extend_from_slice(body);
                out.extend_from_slice(orelse);
            }
            Node::While { test, body, orelse } | Node::If { test, body, orelse } => {
                out.push(test);
                out.extend_from_slice(body);
                out.extend_from_slice(orelse);
            }
            Node::Import { names } | Node::ImportFrom { names, .. } => {
                out.extend_from_slice(names)
            }
            Node::Expr { value } => out.push(value),
            Node::BinOp { left, right, .. } | Node::Compare { left, right, .. } => {
                out.push(left);
                out.push(right);
            }
            Node::UnaryOp { operand, .. } => out.push(operand),
            Node::Call { func, args } => {
                out.push(func);
                out.extend_from_slice(args);
            }
            Node::Attribute { value, .. } => out.push(value),
            Node::Subscript { value, index, .. } => {
                out.push(value);
                out.push(index);
            }
            Node::List { elts, .. } | Node::Tuple { elts, .. } => out.extend_from_slice(elts),
            Node::Dict { keys, values } => {
                out.extend_from_slice(keys);
                out.extend_from_slice(values);
            }
            Node::Alias { .. }
            | Node::Global { .. }
            | Node::Pass
            | Node::Break
            | Node::Continue
            | Node::Name { .. }
            | Node::Num(_)
            | Node::Str(_) => {}
        }
        out
    }

    /// Every node reachable from `id`, in pre-order, left to right.
    pub fn preorder(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).into_iter().rev());
        }
        out
    }
}
