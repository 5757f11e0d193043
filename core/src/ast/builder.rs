//! Convenience constructors for assembling an [`Ast`] by hand.
//!
//! Parsing source text is left to the caller; the builder is what tests and
//! embedders use to hand a tree to the passes.
//!
//! ```
//! use bumpalo::Bump;
//! use hoist_core::ast::AstBuilder;
//!
//! let arena = Bump::new();
//! let mut b = AstBuilder::new(&arena);
//! let target = b.store("x");
//! let one = b.int(1);
//! let assign = b.assign(&[target], one);
//! let ast = b.finish(&[assign]);
//!
//! assert_eq!(ast.unparse(), "x = 1\n");
//! ```

use bumpalo::Bump;

use super::node::{BinaryOp, ComparisonOp, ExprContext, Node, NodeId, Number, UnaryOp};
use super::tree::Ast;

pub struct AstBuilder<'a> {
    ast: Ast<'a>,
}

impl<'a> AstBuilder<'a> {
    pub fn new(arena: &'a Bump) -> Self {
        Self {
            ast: Ast::new(arena),
        }
    }

    /// Attach `body` to the root module and hand over the tree.
    pub fn finish(mut self, body: &[NodeId]) -> Ast<'a> {
        let body = self.ast.alloc_ids(body);
        let root = self.ast.root();
        *self.ast.node_mut(root) = Node::Module { body };
        self.ast
    }

    pub fn push(&mut self, node: Node<'a>) -> NodeId {
        self.ast.push(node)
    }

    fn ids(&self, ids: &[NodeId]) -> &'a [NodeId] {
        self.ast.alloc_ids(ids)
    }

    fn intern(&self, s: &str) -> &'a str {
        self.ast.alloc_str(s)
    }

    // === Expressions ===

    pub fn name(&mut self, id: &str, ctx: ExprContext) -> NodeId {
        let id = self.intern(id);
        self.push(Node::Name { id, ctx })
    }

    pub fn load(&mut self, id: &str) -> NodeId {
        self.name(id, ExprContext::Load)
    }

    pub fn store(&mut self, id: &str) -> NodeId {
        self.name(id, ExprContext::Store)
    }

    pub fn param(&mut self, id: &str) -> NodeId {
        self.name(id, ExprContext::Param)
    }

    pub fn int(&mut self, value: i64) -> NodeId {
        self.push(Node::Num(Number::Int(value)))
    }

    pub fn float(&mut self, value: f64) -> NodeId {
        self.push(Node::Num(Number::Float(value)))
    }

    pub fn string(&mut self, value: &str) -> NodeId {
        let value = self.intern(value);
        self.push(Node::Str(value))
    }

    pub fn bin_op(&mut self, left: NodeId, op: BinaryOp, right: NodeId) -> NodeId {
        self.push(Node::BinOp { left, op, right })
    }

    pub fn unary_op(&mut self, op: UnaryOp, operand: NodeId) -> NodeId {
        self.push(Node::UnaryOp { op, operand })
    }

    pub fn compare(&mut self, left: NodeId, op: ComparisonOp, right: NodeId) -> NodeId {
        self.push(Node::Compare { left, op, right })
    }

    pub fn call(&mut self, func: NodeId, args: &[NodeId]) -> NodeId {
        let args = self.ids(args);
        self.push(Node::Call { func, args })
    }

    pub fn attribute(&mut self, value: NodeId, attr: &str, ctx: ExprContext) -> NodeId {
        let attr = self.intern(attr);
        self.push(Node::Attribute { value, attr, ctx })
    }

    pub fn subscript(&mut self, value: NodeId, index: NodeId, ctx: ExprContext) -> NodeId {
        self.push(Node::Subscript { value, index, ctx })
    }

    pub fn list(&mut self, elts: &[NodeId], ctx: ExprContext) -> NodeId {
        let elts = self.ids(elts);
        self.push(Node::List { elts, ctx })
    }

    pub fn tuple(&mut self, elts: &[NodeId], ctx: ExprContext) -> NodeId {
        let elts = self.ids(elts);
        self.push(Node::Tuple { elts, ctx })
    }

    pub fn dict(&mut self, keys: &[NodeId], values: &[NodeId]) -> NodeId {
        debug_assert_eq!(keys.len(), values.len());
        let keys = self.ids(keys);
        let values = self.ids(values);
        self.push(Node::Dict { keys, values })
    }

    // === Statements ===

    pub fn arguments(&mut self, args: &[NodeId], defaults: &[NodeId]) -> NodeId {
        self.variadic_arguments(args, None, None, defaults)
    }

    pub fn variadic_arguments(
        &mut self,
        args: &[NodeId],
        vararg: Option<&str>,
        kwarg: Option<&str>,
        defaults: &[NodeId],
    ) -> NodeId {
        let args = self.ids(args);
        let defaults = self.ids(defaults);
        let vararg = vararg.map(|s| self.intern(s));
        let kwarg = kwarg.map(|s| self.intern(s));
        self.push(Node::Arguments {
            args,
            vararg,
            kwarg,
            defaults,
        })
    }

    pub fn function_def(&mut self, name: &str, args: NodeId, body: &[NodeId]) -> NodeId {
        self.decorated_function_def(name, args, body, &[])
    }

    pub fn decorated_function_def(
        &mut self,
        name: &str,
        args: NodeId,
        body: &[NodeId],
        decorators: &[NodeId],
    ) -> NodeId {
        let name = self.intern(name);
        let body = self.ids(body);
        let decorators = self.ids(decorators);
        self.push(Node::FunctionDef {
            name,
            args,
            body,
            decorators,
        })
    }

    pub fn class_def(&mut self, name: &str, bases: &[NodeId], body: &[NodeId]) -> NodeId {
        let name = self.intern(name);
        let bases = self.ids(bases);
        let body = self.ids(body);
        self.push(Node::ClassDef {
            name,
            bases,
            body,
            decorators: &[],
        })
    }

    pub fn ret(&mut self, value: Option<NodeId>) -> NodeId {
        self.push(Node::Return { value })
    }

    pub fn assign(&mut self, targets: &[NodeId], value: NodeId) -> NodeId {
        let targets = self.ids(targets);
        self.push(Node::Assign { targets, value })
    }

    pub fn aug_assign(&mut self, target: NodeId, op: BinaryOp, value: NodeId) -> NodeId {
        self.push(Node::AugAssign { target, op, value })
    }

    pub fn for_loop(
        &mut self,
        target: NodeId,
        iter: NodeId,
        body: &[NodeId],
        orelse: &[NodeId],
    ) -> NodeId {
        let body = self.ids(body);
        let orelse = self.ids(orelse);
        self.push(Node::For {
            target,
            iter,
            body,
            orelse,
        })
    }

    pub fn while_loop(&mut self, test: NodeId, body: &[NodeId], orelse: &[NodeId]) -> NodeId {
        let body = self.ids(body);
        let orelse = self.ids(orelse);
        self.push(Node::While { test, body, orelse })
    }

    pub fn if_stmt(&mut self, test: NodeId, body: &[NodeId], orelse: &[NodeId]) -> NodeId {
        let body = self.ids(body);
        let orelse = self.ids(orelse);
        self.push(Node::If { test, body, orelse })
    }

    fn aliases(&mut self, names: &[(&str, Option<&str>)]) -> &'a [NodeId] {
        let ids: crate::Vec<NodeId> = names
            .iter()
            .map(|&(name, asname)| {
                let name = self.intern(name);
                let asname = asname.map(|s| self.intern(s));
                self.push(Node::Alias { name, asname })
            })
            .collect();
        self.ids(&ids)
    }

    /// `import name [as asname], ...`
    pub fn import(&mut self, names: &[(&str, Option<&str>)]) -> NodeId {
        let names = self.aliases(names);
        self.push(Node::Import { names })
    }

    /// `from module import name [as asname], ...`
    pub fn import_from(
        &mut self,
        module: Option<&str>,
        names: &[(&str, Option<&str>)],
        level: u32,
    ) -> NodeId {
        let module = module.map(|s| self.intern(s));
        let names = self.aliases(names);
        self.push(Node::ImportFrom {
            module,
            names,
            level,
        })
    }

    pub fn global(&mut self, names: &[&str]) -> NodeId {
        let arena = self.ast.arena();
        let names: &'a [&'a str] =
            arena.alloc_slice_fill_iter(names.iter().map(|s| &*arena.alloc_str(s)));
        self.push(Node::Global { names })
    }

    pub fn expr(&mut self, value: NodeId) -> NodeId {
        self.push(Node::Expr { value })
    }

    pub fn pass(&mut self) -> NodeId {
        self.push(Node::Pass)
    }

    pub fn break_stmt(&mut self) -> NodeId {
        self.push(Node::Break)
    }

    pub fn continue_stmt(&mut self) -> NodeId {
        self.push(Node::Continue)
    }
}
