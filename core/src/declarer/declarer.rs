use alloc::collections::VecDeque;
use bumpalo::Bump;

use crate::ast::{Ast, ExprContext, Node, NodeId, NodeKind};
use crate::dispatch::DispatchTable;
use crate::errors::Error;
use crate::scope_stack::{Frame, FrameKind, FrameStack, Scopes};
use crate::visitor::Visitor;

type Handler<'a> = fn(&mut Declarer<'a>, &mut Ast<'a>, NodeId) -> Result<(), Error>;

/// Builds the [`Scopes`] of a module.
///
/// Two handler tables drive the walk. `visitors` reacts to statements that
/// bind names while traversing; `declarers` knows how to bind the names found
/// in an assignment or loop target. Target kinds missing from `declarers`
/// are reported as [`Error::UnhandledTarget`].
///
/// The walk normalizes `import m` into `import m as m`, so the tree is taken
/// mutably.
pub struct Declarer<'a> {
    arena: &'a Bump,
    stack: FrameStack<'a>,
    queue: VecDeque<(NodeId, Frame<'a>)>,
    visitors: DispatchTable<Handler<'a>>,
    declarers: DispatchTable<Handler<'a>>,
}

impl<'a> Declarer<'a> {
    pub fn new(arena: &'a Bump) -> Result<Self, Error> {
        let mut visitors: DispatchTable<Handler<'a>> = DispatchTable::new();
        visitors
            .register(NodeKind::Arguments, Self::visit_arguments)
            .register(NodeKind::Assign, Self::visit_assign)
            .register(NodeKind::ClassDef, Self::visit_definition)
            .register(NodeKind::Import, Self::visit_import)
            .register(NodeKind::For, Self::visit_for)
            .register(NodeKind::Global, Self::visit_global)
            .alias(NodeKind::ClassDef, &[NodeKind::FunctionDef])?
            .alias(NodeKind::Import, &[NodeKind::ImportFrom])?;

        let mut declarers: DispatchTable<Handler<'a>> = DispatchTable::new();
        declarers
            .register(NodeKind::Name, Self::declare_name)
            .register(NodeKind::Subscript, Self::declare_subscript)
            .register(NodeKind::Tuple, Self::declare_sequence)
            .alias(NodeKind::Subscript, &[NodeKind::Attribute])?
            .alias(NodeKind::Tuple, &[NodeKind::List])?;

        Ok(Self {
            arena,
            stack: FrameStack::new(arena),
            queue: VecDeque::new(),
            visitors,
            declarers,
        })
    }

    /// Analyze the module rooted at `ast.root()`.
    ///
    /// Frames appear in the result in the order their bodies were traversed:
    /// the module first, then each nesting level in source order.
    pub fn run(mut self, ast: &mut Ast<'a>) -> Result<Scopes<'a>, Error> {
        let root = ast.root();
        let module = Frame::new(self.arena, root, FrameKind::Module, None);
        self.queue.push_back((root, module));

        let mut scopes = Scopes::new();
        while let Some((owner, frame)) = self.queue.pop_front() {
            self.stack.enter(frame);
            self.super_visit(ast, owner)?;
            let frame = self.stack.pop()?;
            debug_assert!(self.stack.is_empty());
            tracing::trace!(owner = %owner, bindings = frame.len(), "frame complete");
            scopes.insert(frame);
        }

        tracing::debug!(frames = scopes.len(), "scope analysis finished");
        Ok(scopes)
    }

    fn declare(&mut self, name: &'a str, is_global: bool) -> Result<(), Error> {
        tracing::trace!(ident = name, is_global, "declare");
        self.stack.current()?.declare(name, is_global);
        Ok(())
    }

    /// Bind every name a target expression assigns to.
    fn declare_target(&mut self, ast: &mut Ast<'a>, target: NodeId) -> Result<(), Error> {
        let kind = ast.kind(target);
        let handler = self
            .declarers
            .get(kind)
            .ok_or(Error::UnhandledTarget { kind, node: target })?;
        handler(self, ast, target)
    }

    // ------------------------------------------------------------------------
    // Statement handlers
    // ------------------------------------------------------------------------

    fn visit_arguments(&mut self, ast: &mut Ast<'a>, id: NodeId) -> Result<(), Error> {
        let Node::Arguments {
            args,
            vararg,
            kwarg,
            ..
        } = *ast.node(id)
        else {
            return Err(unexpected(ast, id, NodeKind::Arguments));
        };
        for &arg in args {
            if let Node::Name {
                id: name,
                ctx: ExprContext::Param,
            } = *ast.node(arg)
            {
                self.declare(name, false)?;
            }
        }
        for name in vararg.into_iter().chain(kwarg) {
            self.declare(name, false)?;
        }
        Ok(())
    }

    fn visit_assign(&mut self, ast: &mut Ast<'a>, id: NodeId) -> Result<(), Error> {
        let Node::Assign { targets, .. } = *ast.node(id) else {
            return Err(unexpected(ast, id, NodeKind::Assign));
        };
        for &target in targets {
            self.declare_target(ast, target)?;
        }
        self.super_visit(ast, id)
    }

    /// Bind the definition's name, open its frame with the parameters bound,
    /// and queue the body for later.
    fn visit_definition(&mut self, ast: &mut Ast<'a>, id: NodeId) -> Result<(), Error> {
        let (name, kind, params) = match *ast.node(id) {
            Node::FunctionDef { name, args, .. } => (name, FrameKind::Function, Some(args)),
            Node::ClassDef { name, .. } => (name, FrameKind::Class, None),
            _ => return Err(unexpected(ast, id, NodeKind::FunctionDef)),
        };
        self.declare(name, false)?;

        self.stack.push(id, kind);
        if let Some(params) = params {
            let Node::Arguments { args, .. } = *ast.node(params) else {
                return Err(unexpected(ast, params, NodeKind::Arguments));
            };
            for &arg in args {
                self.declare_target(ast, arg)?;
            }
        }
        let frame = self.stack.pop()?;

        tracing::trace!(owner = %id, kind = ?kind, "deferring body");
        self.queue.push_back((id, frame));
        Ok(())
    }

    /// `import a` is rewritten to `import a as a`; `import a.b` binds `a`;
    /// `from m import *` binds nothing.
    fn visit_import(&mut self, ast: &mut Ast<'a>, id: NodeId) -> Result<(), Error> {
        let names = match *ast.node(id) {
            Node::Import { names } | Node::ImportFrom { names, .. } => names,
            _ => return Err(unexpected(ast, id, NodeKind::Import)),
        };
        for &alias in names {
            let Node::Alias { name, asname } = *ast.node(alias) else {
                return Err(unexpected(ast, alias, NodeKind::Alias));
            };
            let bound = match asname {
                Some(asname) => asname,
                None if name == "*" => continue,
                None => match name.split_once('.') {
                    Some((package, _)) => package,
                    None => {
                        *ast.node_mut(alias) = Node::Alias {
                            name,
                            asname: Some(name),
                        };
                        name
                    }
                },
            };
            self.declare(bound, false)?;
        }
        Ok(())
    }

    fn visit_for(&mut self, ast: &mut Ast<'a>, id: NodeId) -> Result<(), Error> {
        let Node::For { target, .. } = *ast.node(id) else {
            return Err(unexpected(ast, id, NodeKind::For));
        };
        self.declare_target(ast, target)?;
        self.super_visit(ast, id)
    }

    fn visit_global(&mut self, ast: &mut Ast<'a>, id: NodeId) -> Result<(), Error> {
        let Node::Global { names } = *ast.node(id) else {
            return Err(unexpected(ast, id, NodeKind::Global));
        };
        for &name in names {
            self.declare(name, true)?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Target handlers
    // ------------------------------------------------------------------------

    fn declare_name(&mut self, ast: &mut Ast<'a>, target: NodeId) -> Result<(), Error> {
        let Node::Name { id: name, .. } = *ast.node(target) else {
            return Err(unexpected(ast, target, NodeKind::Name));
        };
        self.declare(name, false)
    }

    /// `x[i] = ...` and `x.attr = ...` bind nothing; their operands are
    /// ordinary expressions.
    fn declare_subscript(&mut self, ast: &mut Ast<'a>, target: NodeId) -> Result<(), Error> {
        self.super_visit(ast, target)
    }

    fn declare_sequence(&mut self, ast: &mut Ast<'a>, target: NodeId) -> Result<(), Error> {
        let elts = match *ast.node(target) {
            Node::Tuple { elts, .. } | Node::List { elts, .. } => elts,
            _ => return Err(unexpected(ast, target, NodeKind::Tuple)),
        };
        for &elt in elts {
            self.declare_target(ast, elt)?;
        }
        Ok(())
    }
}

fn unexpected(ast: &Ast<'_>, node: NodeId, expected: NodeKind) -> Error {
    Error::UnexpectedNode {
        expected,
        found: ast.kind(node),
        node,
    }
}

impl<'a> Visitor<'a> for Declarer<'a> {
    type Error = Error;

    fn visit(&mut self, ast: &mut Ast<'a>, id: NodeId) -> Result<(), Error> {
        match self.visitors.get(ast.kind(id)) {
            Some(handler) => handler(self, ast, id),
            None => self.super_visit(ast, id),
        }
    }
}
