//! Lexical scope frames recorded by the scope analysis.
//!
//! A [`Frame`] holds the names bound in one module, function or class body.
//! Frames nest: the [`FrameStack`] always adds bindings to its topmost frame,
//! and a frame leaves the stack (and becomes part of [`Scopes`]) once its body
//! has been fully traversed.
//!
//! ```text
//! x = 1            # module frame: x, f
//! def f(a):        # f frame: a, y
//!     global x
//!     y = a        # x is recorded in f's frame with is_global = true
//! ```

use bumpalo::Bump;
use hashbrown::{DefaultHashBuilder, HashMap};

use crate::Vec;
use crate::ast::NodeId;
use crate::errors::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameKind {
    Module,
    Function,
    Class,
}

/// One name bound in a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding<'a> {
    pub name: &'a str,
    /// Declared with a `global` statement rather than bound locally.
    pub is_global: bool,
}

/// The bindings of a single lexical scope.
///
/// Bindings keep the order in which names were first declared.
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    owner: NodeId,
    parent: Option<NodeId>,
    kind: FrameKind,
    bindings: Vec<Binding<'a>>,
    index: HashMap<&'a str, usize, DefaultHashBuilder, &'a Bump>,
}

impl<'a> Frame<'a> {
    pub fn new(arena: &'a Bump, owner: NodeId, kind: FrameKind, parent: Option<NodeId>) -> Self {
        Self {
            owner,
            parent,
            kind,
            bindings: Vec::new(),
            index: HashMap::new_in(arena),
        }
    }

    /// The node that introduced this scope (a module, function or class).
    pub fn owner(&self) -> NodeId {
        self.owner
    }

    /// The owner of the enclosing scope, `None` for the module.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn kind(&self) -> FrameKind {
        self.kind
    }

    /// Record `name` in this frame.
    ///
    /// Declaring a name twice keeps a single binding. A `global` declaration
    /// marks the binding global for the whole frame, whether it comes before
    /// or after local bindings of the same name.
    pub fn declare(&mut self, name: &'a str, is_global: bool) {
        match self.index.get(name) {
            Some(&idx) => self.bindings[idx].is_global |= is_global,
            None => {
                self.index.insert(name, self.bindings.len());
                self.bindings.push(Binding { name, is_global });
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// `Some(is_global)` if `name` is bound here.
    pub fn is_global(&self, name: &str) -> Option<bool> {
        self.index.get(name).map(|&idx| self.bindings[idx].is_global)
    }

    pub fn bindings(&self) -> &[Binding<'a>] {
        &self.bindings
    }

    pub fn names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.bindings.iter().map(|b| b.name)
    }

    pub fn globals(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.bindings.iter().filter(|b| b.is_global).map(|b| b.name)
    }

    pub fn locals(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.bindings.iter().filter(|b| !b.is_global).map(|b| b.name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Stack of active frames; the top is the scope currently being filled.
pub struct FrameStack<'a> {
    arena: &'a Bump,
    frames: Vec<Frame<'a>>,
}

impl<'a> FrameStack<'a> {
    pub fn new(arena: &'a Bump) -> Self {
        Self {
            arena,
            frames: Vec::new(),
        }
    }

    /// Push a new empty frame owned by `owner`, nested in the current one.
    pub fn push(&mut self, owner: NodeId, kind: FrameKind) {
        let parent = self.frames.last().map(Frame::owner);
        self.frames.push(Frame::new(self.arena, owner, kind, parent));
    }

    /// Make a previously popped frame current again.
    pub fn enter(&mut self, frame: Frame<'a>) {
        self.frames.push(frame);
    }

    /// Remove and return the topmost frame.
    pub fn pop(&mut self) -> Result<Frame<'a>, Error> {
        self.frames.pop().ok_or(Error::EmptyFrameStack)
    }

    pub fn current(&mut self) -> Result<&mut Frame<'a>, Error> {
        self.frames.last_mut().ok_or(Error::EmptyFrameStack)
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Finished frames, one per scope-introducing node.
#[derive(Debug, Clone)]
pub struct Scopes<'a> {
    frames: Vec<Frame<'a>>,
    by_owner: HashMap<NodeId, usize>,
}

impl<'a> Scopes<'a> {
    pub(crate) fn new() -> Self {
        Self {
            frames: Vec::new(),
            by_owner: HashMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, frame: Frame<'a>) {
        self.by_owner.insert(frame.owner(), self.frames.len());
        self.frames.push(frame);
    }

    /// The frame introduced by `owner`, if it introduces one.
    pub fn get(&self, owner: NodeId) -> Option<&Frame<'a>> {
        self.by_owner.get(&owner).map(|&idx| &self.frames[idx])
    }

    /// The module frame, if the analysis has run.
    pub fn module(&self) -> Option<&Frame<'a>> {
        self.frames.iter().find(|frame| frame.kind() == FrameKind::Module)
    }

    /// Frames in the order their bodies finished traversal.
    pub fn iter(&self) -> impl Iterator<Item = &Frame<'a>> {
        self.frames.iter()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Every name bound in any frame (names bound in several frames repeat).
    pub fn names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.frames.iter().flat_map(|frame| frame.names())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_is_idempotent() {
        let bump = Bump::new();
        let mut frame = Frame::new(&bump, NodeId(0), FrameKind::Module, None);

        frame.declare("a", false);
        frame.declare("b", false);
        frame.declare("a", false);

        assert_eq!(frame.len(), 2);
        assert_eq!(frame.names().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_global_flag_is_sticky() {
        let bump = Bump::new();
        let mut frame = Frame::new(&bump, NodeId(3), FrameKind::Function, Some(NodeId(0)));

        frame.declare("z", false);
        frame.declare("z", true);
        assert_eq!(frame.is_global("z"), Some(true));

        frame.declare("z", false);
        assert_eq!(frame.is_global("z"), Some(true));
        assert_eq!(frame.len(), 1);
        assert_eq!(frame.is_global("missing"), None);
    }

    #[test]
    fn test_globals_and_locals_split() {
        let bump = Bump::new();
        let mut frame = Frame::new(&bump, NodeId(0), FrameKind::Function, None);
        frame.declare("x", false);
        frame.declare("g", true);

        assert_eq!(frame.locals().collect::<Vec<_>>(), vec!["x"]);
        assert_eq!(frame.globals().collect::<Vec<_>>(), vec!["g"]);
    }

    #[test]
    fn test_push_records_parent() {
        let bump = Bump::new();
        let mut stack = FrameStack::new(&bump);

        stack.push(NodeId(0), FrameKind::Module);
        stack.push(NodeId(5), FrameKind::Class);
        assert_eq!(stack.depth(), 2);

        let class = stack.pop().unwrap();
        assert_eq!(class.owner(), NodeId(5));
        assert_eq!(class.parent(), Some(NodeId(0)));
        assert_eq!(class.kind(), FrameKind::Class);

        let module = stack.pop().unwrap();
        assert_eq!(module.parent(), None);
    }

    #[test]
    fn test_current_adds_to_top_frame() {
        let bump = Bump::new();
        let mut stack = FrameStack::new(&bump);
        stack.push(NodeId(0), FrameKind::Module);
        stack.push(NodeId(1), FrameKind::Function);

        stack.current().unwrap().declare("inner", false);
        let inner = stack.pop().unwrap();
        let outer = stack.pop().unwrap();

        assert!(inner.contains("inner"));
        assert!(!outer.contains("inner"));
    }

    #[test]
    fn test_empty_stack_errors() {
        let bump = Bump::new();
        let mut stack = FrameStack::new(&bump);

        assert!(stack.is_empty());
        assert!(matches!(stack.pop(), Err(Error::EmptyFrameStack)));
        assert!(matches!(stack.current(), Err(Error::EmptyFrameStack)));
    }

    #[test]
    fn test_enter_restores_frame() {
        let bump = Bump::new();
        let mut stack = FrameStack::new(&bump);
        stack.push(NodeId(2), FrameKind::Function);
        stack.current().unwrap().declare("p", false);
        let frame = stack.pop().unwrap();

        stack.enter(frame);
        stack.current().unwrap().declare("q", false);
        let frame = stack.pop().unwrap();

        assert_eq!(frame.names().collect::<Vec<_>>(), vec!["p", "q"]);
    }

    #[test]
    fn test_scopes_lookup_by_owner() {
        let bump = Bump::new();
        let mut scopes = Scopes::new();
        let mut module = Frame::new(&bump, NodeId(0), FrameKind::Module, None);
        module.declare("f", false);
        let mut function = Frame::new(&bump, NodeId(4), FrameKind::Function, Some(NodeId(0)));
        function.declare("x", false);
        scopes.insert(module);
        scopes.insert(function);

        assert_eq!(scopes.len(), 2);
        assert!(scopes.get(NodeId(4)).unwrap().contains("x"));
        assert!(scopes.get(NodeId(9)).is_none());
        assert_eq!(scopes.module().unwrap().owner(), NodeId(0));
        assert_eq!(scopes.names().collect::<Vec<_>>(), vec!["f", "x"]);
    }
}
