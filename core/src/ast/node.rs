use core::fmt;

/// Index of a node inside an [`Ast`](super::Ast).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a name (or container of names) is used at its position in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExprContext {
    Load,
    Store,
    Del,
    /// A formal parameter of a function.
    Param,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mult,
    Div,
    Mod,
    Pow,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mult => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "**",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Not,
    UAdd,
    USub,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Not => "not ",
            UnaryOp::UAdd => "+",
            UnaryOp::USub => "-",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOp {
    Eq,
    NotEq,
    Lt,
    LtE,
    Gt,
    GtE,
}

impl ComparisonOp {
    pub fn symbol(self) -> &'static str {
        match self {
            ComparisonOp::Eq => "==",
            ComparisonOp::NotEq => "!=",
            ComparisonOp::Lt => "<",
            ComparisonOp::LtE => "<=",
            ComparisonOp::Gt => ">",
            ComparisonOp::GtE => ">=",
        }
    }
}

/// Value carried by a numeric literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

/// A single node of the syntax tree.
///
/// Children are referenced by [`NodeId`]; identifier text and child lists live
/// in the arena that backs the owning [`Ast`](super::Ast).
#[derive(Debug, Clone, PartialEq)]
pub enum Node<'a> {
    Module {
        body: &'a [NodeId],
    },
    FunctionDef {
        name: &'a str,
        /// Always an [`Node::Arguments`] node.
        args: NodeId,
        body: &'a [NodeId],
        decorators: &'a [NodeId],
    },
    ClassDef {
        name: &'a str,
        bases: &'a [NodeId],
        body: &'a [NodeId],
        decorators: &'a [NodeId],
    },
    Arguments {
        args: &'a [NodeId],
        vararg: Option<&'a str>,
        kwarg: Option<&'a str>,
        /// Defaults for the trailing `args`.
        defaults: &'a [NodeId],
    },
    Return {
        value: Option<NodeId>,
    },
    Assign {
        targets: &'a [NodeId],
        value: NodeId,
    },
    AugAssign {
        target: NodeId,
        op: BinaryOp,
        value: NodeId,
    },
    For {
        target: NodeId,
        iter: NodeId,
        body: &'a [NodeId],
        orelse: &'a [NodeId],
    },
    While {
        test: NodeId,
        body: &'a [NodeId],
        orelse: &'a [NodeId],
    },
    If {
        test: NodeId,
        body: &'a [NodeId],
        orelse: &'a [NodeId],
    },
    Import {
        /// Always [`Node::Alias`] nodes.
        names: &'a [NodeId],
    },
    ImportFrom {
        module: Option<&'a str>,
        names: &'a [NodeId],
        level: u32,
    },
    Alias {
        name: &'a str,
        asname: Option<&'a str>,
    },
    Global {
        names: &'a [&'a str],
    },
    Expr {
        value: NodeId,
    },
    Pass,
    Break,
    Continue,

    BinOp {
        left: NodeId,
        op: BinaryOp,
        right: NodeId,
    },
    UnaryOp {
        op: UnaryOp,
        operand: NodeId,
    },
    Compare {
        left: NodeId,
        op: ComparisonOp,
        right: NodeId,
    },
    Call {
        func: NodeId,
        args: &'a [NodeId],
    },
    Attribute {
        value: NodeId,
        attr: &'a str,
        ctx: ExprContext,
    },
    Subscript {
        value: NodeId,
        index: NodeId,
        ctx: ExprContext,
    },
    Name {
        id: &'a str,
        ctx: ExprContext,
    },
    List {
        elts: &'a [NodeId],
        ctx: ExprContext,
    },
    Tuple {
        elts: &'a [NodeId],
        ctx: ExprContext,
    },
    Dict {
        keys: &'a [NodeId],
        values: &'a [NodeId],
    },
    Num(Number),
    Str(&'a str),
}

/// Field-less tag of a [`Node`], used to key dispatch tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    Module,
    FunctionDef,
    ClassDef,
    Arguments,
    Return,
    Assign,
    AugAssign,
    For,
    While,
    If,
    Import,
    ImportFrom,
    Alias,
    Global,
    Expr,
    Pass,
    Break,
    Continue,
    BinOp,
    UnaryOp,
    Compare,
    Call,
    Attribute,
    Subscript,
    Name,
    List,
    Tuple,
    Dict,
    Num,
    Str,
}

impl NodeKind {
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Module => "Module",
            NodeKind::FunctionDef => "FunctionDef",
            NodeKind::ClassDef => "ClassDef",
            NodeKind::Arguments => "Arguments",
            NodeKind::Return => "Return",
            NodeKind::Assign => "Assign",
            NodeKind::AugAssign => "AugAssign",
            NodeKind::For => "For",
            NodeKind::While => "While",
            NodeKind::If => "If",
            NodeKind::Import => "Import",
            NodeKind::ImportFrom => "ImportFrom",
            NodeKind::Alias => "Alias",
            NodeKind::Global => "Global",
            NodeKind::Expr => "Expr",
            NodeKind::Pass => "Pass",
            NodeKind::Break => "Break",
            NodeKind::Continue => "Continue",
            NodeKind::BinOp => "BinOp",
            NodeKind::UnaryOp => "UnaryOp",
            NodeKind::Compare => "Compare",
            NodeKind::Call => "Call",
            NodeKind::Attribute => "Attribute",
            NodeKind::Subscript => "Subscript",
            NodeKind::Name => "Name",
            NodeKind::List => "List",
            NodeKind::Tuple => "Tuple",
            NodeKind::Dict => "Dict",
            NodeKind::Num => "Num",
            NodeKind::Str => "Str",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl<'a> Node<'a> {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Module { .. } => NodeKind::Module,
            Node::FunctionDef { .. } => NodeKind::FunctionDef,
            Node::ClassDef { .. } => NodeKind::ClassDef,
            Node::Arguments { .. } => NodeKind::Arguments,
            Node::Return { .. } => NodeKind::Return,
            Node::Assign { .. } => NodeKind::Assign,
            Node::AugAssign { .. } => NodeKind::AugAssign,
            Node::For { .. } => NodeKind::For,
            Node::While { .. } => NodeKind::While,
            Node::If { .. } => NodeKind::If,
            Node::Import { .. } => NodeKind::Import,
            Node::ImportFrom { .. } => NodeKind::ImportFrom,
            Node::Alias { .. } => NodeKind::Alias,
            Node::Global { .. } => NodeKind::Global,
            Node::Expr { .. } => NodeKind::Expr,
            Node::Pass => NodeKind::Pass,
            Node::Break => NodeKind::Break,
            Node::Continue => NodeKind::Continue,
            Node::BinOp { .. } => NodeKind::BinOp,
            Node::UnaryOp { .. } => NodeKind::UnaryOp,
            Node::Compare { .. } => NodeKind::Compare,
            Node::Call { .. } => NodeKind::Call,
            Node::Attribute { .. } => NodeKind::Attribute,
            Node::Subscript { .. } => NodeKind::Subscript,
            Node::Name { .. } => NodeKind::Name,
            Node::List { .. } => NodeKind::List,
            Node::Tuple { .. } => NodeKind::Tuple,
            Node::Dict { .. } => NodeKind::Dict,
            Node::Num(_) => NodeKind::Num,
            Node::Str(_) => NodeKind::Str,
        }
    }

    /// True for scalar literal nodes (numbers and strings).
    pub fn is_literal(&self) -> bool {
        matches!(self, Node::Num(_) | Node::Str(_))
    }
}
