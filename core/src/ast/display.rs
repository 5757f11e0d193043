//! Rendering a tree back to Python-like source text.

use core::fmt::Write;

use super::node::{Node, NodeId, NodeKind, Number};
use super::tree::Ast;
use crate::String;

const INDENT: &str = "    ";

impl<'a> Ast<'a> {
    /// Render the whole module, one statement per line.
    pub fn unparse(&self) -> String {
        self.unparse_node(self.root())
    }

    /// Render a single statement (with a trailing newline) or expression.
    pub fn unparse_node(&self, id: NodeId) -> String {
        let mut unparser = Unparser::new(self);
        if is_statement(self.kind(id)) {
            unparser.stmt(id);
        } else {
            unparser.expr(id);
        }
        unparser.output
    }
}

fn is_statement(kind: NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::Module
            | NodeKind::FunctionDef
            | NodeKind::ClassDef
            | NodeKind::Return
            | NodeKind::Assign
            | NodeKind::AugAssign
            | NodeKind::For
            | NodeKind::While
            | NodeKind::If
            | NodeKind::Import
            | NodeKind::ImportFrom
            | NodeKind::Global
            | NodeKind::Expr
            | NodeKind::Pass
            | NodeKind::Break
            | NodeKind::Continue
    )
}

struct Unparser<'t, 'a> {
    ast: &'t Ast<'a>,
    output: String,
    depth: usize,
}

impl<'t, 'a> Unparser<'t, 'a> {
    fn new(ast: &'t Ast<'a>) -> Self {
        Self {
            ast,
            output: String::new(),
            depth: 0,
        }
    }

    fn line_start(&mut self) {
        for _ in 0..self.depth {
            self.output.push_str(INDENT);
        }
    }

    fn block(&mut self, body: &[NodeId]) {
        self.depth += 1;
        if body.is_empty() {
            self.line_start();
            self.output.push_str("pass\n");
        }
        for stmt in body {
            self.stmt(*stmt);
        }
        self.depth -= 1;
    }

    fn else_block(&mut self, orelse: &[NodeId]) {
        if !orelse.is_empty() {
            self.line_start();
            self.output.push_str("else:\n");
            self.block(orelse);
        }
    }

    fn stmt(&mut self, id: NodeId) {
        let ast = self.ast;
        if let Node::Module { body } = *ast.node(id) {
            for stmt in body {
                self.stmt(*stmt);
            }
            return;
        }

        if let Node::FunctionDef { decorators, .. } | Node::ClassDef { decorators, .. } =
            *ast.node(id)
        {
            for decorator in decorators {
                self.line_start();
                self.output.push('@');
                self.expr(*decorator);
                self.output.push('\n');
            }
        }

        self.line_start();
        match *ast.node(id) {
            Node::FunctionDef {
                name, args, body, ..
            } => {
                let _ = write!(self.output, "def {}(", name);
                self.arguments(args);
                self.output.push_str("):\n");
                self.block(body);
            }
            Node::ClassDef {
                name, bases, body, ..
            } => {
                let _ = write!(self.output, "class {}", name);
                if !bases.is_empty() {
                    self.output.push('(');
                    self.comma_separated(bases);
                    self.output.push(')');
                }
                self.output.push_str(":\n");
                self.block(body);
            }
            Node::Return { value } => {
                self.output.push_str("return");
                if let Some(value) = value {
                    self.output.push(' ');
                    self.expr(value);
                }
                self.output.push('\n');
            }
            Node::Assign { targets, value } => {
                for target in targets {
                    self.expr(*target);
                    self.output.push_str(" = ");
                }
                self.expr(value);
                self.output.push('\n');
            }
            Node::AugAssign { target, op, value } => {
                self.expr(target);
                let _ = write!(self.output, " {}= ", op.symbol());
                self.expr(value);
                self.output.push('\n');
            }
            Node::For {
                target,
                iter,
                body,
                orelse,
            } => {
                self.output.push_str("for ");
                self.expr(target);
                self.output.push_str(" in ");
                self.expr(iter);
                self.output.push_str(":\n");
                self.block(body);
                self.else_block(orelse);
            }
            Node::While { test, body, orelse } => {
                self.output.push_str("while ");
                self.expr(test);
                self.output.push_str(":\n");
                self.block(body);
                self.else_block(orelse);
            }
            Node::If { test, body, orelse } => {
                self.output.push_str("if ");
                self.expr(test);
                self.output.push_str(":\n");
                self.block(body);
                self.else_block(orelse);
            }
            Node::Import { names } => {
                self.output.push_str("import ");
                self.aliases(names);
                self.output.push('\n');
            }
            Node::ImportFrom {
                module,
                names,
                level,
            } => {
                self.output.push_str("from ");
                for _ in 0..level {
                    self.output.push('.');
                }
                self.output.push_str(module.unwrap_or(""));
                self.output.push_str(" import ");
                self.aliases(names);
                self.output.push('\n');
            }
            Node::Global { names } => {
                self.output.push_str("global ");
                self.output.push_str(&names.join(", "));
                self.output.push('\n');
            }
            Node::Expr { value } => {
                self.expr(value);
                self.output.push('\n');
            }
            Node::Pass => self.output.push_str("pass\n"),
            Node::Break => self.output.push_str("break\n"),
            Node::Continue => self.output.push_str("continue\n"),
            _ => {
                self.expr(id);
                self.output.push('\n');
            }
        }
    }

    fn arguments(&mut self, id: NodeId) {
        let Node::Arguments {
            args,
            vararg,
            kwarg,
            defaults,
        } = *self.ast.node(id)
        else {
            self.expr(id);
            return;
        };

        let first_default = args.len().saturating_sub(defaults.len());
        let mut first = true;
        for (i, arg) in args.iter().enumerate() {
            self.separator(&mut first);
            self.expr(*arg);
            if i >= first_default {
                self.output.push('=');
                self.expr(defaults[i - first_default]);
            }
        }
        if let Some(vararg) = vararg {
            self.separator(&mut first);
            let _ = write!(self.output, "*{}", vararg);
        }
        if let Some(kwarg) = kwarg {
            self.separator(&mut first);
            let _ = write!(self.output, "**{}", kwarg);
        }
    }

    fn aliases(&mut self, names: &[NodeId]) {
        let mut first = true;
        for alias in names {
            self.separator(&mut first);
            match *self.ast.node(*alias) {
                Node::Alias {
                    name,
                    asname: Some(asname),
                } => {
                    let _ = write!(self.output, "{} as {}", name, asname);
                }
                Node::Alias { name, asname: None } => self.output.push_str(name),
                _ => self.expr(*alias),
            }
        }
    }

    fn separator(&mut self, first: &mut bool) {
        if !*first {
            self.output.push_str(", ");
        }
        *first = false;
    }

    fn comma_separated(&mut self, items: &[NodeId]) {
        let mut first = true;
        for item in items {
            self.separator(&mut first);
            self.expr(*item);
        }
    }

    /// Render an operand, parenthesized when it is itself an operator expression.
    fn operand(&mut self, id: NodeId) {
        let compound = matches!(
            self.ast.kind(id),
            NodeKind::BinOp | NodeKind::UnaryOp | NodeKind::Compare
        );
        if compound {
            self.output.push('(');
            self.expr(id);
            self.output.push(')');
        } else {
            self.expr(id);
        }
    }

    fn expr(&mut self, id: NodeId) {
        match *self.ast.node(id) {
            Node::Name { id, .. } => self.output.push_str(id),
            Node::Num(Number::Int(value)) => {
                let _ = write!(self.output, "{}", value);
            }
            Node::Num(Number::Float(value)) => self.float(value),
            Node::Str(value) => self.string(value),
            Node::BinOp { left, op, right } => {
                self.operand(left);
                let _ = write!(self.output, " {} ", op.symbol());
                self.operand(right);
            }
            Node::Compare { left, op, right } => {
                self.operand(left);
                let _ = write!(self.output, " {} ", op.symbol());
                self.operand(right);
            }
            Node::UnaryOp { op, operand } => {
                self.output.push_str(op.symbol());
                self.operand(operand);
            }
            Node::Call { func, args } => {
                self.operand(func);
                self.output.push('(');
                self.comma_separated(args);
                self.output.push(')');
            }
            Node::Attribute { value, attr, .. } => {
                self.operand(value);
                let _ = write!(self.output, ".{}", attr);
            }
            Node::Subscript { value, index, .. } => {
                self.operand(value);
                self.output.push('[');
                self.expr(index);
                self.output.push(']');
            }
            Node::List { elts, .. } => {
                self.output.push('[');
                self.comma_separated(elts);
                self.output.push(']');
            }
            Node::Tuple { elts, .. } => {
                self.output.push('(');
                self.comma_separated(elts);
                if elts.len() == 1 {
                    self.output.push(',');
                }
                self.output.push(')');
            }
            Node::Dict { keys, values } => {
                self.output.push('{');
                let mut first = true;
                for (key, value) in keys.iter().zip(values) {
                    self.separator(&mut first);
                    self.expr(*key);
                    self.output.push_str(": ");
                    self.expr(*value);
                }
                self.output.push('}');
            }
            Node::Arguments { .. } => self.arguments(id),
            ref other => {
                let _ = write!(self.output, "<{}>", other.kind());
            }
        }
    }

    /// Non-finite values have no literal form and are spelled as `float()` calls.
    fn float(&mut self, value: f64) {
        if value.is_nan() {
            self.output.push_str("float('nan')");
        } else if value.is_infinite() {
            let sign = if value < 0.0 { "-" } else { "" };
            let _ = write!(self.output, "float('{}inf')", sign);
        } else {
            let _ = write!(self.output, "{:?}", value);
        }
    }

    fn string(&mut self, value: &str) {
        self.output.push('\'');
        for c in value.chars() {
            match c {
                '\\' => self.output.push_str("\\\\"),
                '\'' => self.output.push_str("\\'"),
                '\n' => self.output.push_str("\\n"),
                '\t' => self.output.push_str("\\t"),
                '\r' => self.output.push_str("\\r"),
                c => self.output.push(c),
            }
        }
        self.output.push('\'');
    }
}
