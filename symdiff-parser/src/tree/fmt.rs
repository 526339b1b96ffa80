use std::fmt::{self, Debug, Display, Formatter};
use super::{Arena, Node, NodeId, OpKind, Tree};

/// Formats a subtree in infix notation, with the fewest parentheses needed for the output to parse
/// back to the same tree.
///
/// Infinite and NaN literals have no numeric spelling the parser accepts. They are written as the
/// parenthesized division that produces them (`(1 / 0)`, `(-1 / 0)` and `(0 / 0)`), which parses
/// back to a tree that folds to the same literal.
struct Infix<'a> {
    arena: &'a Arena,
    id: NodeId,
}

impl<'a> Infix<'a> {
    fn child(&self, id: NodeId) -> Infix<'a> {
        Infix { arena: self.arena, id }
    }

    /// Writes an operand of the binary operator `op`, wrapping it in parentheses if it binds less
    /// tightly than `op`. Right operands are also wrapped at equal precedence, since every binary
    /// operator associates to the left.
    fn operand(&self, f: &mut Formatter, op: OpKind, child: Option<NodeId>, is_right: bool) -> fmt::Result {
        let Some(child) = child else {
            return write!(f, "?");
        };
        let needs_parens = match self.arena.op_kind(child) {
            Some(inner) if inner.is_binary() => {
                inner.precedence() < op.precedence()
                    || is_right && inner.precedence() == op.precedence()
            },
            _ => false,
        };

        if needs_parens {
            write!(f, "({})", self.child(child))
        } else {
            write!(f, "{}", self.child(child))
        }
    }
}

impl Display for Infix<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self.arena.node(self.id) {
            Node::Literal(value) if value.is_nan() => write!(f, "(0 / 0)"),
            Node::Literal(value) if value.is_infinite() => {
                write!(f, "({} / 0)", if value < 0.0 { "-1" } else { "1" })
            },
            Node::Literal(value) => write!(f, "{}", value),
            Node::Variable(name) => write!(f, "{}", name),
            Node::Operation { op, right, .. } if op.is_unary() => {
                // the argument of a function must be a single quantity or parenthesized
                match right {
                    Some(arg) if self.arena.op_kind(arg).is_none() => {
                        write!(f, "{} {}", op.symbol(), self.child(arg))
                    },
                    Some(arg) => write!(f, "{} ({})", op.symbol(), self.child(arg)),
                    None => write!(f, "{} ?", op.symbol()),
                }
            },
            Node::Operation { op, left, right } => {
                self.operand(f, op, left, false)?;
                match op {
                    OpKind::Pow => write!(f, "^")?,
                    op => write!(f, " {} ", op.symbol())?,
                }
                self.operand(f, op, right, true)
            },
        }
    }
}

impl Display for Tree {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        Infix { arena: &self.arena, id: self.root }.fmt(f)
    }
}

/// Formats a subtree as nested constructor calls, such as `Add(Variable('x'), Literal(1.0))`.
struct Nested<'a> {
    arena: &'a Arena,
    id: NodeId,
}

impl Debug for Nested<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self.arena.node(self.id) {
            Node::Literal(value) => f.debug_tuple("Literal").field(&value).finish(),
            Node::Variable(name) => f.debug_tuple("Variable").field(&name).finish(),
            Node::Operation { op, left, right } => {
                let name = format!("{:?}", op);
                let mut tuple = f.debug_tuple(&name);
                for id in left.into_iter().chain(right) {
                    tuple.field(&Nested { arena: self.arena, id });
                }
                tuple.finish()
            },
        }
    }
}

impl Debug for Tree {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        Nested { arena: &self.arena, id: self.root }.fmt(f)
    }
}
