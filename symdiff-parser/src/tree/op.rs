//! The closed set of operators an operation node can carry.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The precedence of an operation, in order from lowest precedence (evaluated last) to highest
/// precedence (evaluated first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Precedence of multiplication (`*`) and division (`/`), which separate factors.
    Factor,

    /// Precedence of exponentiation (`^`).
    Exp,

    /// Precedence of function application (`sin x`), which binds tighter than any binary
    /// operator.
    Call,
}

/// The operator of an operation node.
///
/// `Add`, `Sub`, `Mul`, `Div` and `Pow` are binary: the node has both a left and a right child.
/// `Sin`, `Cos`, `Exp` and `Log` are unary: the node has no left child, and its right child holds
/// the argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OpKind {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Sin,
    Cos,
    Exp,
    Log,
}

impl OpKind {
    /// Every operator, binary operators first.
    pub const ALL: [OpKind; 9] = [
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::Pow,
        Self::Sin,
        Self::Cos,
        Self::Exp,
        Self::Log,
    ];

    /// Returns true if the operator takes a single argument.
    pub fn is_unary(self) -> bool {
        matches!(self, Self::Sin | Self::Cos | Self::Exp | Self::Log)
    }

    /// Returns true if the operator takes two operands.
    pub fn is_binary(self) -> bool {
        !self.is_unary()
    }

    /// Returns the precedence of the operation.
    pub fn precedence(self) -> Precedence {
        match self {
            Self::Add | Self::Sub => Precedence::Term,
            Self::Mul | Self::Div => Precedence::Factor,
            Self::Pow => Precedence::Exp,
            Self::Sin | Self::Cos | Self::Exp | Self::Log => Precedence::Call,
        }
    }

    /// The symbol used for the operator in infix notation, or the function name for unary
    /// operators.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "^",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Exp => "exp",
            Self::Log => "log",
        }
    }

    /// The token used for the operator in the bracketed dump format.
    pub fn dump_token(self) -> &'static str {
        match self {
            Self::Pow => "pow",
            op => op.symbol(),
        }
    }

    /// Parses an operator from a dump token. Both `pow` and `^` are accepted for [`OpKind::Pow`].
    pub fn from_dump_token(token: &str) -> Option<Self> {
        match token {
            "pow" | "^" => Some(Self::Pow),
            token => Self::ALL.into_iter().find(|op| op.symbol() == token),
        }
    }

    /// Parses a function name (`sin`, `cos`, `exp`, `log`) into its unary operator.
    pub fn from_function_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter()
            .filter(|op| op.is_unary())
            .find(|op| op.symbol() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity() {
        let unary = OpKind::ALL.iter().filter(|op| op.is_unary()).count();
        assert_eq!(unary, 4);
        assert!(OpKind::Pow.is_binary());
        assert!(OpKind::Log.is_unary());
    }

    #[test]
    fn dump_tokens() {
        for op in OpKind::ALL {
            assert_eq!(OpKind::from_dump_token(op.dump_token()), Some(op));
        }
        assert_eq!(OpKind::from_dump_token("^"), Some(OpKind::Pow));
        assert_eq!(OpKind::from_dump_token("tan"), None);
    }

    #[test]
    fn function_names() {
        assert_eq!(OpKind::from_function_name("exp"), Some(OpKind::Exp));
        assert_eq!(OpKind::from_function_name("+"), None);
        assert_eq!(OpKind::from_function_name("pow"), None);
    }

    #[test]
    fn precedence_order() {
        assert!(OpKind::Add.precedence() < OpKind::Mul.precedence());
        assert!(OpKind::Div.precedence() < OpKind::Pow.precedence());
        assert!(OpKind::Pow.precedence() < OpKind::Sin.precedence());
    }
}
