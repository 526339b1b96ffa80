//! Errors produced while loading a dump.

use symdiff_attrs::ErrorKind;

/// The dump ended before the tree was complete.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of dump",
    labels = ["the tree is incomplete here"],
)]
pub struct UnexpectedEnd;

/// An operator node is missing one of the children its operator requires.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("missing operand of `{}`", op),
    labels = ["expected a `{` bracket here"],
    help = "binary operators take two child brackets; functions take one",
)]
pub struct MissingChild {
    /// The dump token of the operator.
    pub op: &'static str,
}

/// A bracket was opened but never closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed bracket",
    labels = ["this bracket is not closed", "expected `}` here"],
)]
pub struct UnclosedBracket;

/// A quoted token is not an operator, a variable, or a number.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown node token `{}`", token),
    labels = ["here"],
    help = "node tokens are `+`, `-`, `*`, `/`, `pow`, a function name, a single letter, or a number",
)]
pub struct UnknownNode {
    /// The text between the quotes.
    pub token: String,
}

/// A character that is not part of the dump format, or a bracket where a node token belongs, was
/// found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected character in dump",
    labels = ["here"],
)]
pub struct UnexpectedCharacter;

/// Input follows the root node.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected input after the root node",
    labels = ["the tree already ended before this"],
)]
pub struct TrailingInput;
