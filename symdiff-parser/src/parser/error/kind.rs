use ariadne::Fmt;
use symdiff_attrs::ErrorKind;
use symdiff_error::EXPR;
use crate::tokenizer::TokenKind;

/// The end of the source code was reached unexpectedly.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of input",
    labels = [format!("you might need to add another {} here", "expression".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// The end of the source code was expected, but something else was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected end of input",
    labels = [format!("I could not understand the remaining {} here", "expression".fg(EXPR))],
)]
pub struct ExpectedEof;

/// An unexpected token was encountered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected token",
    labels = [format!("expected one of: {}", expected.iter().map(|t| format!("{:?}", t)).collect::<Vec<_>>().join(", "))],
    help = format!("found {:?}", found),
)]
pub struct UnexpectedToken {
    /// The token(s) that were expected.
    pub expected: &'static [TokenKind],

    /// The token that was found.
    pub found: TokenKind,
}

/// A parenthesis was not closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed parenthesis",
    labels = ["this parenthesis is not closed"],
    help = "add a closing parenthesis `)` somewhere after this",
)]
pub struct UnclosedParenthesis;

/// A function name was not followed by whitespace.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("missing space after `{}`", name),
    labels = ["this function"],
    help = format!("write the argument after a space: {}", format!("{} x", name).fg(EXPR)),
)]
pub struct MissingFunctionSeparator {
    /// The name of the function.
    pub name: &'static str,
}

/// A numeric literal could not be converted to a floating-point value.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "invalid number",
    labels = ["this number"],
)]
pub struct InvalidNumber;
