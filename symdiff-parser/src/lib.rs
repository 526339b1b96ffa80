//! Expression trees for symbolic differentiation, and the readers and writers that produce and
//! consume them.
//!
//! An expression is read from infix notation with [`parse`], or from the bracketed dump format
//! with [`dump::load`]. Both produce a [`Tree`], which the `symdiff-compute` crate differentiates,
//! simplifies, evaluates and expands.
//!
//! ```
//! use symdiff_parser::parse;
//!
//! let tree = parse("x^2 + 3*x").unwrap();
//! assert_eq!(tree.to_string(), "x^2 + 3 * x");
//! ```

pub mod dump;
pub mod parser;
pub mod tokenizer;
pub mod tree;

#[cfg(test)]
pub(crate) mod arbitrary;

pub use parser::Parser;
pub use symdiff_error::{Error, ErrorClass};
pub use tree::{Arena, Limits, LimitsBuilder, Node, NodeId, OpKind, Shape, SideTable, Tree, Visitor};

/// Parses an expression in infix notation, using the default [`Limits`].
pub fn parse(source: &str) -> Result<Tree, Error> {
    Parser::new(source).try_parse_full()
}

/// Parses an expression in infix notation, building a tree with the given limits.
pub fn parse_with(source: &str, limits: Limits) -> Result<Tree, Error> {
    Parser::with_limits(source, limits).try_parse_full()
}
