//! Symbolic differentiation, simplification, evaluation and Taylor expansion of the expression
//! trees produced by [`symdiff_parser`].
//!
//! The [`symbolic`] module rewrites trees: it differentiates them, simplifies them, and expands
//! them into Taylor series. The [`numerical`] module computes their value.
//!
//! ```
//! use symdiff_compute::{numerical::eval::evaluate, symbolic::simplify};
//! use symdiff_parser::parse;
//!
//! let mut tree = parse("1+2*3").unwrap();
//! assert_eq!(evaluate(&tree, 0.0), 7.0);
//!
//! simplify(&mut tree);
//! assert_eq!(tree.arena().literal_value(tree.root()), Some(7.0));
//! ```

pub mod numerical;
pub mod symbolic;

#[cfg(test)]
pub(crate) mod arbitrary;
