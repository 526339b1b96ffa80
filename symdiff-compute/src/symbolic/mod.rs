//! Algebraic manipulation of expression trees.
//!
//! # Differentiation
//!
//! [`differentiate`] builds the derivative of a tree with respect to a single-letter variable
//! into a new tree, applying the sum, product, quotient, power and chain rules. Every variable
//! other than the one being differentiated with respect to is treated as a constant.
//!
//! ```
//! use symdiff_compute::numerical::eval::evaluate;
//! use symdiff_compute::symbolic::differentiate;
//! use symdiff_parser::parse;
//!
//! let tree = parse("x^2 + 3*x").unwrap();
//! let derivative = differentiate(&tree, 'x').unwrap();
//! assert_eq!(derivative.to_string(), "2 * x + 3");
//! assert_eq!(evaluate(&derivative, 2.0), 7.0);
//! ```
//!
//! # Simplification
//!
//! The trees produced by differentiation are full of terms like `0 * x` and `x ^ 1`. The
//! simplifier removes them by folding constant subtrees and applying a small set of local rewrite
//! rules until the tree stops changing. Simplification rewrites a tree in place.
//!
//! ```
//! use symdiff_compute::symbolic::simplify;
//! use symdiff_parser::parse;
//!
//! let mut tree = parse("sin x * sin x + cos x * cos x").unwrap();
//! simplify(&mut tree);
//! assert_eq!(tree.to_string(), "1");
//! ```
//!
//! For more information, see the [`mod@simplify`] module.
//!
//! # Taylor series
//!
//! [`taylor`] expands a tree in `x` into a truncated Taylor series around a symbolic point `a`.

pub mod derivative;
pub mod simplify;
pub mod step_collector;
pub mod taylor;

pub use derivative::{differentiate, differentiate_with, differentiate_with_steps};
pub use simplify::{simplify, simplify_with, simplify_with_steps, SimplifyOptions};
pub use step_collector::StepCollector;
pub use taylor::{taylor, taylor_terms};
