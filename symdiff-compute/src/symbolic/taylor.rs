//! Truncated Taylor series.
//!
//! The series of `f(x)` around the point `a` is
//!
//! ```text
//! f(a) + f'(a) * (x - a)^1 / 1! + f''(a) * (x - a)^2 / 2! + ...
//! ```
//!
//! The expansion point is kept symbolic: every `x` in the input is renamed to `a` to produce the
//! first term, and each following term differentiates the previous derivative with respect to `a`.
//! The result is a tree in both `x` and `a`, which can be evaluated with
//! [`evaluate_at`](crate::numerical::eval::evaluate_at).

use crate::symbolic::derivative::differentiate_with;
use crate::symbolic::simplify::{simplify_with, SimplifyOptions};
use symdiff_parser::{Arena, Error, NodeId, Tree};
use tracing::debug;

/// Builds `1 * 2 * ... * n` as a chain of literal products. `n = 1` gives the literal `1`.
fn factorial(arena: &mut Arena, n: u32) -> Result<NodeId, Error> {
    let mut product = arena.new_literal(1.0)?;
    for factor in 2..=n {
        let factor = arena.new_literal(f64::from(factor))?;
        product = arena.mul(product, factor)?;
    }
    Ok(product)
}

/// Builds the Taylor series of `tree` in `x` around `a`, up to and including the term of degree
/// `order`, without simplifying the sum.
///
/// The series is a left-leaning chain of sums: following the left operand `order` times from the
/// root leads to the first term, the input with `x` renamed to `a`.
pub fn taylor_terms(tree: &Tree, order: u32) -> Result<Tree, Error> {
    taylor_terms_with(tree, order, &SimplifyOptions::default())
}

/// Like [`taylor_terms`], simplifying each derivative with the given options.
pub fn taylor_terms_with(tree: &Tree, order: u32, options: &SimplifyOptions) -> Result<Tree, Error> {
    let mut derivative = tree.clone();
    derivative.rename_variable('x', 'a');
    let (mut arena, mut series) = derivative.clone().into_parts();

    for i in 1..=order {
        derivative = differentiate_with(&derivative, 'a', options)?;
        let coefficient = arena.import(derivative.arena(), derivative.root())?;

        // (x - a)^i / i!
        let x = arena.new_variable('x')?;
        let a = arena.new_variable('a')?;
        let offset = arena.sub(x, a)?;
        let degree = arena.new_literal(f64::from(i))?;
        let power = arena.pow(offset, degree)?;
        let factorial = factorial(&mut arena, i)?;
        let scale = arena.div(power, factorial)?;

        let term = arena.mul(coefficient, scale)?;
        series = arena.add(series, term)?;
    }

    Ok(arena.into_tree(series))
}

/// Builds the Taylor series of `tree` in `x` around `a`, up to and including the term of degree
/// `order`, and simplifies it.
pub fn taylor(tree: &Tree, order: u32) -> Result<Tree, Error> {
    taylor_with(tree, order, &SimplifyOptions::default())
}

/// Like [`taylor`], simplifying with the given options.
pub fn taylor_with(tree: &Tree, order: u32, options: &SimplifyOptions) -> Result<Tree, Error> {
    let mut series = taylor_terms_with(tree, order, options)?;
    simplify_with(&mut series, options);
    debug!(order, nodes = series.len(), "taylor series of `{}`", tree);
    Ok(series)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;
    use symdiff_parser::{parse, OpKind};
    use crate::numerical::eval::evaluate_at;
    use super::*;

    /// Evaluates a series at `x`, expanded around `a`.
    fn evaluate_series(series: &Tree, x: f64, a: f64) -> f64 {
        evaluate_at(series, |name| match name {
            'x' => Some(x),
            'a' => Some(a),
            _ => None,
        })
    }

    #[test]
    fn first_term_is_renamed_input() {
        let tree = parse("sin x + x ^ 2").unwrap();
        let series = taylor_terms(&tree, 3).unwrap();
        series.validate().unwrap();

        let mut id = series.root();
        for _ in 0..3 {
            assert_eq!(series.arena().op_kind(id), Some(OpKind::Add));
            id = series.arena().left(id).unwrap();
        }
        assert_eq!(series.subtree(id).unwrap(), parse("sin a + a ^ 2").unwrap());
    }

    #[test]
    fn order_zero() {
        let series = taylor_terms(&parse("exp x * y").unwrap(), 0).unwrap();
        assert_eq!(series, parse("exp a * y").unwrap());
    }

    #[test]
    fn factorial_chain() {
        let mut arena = Arena::new();
        let id = factorial(&mut arena, 4).unwrap();
        assert_eq!(arena.into_tree(id), parse("1 * 2 * 3 * 4").unwrap());

        let mut arena = Arena::new();
        let id = factorial(&mut arena, 1).unwrap();
        assert_eq!(arena.into_tree(id), parse("1").unwrap());
    }

    #[test]
    fn exponential() {
        let series = taylor(&parse("exp x").unwrap(), 6).unwrap();
        series.validate().unwrap();
        assert_relative_eq!(evaluate_series(&series, 0.5, 0.0), 0.5f64.exp(), epsilon = 1e-3);
        assert_relative_eq!(evaluate_series(&series, 1.1, 1.0), 1.1f64.exp(), epsilon = 1e-6);
    }

    #[test]
    fn polynomial_is_exact() {
        let tree = parse("x ^ 3 - 2 * x").unwrap();
        let series = taylor(&tree, 3).unwrap();
        for (x, a) in [(1.3, 0.4), (-2.0, 1.0), (0.0, 3.0)] {
            assert_relative_eq!(evaluate_series(&series, x, a), x * x * x - 2.0 * x, epsilon = 1e-9);
        }
    }

    #[test]
    fn input_is_not_modified() {
        let tree = parse("log (x + 2)").unwrap();
        let before = tree.clone();
        taylor(&tree, 2).unwrap();
        assert_eq!(tree, before);
    }
}
