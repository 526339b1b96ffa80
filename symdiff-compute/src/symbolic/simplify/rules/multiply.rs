//! Simplification rules for products.

use crate::symbolic::step_collector::StepCollector;
use super::{do_binary, is_literal, Step};
use symdiff_parser::{Arena, NodeId, OpKind};

/// `0*a = 0`
/// `a*0 = 0`
pub fn multiply_zero(arena: &mut Arena, id: NodeId, step_collector: &mut dyn StepCollector<Step>) -> bool {
    let Some((left, right)) = do_binary(arena, id, OpKind::Mul) else {
        return false;
    };
    if !is_literal(arena, left, 0.0) && !is_literal(arena, right, 0.0) {
        return false;
    }

    arena.set_literal(id, 0.0);
    step_collector.push(Step::MultiplyZero);
    true
}

/// `1*a = a`
/// `a*1 = a`
pub fn multiply_one(arena: &mut Arena, id: NodeId, step_collector: &mut dyn StepCollector<Step>) -> bool {
    let Some((left, right)) = do_binary(arena, id, OpKind::Mul) else {
        return false;
    };

    let kept = if is_literal(arena, left, 1.0) {
        right
    } else if is_literal(arena, right, 1.0) {
        left
    } else {
        return false;
    };

    arena.replace_content(id, kept);
    step_collector.push(Step::MultiplyOne);
    true
}

/// If the node is a product with a literal factor, returns the handle of that literal and of the
/// other factor. The left factor is tried first.
fn split_coefficient(arena: &Arena, id: NodeId) -> Option<(NodeId, NodeId)> {
    let (left, right) = do_binary(arena, id, OpKind::Mul)?;
    if arena.literal_value(left).is_some() {
        Some((left, right))
    } else if arena.literal_value(right).is_some() {
        Some((right, left))
    } else {
        None
    }
}

/// Merges a literal factor with a literal factor of a nested product.
///
/// `c*(d*y) = (c*d)*y`
/// `c*(y*d) = (c*d)*y`
/// `(c*y)*d = y*(c*d)`
/// `(y*c)*d = y*(c*d)`
pub fn merge_coefficients(arena: &mut Arena, id: NodeId, step_collector: &mut dyn StepCollector<Step>) -> bool {
    let Some((left, right)) = do_binary(arena, id, OpKind::Mul) else {
        return false;
    };

    // the outer literal keeps its side, and the nested product collapses into its other factor
    let candidates = [(left, right), (right, left)];
    let Some((outer, inner, (coefficient, rest))) = candidates.into_iter()
        .filter(|&(outer, _)| arena.literal_value(outer).is_some())
        .find_map(|(outer, inner)| Some((outer, inner, split_coefficient(arena, inner)?)))
    else {
        return false;
    };

    let (Some(c), Some(d)) = (arena.literal_value(outer), arena.literal_value(coefficient)) else {
        return false;
    };
    arena.set_literal(outer, c * d);
    arena.replace_content(inner, rest);
    step_collector.push(Step::MergeCoefficients);
    true
}

/// Applies the product rules in order, stopping at the first one that matches.
pub fn all(arena: &mut Arena, id: NodeId, step_collector: &mut dyn StepCollector<Step>) -> bool {
    multiply_zero(arena, id, step_collector)
        || multiply_one(arena, id, step_collector)
        || merge_coefficients(arena, id, step_collector)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use symdiff_parser::parse;
    use crate::symbolic::simplify::SimplifyOptions;
    use super::super::tests::one_pass;
    use super::*;

    #[test]
    fn zero_absorbs() {
        let (tree, steps) = one_pass("(x + sin y) * 0", &SimplifyOptions::default());
        assert_eq!(tree, parse("0").unwrap());
        assert_eq!(tree.len(), 1);
        assert_eq!(steps, [Step::MultiplyZero]);
    }

    #[test]
    fn one_is_identity() {
        let (tree, steps) = one_pass("1 * (x - y)", &SimplifyOptions::default());
        assert_eq!(tree, parse("x - y").unwrap());
        assert_eq!(steps, [Step::MultiplyOne]);
    }

    #[test]
    fn zero_wins_over_one() {
        let (tree, steps) = one_pass("1 * (0 * x)", &SimplifyOptions::default());
        assert_eq!(tree, parse("0 * x").unwrap());
        assert_eq!(steps, [Step::MultiplyOne]);

        let (tree, steps) = one_pass("0 * (1 * x)", &SimplifyOptions::default());
        assert_eq!(tree, parse("0").unwrap());
        assert_eq!(steps, [Step::MultiplyZero]);
    }

    #[test]
    fn merge_with_leading_literal() {
        let (tree, _) = one_pass("2 * (3 * x)", &SimplifyOptions::default());
        assert_eq!(tree, parse("6 * x").unwrap());

        let (tree, _) = one_pass("2 * (x * 3)", &SimplifyOptions::default());
        assert_eq!(tree, parse("6 * x").unwrap());
    }

    #[test]
    fn merge_with_trailing_literal() {
        let (tree, _) = one_pass("(3 * sin x) * 2", &SimplifyOptions::default());
        assert_eq!(tree, parse("sin x * 6").unwrap());

        let (tree, steps) = one_pass("(sin x * 3) * 2", &SimplifyOptions::default());
        assert_eq!(tree, parse("sin x * 6").unwrap());
        assert_eq!(steps, [Step::MergeCoefficients]);
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn no_merge_without_nested_literal() {
        let (tree, steps) = one_pass("2 * (x * y)", &SimplifyOptions::default());
        assert_eq!(tree, parse("2 * (x * y)").unwrap());
        assert!(steps.is_empty());
    }
}
