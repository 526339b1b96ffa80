//! Implementation of the local rewrite rules.
//!
//! Each rule in this module is a function that takes the arena and the handle of the node to
//! simplify. If the rule applies, it rewrites the node in place, reports a [`Step`], and returns
//! true. Otherwise, it leaves the tree untouched and returns false.
//!
//! Literals are matched with the tolerance of [`approx_eq`].

pub mod add;
pub mod divide;
pub mod function;
pub mod multiply;
pub mod power;
pub mod trigonometry;

use crate::numerical::approx_eq;
use crate::symbolic::step_collector::StepCollector;
use super::{step::Step, SimplifyOptions};
use symdiff_parser::{Arena, Node, NodeId, OpKind};

/// If the node is a binary operation with the given operator, returns its left and right
/// operands.
pub(crate) fn do_binary(arena: &Arena, id: NodeId, op: OpKind) -> Option<(NodeId, NodeId)> {
    match *arena.node(id) {
        Node::Operation { op: node_op, left: Some(left), right: Some(right) } if node_op == op => {
            Some((left, right))
        },
        _ => None,
    }
}

/// If the node is a call to the given unary operator, returns its argument.
pub(crate) fn do_call(arena: &Arena, id: NodeId, op: OpKind) -> Option<NodeId> {
    match *arena.node(id) {
        Node::Operation { op: node_op, left: None, right: Some(arg) } if node_op == op => Some(arg),
        _ => None,
    }
}

/// Returns true if the node is a literal approximately equal to `value`.
pub(crate) fn is_literal(arena: &Arena, id: NodeId, value: f64) -> bool {
    arena.literal_value(id).is_some_and(|literal| approx_eq(literal, value))
}

/// Applies the first rule that matches the node, in a fixed order for each operator.
///
/// Returns true if a rule was applied.
pub fn first_match(
    arena: &mut Arena,
    id: NodeId,
    options: &SimplifyOptions,
    step_collector: &mut dyn StepCollector<Step>,
) -> bool {
    let Some(op) = arena.op_kind(id) else {
        return false;
    };

    match op {
        OpKind::Add => add::add_zero(arena, id, step_collector)
            || trigonometry::pythagorean(arena, id, options, step_collector),
        OpKind::Sub => add::subtract_zero(arena, id, step_collector)
            || trigonometry::cos_double_angle(arena, id, options, step_collector),
        OpKind::Mul => multiply::all(arena, id, step_collector),
        OpKind::Div => divide::all(arena, id, step_collector),
        OpKind::Pow => power::power_one(arena, id, step_collector),
        OpKind::Sin | OpKind::Cos | OpKind::Exp | OpKind::Log => {
            function::all(arena, id, step_collector)
        },
    }
}

/// Walks the tree from the root, applying the first matching rule to each node.
///
/// The result of a rewrite is not revisited in the same pass; the subtrees of a node that no rule
/// matched are visited left first. Returns true if any rule was applied.
pub fn apply_rules(
    arena: &mut Arena,
    root: NodeId,
    options: &SimplifyOptions,
    step_collector: &mut dyn StepCollector<Step>,
) -> bool {
    let mut changed = false;
    let mut stack = vec![root];

    while let Some(id) = stack.pop() {
        if first_match(arena, id, options, step_collector) {
            changed = true;
            continue;
        }

        let node = *arena.node(id);
        stack.extend(node.right());
        stack.extend(node.left());
    }

    changed
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use symdiff_parser::{parse, Tree};
    use super::*;

    /// Runs a single rule pass over the parsed source.
    pub(super) fn one_pass(source: &str, options: &SimplifyOptions) -> (Tree, Vec<Step>) {
        let mut tree = parse(source).unwrap();
        let root = tree.root();
        let mut steps = Vec::new();
        apply_rules(tree.arena_mut(), root, options, &mut steps);
        tree.validate().unwrap();
        (tree, steps)
    }

    #[test]
    fn no_descent_after_match() {
        // the sum matches, so its `x * 1` operand waits for the next pass
        let (tree, steps) = one_pass("(x * 1) + 0", &SimplifyOptions::default());
        assert_eq!(tree, parse("x * 1").unwrap());
        assert_eq!(steps, [Step::AddZero]);
    }

    #[test]
    fn siblings_are_visited_left_first() {
        let (tree, steps) = one_pass("(x + 0) * (y / 1)", &SimplifyOptions::default());
        assert_eq!(tree, parse("x * y").unwrap());
        assert_eq!(steps, [Step::AddZero, Step::DivideOne]);
    }

    #[test]
    fn literals_match_within_tolerance() {
        let (tree, _) = one_pass("x * 1.000000000001", &SimplifyOptions::default());
        assert_eq!(tree, parse("x").unwrap());

        let (tree, steps) = one_pass("x * 1.0001", &SimplifyOptions::default());
        assert_eq!(tree, parse("x * 1.0001").unwrap());
        assert!(steps.is_empty());
    }
}
