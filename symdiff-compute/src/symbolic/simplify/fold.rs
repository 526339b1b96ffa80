//! Constant folding.

use crate::numerical::func::apply;
use crate::symbolic::step_collector::StepCollector;
use super::step::Step;
use symdiff_parser::{Arena, Node, NodeId};

/// Replaces every operation whose operands are all literals with a literal holding its value,
/// working from the leaves up so that whole constant subtrees collapse in a single pass.
///
/// Returns true if any node was folded.
pub fn fold_constants(
    arena: &mut Arena,
    root: NodeId,
    step_collector: &mut dyn StepCollector<Step>,
) -> bool {
    let mut changed = false;

    // folding a node only frees its children, which come before it in postorder
    for id in arena.postorder(root) {
        let Node::Operation { op, left, right } = *arena.node(id) else {
            continue;
        };

        let lhs = match left {
            Some(left) => match arena.literal_value(left) {
                Some(value) => value,
                None => continue,
            },
            None => f64::NAN,
        };
        let Some(rhs) = right.and_then(|right| arena.literal_value(right)) else {
            continue;
        };

        arena.set_literal(id, apply(op, lhs, rhs));
        step_collector.push(Step::ConstantFold);
        changed = true;
    }

    changed
}
