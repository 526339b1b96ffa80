//! Simplification rules for sums and differences.

use crate::symbolic::step_collector::StepCollector;
use super::{do_binary, is_literal, Step};
use symdiff_parser::{Arena, NodeId, OpKind};

/// `0+a = a`
/// `a+0 = a`
pub fn add_zero(arena: &mut Arena, id: NodeId, step_collector: &mut dyn StepCollector<Step>) -> bool {
    let Some((left, right)) = do_binary(arena, id, OpKind::Add) else {
        return false;
    };

    let kept = if is_literal(arena, left, 0.0) {
        right
    } else if is_literal(arena, right, 0.0) {
        left
    } else {
        return false;
    };

    arena.replace_content(id, kept);
    step_collector.push(Step::AddZero);
    true
}

/// `a-0 = a`
///
/// `0-a` is left alone, since it is not equal to `a`.
pub fn subtract_zero(arena: &mut Arena, id: NodeId, step_collector: &mut dyn StepCollector<Step>) -> bool {
    let Some((left, right)) = do_binary(arena, id, OpKind::Sub) else {
        return false;
    };
    if !is_literal(arena, right, 0.0) {
        return false;
    }

    arena.replace_content(id, left);
    step_collector.push(Step::SubtractZero);
    true
}
