//! Simplification rules for quotients.

use crate::symbolic::step_collector::StepCollector;
use super::{do_binary, is_literal, Step};
use symdiff_parser::{Arena, NodeId, OpKind};

/// `0/a = 0`
pub fn divide_zero(arena: &mut Arena, id: NodeId, step_collector: &mut dyn StepCollector<Step>) -> bool {
    let Some((left, _)) = do_binary(arena, id, OpKind::Div) else {
        return false;
    };
    if !is_literal(arena, left, 0.0) {
        return false;
    }

    arena.set_literal(id, 0.0);
    step_collector.push(Step::DivideZero);
    true
}

/// `a/1 = a`
pub fn divide_one(arena: &mut Arena, id: NodeId, step_collector: &mut dyn StepCollector<Step>) -> bool {
    let Some((left, right)) = do_binary(arena, id, OpKind::Div) else {
        return false;
    };
    if !is_literal(arena, right, 1.0) {
        return false;
    }

    arena.replace_content(id, left);
    step_collector.push(Step::DivideOne);
    true
}

/// Applies the quotient rules in order, stopping at the first one that matches.
pub fn all(arena: &mut Arena, id: NodeId, step_collector: &mut dyn StepCollector<Step>) -> bool {
    divide_zero(arena, id, step_collector)
        || divide_one(arena, id, step_collector)
}
