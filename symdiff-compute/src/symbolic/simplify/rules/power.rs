//! Simplification rules for powers.

use crate::symbolic::step_collector::StepCollector;
use super::{do_binary, is_literal, Step};
use symdiff_parser::{Arena, NodeId, OpKind};

/// `a^1 = a`
pub fn power_one(arena: &mut Arena, id: NodeId, step_collector: &mut dyn StepCollector<Step>) -> bool {
    let Some((base, exponent)) = do_binary(arena, id, OpKind::Pow) else {
        return false;
    };
    if !is_literal(arena, exponent, 1.0) {
        return false;
    }

    arena.replace_content(id, base);
    step_collector.push(Step::PowerOne);
    true
}
