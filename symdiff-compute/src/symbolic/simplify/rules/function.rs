//! Simplification rules for functions applied to a literal at which they take a known value.

use crate::symbolic::step_collector::StepCollector;
use super::{do_call, is_literal, Step};
use symdiff_parser::{Arena, NodeId, OpKind};

/// Replaces `op(at)` with the literal `value`.
fn known_value(
    arena: &mut Arena,
    id: NodeId,
    op: OpKind,
    at: f64,
    value: f64,
    step: Step,
    step_collector: &mut dyn StepCollector<Step>,
) -> bool {
    match do_call(arena, id, op) {
        Some(arg) if is_literal(arena, arg, at) => {
            arena.set_literal(id, value);
            step_collector.push(step);
            true
        },
        _ => false,
    }
}

/// `sin(0) = 0`
pub fn sin_zero(arena: &mut Arena, id: NodeId, step_collector: &mut dyn StepCollector<Step>) -> bool {
    known_value(arena, id, OpKind::Sin, 0.0, 0.0, Step::SinZero, step_collector)
}

/// `cos(0) = 1`
pub fn cos_zero(arena: &mut Arena, id: NodeId, step_collector: &mut dyn StepCollector<Step>) -> bool {
    known_value(arena, id, OpKind::Cos, 0.0, 1.0, Step::CosZero, step_collector)
}

/// `exp(0) = 1`
pub fn exp_zero(arena: &mut Arena, id: NodeId, step_collector: &mut dyn StepCollector<Step>) -> bool {
    known_value(arena, id, OpKind::Exp, 0.0, 1.0, Step::ExpZero, step_collector)
}

/// `log(1) = 0`
pub fn log_one(arena: &mut Arena, id: NodeId, step_collector: &mut dyn StepCollector<Step>) -> bool {
    known_value(arena, id, OpKind::Log, 1.0, 0.0, Step::LogOne, step_collector)
}

/// Applies the function rules, stopping at the first one that matches.
pub fn all(arena: &mut Arena, id: NodeId, step_collector: &mut dyn StepCollector<Step>) -> bool {
    sin_zero(arena, id, step_collector)
        || cos_zero(arena, id, step_collector)
        || exp_zero(arena, id, step_collector)
        || log_one(arena, id, step_collector)
}
