//! Trigonometric identities.
//!
//! By default, the identities only apply when every argument is the variable `x`. With
//! [`SimplifyOptions::structural_trig`], they apply to any argument, as long as all arguments of
//! the pattern are structurally equal.

use crate::symbolic::step_collector::StepCollector;
use super::{do_binary, do_call, SimplifyOptions, Step};
use symdiff_parser::{Arena, Node, NodeId, OpKind};

/// If the node is a product of two calls to `op`, such as `sin(a)*sin(b)`, returns the two calls
/// and their arguments.
fn square_of(arena: &Arena, id: NodeId, op: OpKind) -> Option<[(NodeId, NodeId); 2]> {
    let (left, right) = do_binary(arena, id, OpKind::Mul)?;
    Some([
        (left, do_call(arena, left, op)?),
        (right, do_call(arena, right, op)?),
    ])
}

/// Returns true if the identity may be applied with these arguments.
fn same_argument(arena: &Arena, args: [NodeId; 4], options: &SimplifyOptions) -> bool {
    if options.structural_trig {
        args[1..].iter().all(|&arg| arena.subtree_eq(args[0], arena, arg))
    } else {
        args.iter().all(|&arg| arena.variable_name(arg) == Some('x'))
    }
}

/// `sin(x)*sin(x) + cos(x)*cos(x) = 1`
/// `cos(x)*cos(x) + sin(x)*sin(x) = 1`
pub fn pythagorean(
    arena: &mut Arena,
    id: NodeId,
    options: &SimplifyOptions,
    step_collector: &mut dyn StepCollector<Step>,
) -> bool {
    let Some((left, right)) = do_binary(arena, id, OpKind::Add) else {
        return false;
    };

    let squares = [(OpKind::Sin, OpKind::Cos), (OpKind::Cos, OpKind::Sin)]
        .into_iter()
        .find_map(|(first, second)| Some((square_of(arena, left, first)?, square_of(arena, right, second)?)));
    let Some(([(_, a), (_, b)], [(_, c), (_, d)])) = squares else {
        return false;
    };
    if !same_argument(arena, [a, b, c, d], options) {
        return false;
    }

    arena.set_literal(id, 1.0);
    step_collector.push(Step::Pythagorean);
    true
}

/// `cos(x)*cos(x) - sin(x)*sin(x) = cos(2*x)`
pub fn cos_double_angle(
    arena: &mut Arena,
    id: NodeId,
    options: &SimplifyOptions,
    step_collector: &mut dyn StepCollector<Step>,
) -> bool {
    let Some((left, right)) = do_binary(arena, id, OpKind::Sub) else {
        return false;
    };
    let (Some([(_, a), (_, b)]), Some([(first_sin, c), (second_sin, d)])) = (
        square_of(arena, left, OpKind::Cos),
        square_of(arena, right, OpKind::Sin),
    ) else {
        return false;
    };
    if !same_argument(arena, [a, b, c, d], options) {
        return false;
    }

    // reuse the product of sines as `2*a`, then wrap it in the cosine
    arena.set_literal(first_sin, 2.0);
    arena.replace_content(second_sin, d);
    arena.rewrite(id, Node::unary(OpKind::Cos, right));
    step_collector.push(Step::CosDoubleAngle);
    true
}
