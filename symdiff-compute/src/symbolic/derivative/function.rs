//! Derivatives of the unary functions, with the chain rule applied.

use super::{step::Step, Differentiator};
use symdiff_parser::{Error, NodeId, OpKind};
use symdiff_parser::tree::error::InvalidNodeShape;

/// Differentiates `op(arg)`, where `call` is the handle of the call in the source tree.
pub(super) fn function_derivative(
    diff: &mut Differentiator,
    call: NodeId,
    op: OpKind,
    arg: NodeId,
) -> Result<NodeId, Error> {
    let outer = match op {
        OpKind::Sin => {
            diff.step(Step::Sin);
            let arg = diff.copy(arg)?;
            diff.out.cos(arg)?
        },
        OpKind::Cos => {
            diff.step(Step::Cos);
            let minus_one = diff.out.new_literal(-1.0)?;
            let arg = diff.copy(arg)?;
            let sin = diff.out.sin(arg)?;
            diff.out.mul(minus_one, sin)?
        },
        OpKind::Exp => {
            diff.step(Step::Exp);
            diff.copy(call)?
        },
        OpKind::Log => {
            diff.step(Step::Log);
            let one = diff.out.new_literal(1.0)?;
            let arg = diff.copy(arg)?;
            diff.out.div(one, arg)?
        },
        OpKind::Add | OpKind::Sub | OpKind::Mul | OpKind::Div | OpKind::Pow => {
            return Err(Error::spanless(InvalidNodeShape {
                op: Some(op),
                reason: "binary operation used as a function",
            }));
        },
    };

    let inner = diff.derive(arg)?;
    diff.out.mul(outer, inner)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;
    use symdiff_parser::parse;
    use crate::numerical::eval::evaluate;
    use super::super::differentiate;

    #[test]
    fn chain_rule() {
        let tree = parse("sin (x * x)").unwrap();
        let derivative = differentiate(&tree, 'x').unwrap();
        assert_eq!(derivative, parse("cos (x * x) * (x + x)").unwrap());
    }

    #[test]
    fn cosine() {
        let derivative = differentiate(&parse("cos x").unwrap(), 'x').unwrap();
        assert_eq!(derivative, parse("-1 * sin x").unwrap());
        assert_relative_eq!(evaluate(&derivative, 0.4), -(0.4f64.sin()), epsilon = 1e-12);
    }

    #[test]
    fn exponential_keeps_itself() {
        let derivative = differentiate(&parse("exp x").unwrap(), 'x').unwrap();
        assert_eq!(derivative, parse("exp x").unwrap());
    }

    #[test]
    fn logarithm() {
        let derivative = differentiate(&parse("log (3 * x)").unwrap(), 'x').unwrap();
        assert_eq!(derivative, parse("1 / (3 * x) * 3").unwrap());
        assert_relative_eq!(evaluate(&derivative, 2.0), 0.5, epsilon = 1e-12);
    }
}
