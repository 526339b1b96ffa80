//! The floating-point primitive behind each operator.

use symdiff_parser::OpKind;

/// Applies the operator to its operands. Unary operators ignore `lhs` and apply to `rhs`.
///
/// Domain errors are not intercepted: `1 / 0` is infinite, and `log(-1)` is NaN.
pub fn apply(op: OpKind, lhs: f64, rhs: f64) -> f64 {
    match op {
        OpKind::Add => lhs + rhs,
        OpKind::Sub => lhs - rhs,
        OpKind::Mul => lhs * rhs,
        OpKind::Div => lhs / rhs,
        OpKind::Pow => lhs.powf(rhs),
        OpKind::Sin => rhs.sin(),
        OpKind::Cos => rhs.cos(),
        OpKind::Exp => rhs.exp(),
        OpKind::Log => rhs.ln(),
    }
}
