//! Numerical evaluation of expression trees.

pub mod eval;
pub mod func;

/// The absolute tolerance used when comparing floating-point values for equality.
pub const EPSILON: f64 = 1e-11;

/// Returns true if the two values differ by less than [`EPSILON`].
pub fn approx_eq(lhs: f64, rhs: f64) -> bool {
    (lhs - rhs).abs() < EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerance() {
        assert!(approx_eq(1.0, 1.0 + 1e-12));
        assert!(!approx_eq(1.0, 1.0 + 1e-10));
        assert!(!approx_eq(f64::NAN, f64::NAN));
    }
}
