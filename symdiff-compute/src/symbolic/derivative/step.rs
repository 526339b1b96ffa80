/// A differentiation rule applied to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `c' = 0`
    Constant,

    /// `x' = 1`, or `0` for any other variable
    Variable,

    /// `(f + g)' = f' + g'`
    Sum,

    /// `(f - g)' = f' - g'`
    Difference,

    /// `(f * g)' = f' * g + f * g'`
    Product,

    /// `(f / g)' = (f' * g - f * g') / (g * g)`
    Quotient,

    /// `(f^c)' = c * f^(c-1) * f'`, for a constant exponent
    Power,

    /// `(c^g)' = log(c) * c^g * g'`, for a constant base
    Exponential,

    /// `(f^g)' = f^g * (g' * log(f) + g / f * f')`
    GeneralPower,

    /// `sin(f)' = cos(f) * f'`
    Sin,

    /// `cos(f)' = -1 * sin(f) * f'`
    Cos,

    /// `exp(f)' = exp(f) * f'`
    Exp,

    /// `log(f)' = 1 / f * f'`
    Log,
}
