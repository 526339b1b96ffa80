/// A rewrite applied by the simplifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `a+0 = a`, `0+a = a`
    AddZero,

    /// `a-0 = a`
    SubtractZero,

    /// `a*0 = 0`, `0*a = 0`
    MultiplyZero,

    /// `a*1 = a`, `1*a = a`
    MultiplyOne,

    /// `c*(d*y) = (c*d)*y`, and the other orders of the inner product
    MergeCoefficients,

    /// `0/a = 0`
    DivideZero,

    /// `a/1 = a`
    DivideOne,

    /// `a^1 = a`
    PowerOne,

    /// `sin(0) = 0`
    SinZero,

    /// `cos(0) = 1`
    CosZero,

    /// `exp(0) = 1`
    ExpZero,

    /// `log(1) = 0`
    LogOne,

    /// `sin(x)*sin(x) + cos(x)*cos(x) = 1`, in either order
    Pythagorean,

    /// `cos(x)*cos(x) - sin(x)*sin(x) = cos(2*x)`
    CosDoubleAngle,

    /// An operation whose operands are all literals was replaced with its value.
    ConstantFold,
}
