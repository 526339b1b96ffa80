//! Symbolic differentiation.
//!
//! The derivative is built into a fresh arena by recursive descent over the source tree, which is
//! never modified. Operands that appear unchanged in a rule (such as `g` in `f' * g`) are deep
//! copies of the source subtree, so the result shares no nodes with its input. Every derived
//! subtree is simplified as soon as it is built, and the whole result is simplified once more
//! before it is returned.

mod function;
pub mod step;

use crate::symbolic::simplify::{simplify_node, SimplifyOptions};
use crate::symbolic::step_collector::StepCollector;
use step::Step;
use symdiff_parser::{Arena, Error, Node, NodeId, OpKind, Tree};
use symdiff_parser::tree::error::{DepthLimitExceeded, InvalidNodeShape};
use tracing::{debug, warn};

/// Builds the derivative of a source tree into a new arena.
struct Differentiator<'a> {
    /// The arena holding the source tree.
    src: &'a Arena,

    /// The arena the derivative is built into.
    out: Arena,

    /// The variable to differentiate with respect to.
    with: char,

    options: &'a SimplifyOptions,
    step_collector: &'a mut dyn StepCollector<Step>,

    /// The current recursion depth, checked against [`Limits::max_depth`].
    ///
    /// [`Limits::max_depth`]: symdiff_parser::Limits::max_depth
    depth: usize,
}

impl<'a> Differentiator<'a> {
    fn new(
        src: &'a Arena,
        with: char,
        options: &'a SimplifyOptions,
        step_collector: &'a mut dyn StepCollector<Step>,
    ) -> Self {
        Self {
            src,
            out: Arena::with_limits(src.limits()),
            with,
            options,
            step_collector,
            depth: 0,
        }
    }

    fn step(&mut self, step: Step) {
        self.step_collector.push(step);
    }

    /// Copies a subtree of the source tree into the output arena.
    fn copy(&mut self, id: NodeId) -> Result<NodeId, Error> {
        self.out.import(self.src, id)
    }

    /// Returns the derivative of the source subtree rooted at `id`, simplified.
    fn derive(&mut self, id: NodeId) -> Result<NodeId, Error> {
        let limit = self.src.limits().max_depth;
        if self.depth >= limit {
            warn!(limit, "differentiation depth limit reached");
            return Err(Error::spanless(DepthLimitExceeded { limit }));
        }

        self.depth += 1;
        let derivative = self.derive_node(id)?;
        self.depth -= 1;

        simplify_node(&mut self.out, derivative, self.options, &mut ());
        Ok(derivative)
    }

    fn derive_node(&mut self, id: NodeId) -> Result<NodeId, Error> {
        let node = *self.src.node(id);
        node.check_shape().map_err(Error::spanless)?;

        match node {
            Node::Literal(_) => {
                self.step(Step::Constant);
                self.out.new_literal(0.0)
            },
            Node::Variable(name) => {
                self.step(Step::Variable);
                self.out.new_literal(if name == self.with { 1.0 } else { 0.0 })
            },
            Node::Operation { op, left: Some(left), right: Some(right) } => match op {
                OpKind::Add | OpKind::Sub => self.sum_rule(op, left, right),
                OpKind::Mul => self.product_rule(left, right),
                OpKind::Div => self.quotient_rule(left, right),
                OpKind::Pow => self.power_rule(id, left, right),
                OpKind::Sin | OpKind::Cos | OpKind::Exp | OpKind::Log => {
                    Err(Error::spanless(InvalidNodeShape {
                        op: Some(op),
                        reason: "unary operation has a left operand",
                    }))
                },
            },
            Node::Operation { op, left: None, right: Some(arg) } => {
                function::function_derivative(self, id, op, arg)
            },
            Node::Operation { op, .. } => Err(Error::spanless(InvalidNodeShape {
                op: Some(op),
                reason: "operation is missing its right operand",
            })),
        }
    }

    /// `(f + g)' = f' + g'`
    /// `(f - g)' = f' - g'`
    fn sum_rule(&mut self, op: OpKind, left: NodeId, right: NodeId) -> Result<NodeId, Error> {
        self.step(if op == OpKind::Add { Step::Sum } else { Step::Difference });
        let left = self.derive(left)?;
        let right = self.derive(right)?;
        self.out.binary(op, left, right)
    }

    /// `(f * g)' = f' * g + f * g'`
    fn product_rule(&mut self, left: NodeId, right: NodeId) -> Result<NodeId, Error> {
        self.step(Step::Product);
        let d_left = self.derive(left)?;
        let c_right = self.copy(right)?;
        let first = self.out.mul(d_left, c_right)?;

        let c_left = self.copy(left)?;
        let d_right = self.derive(right)?;
        let second = self.out.mul(c_left, d_right)?;

        self.out.add(first, second)
    }

    /// `(f / g)' = (f' * g - f * g') / (g * g)`
    fn quotient_rule(&mut self, left: NodeId, right: NodeId) -> Result<NodeId, Error> {
        self.step(Step::Quotient);
        let d_left = self.derive(left)?;
        let c_right = self.copy(right)?;
        let first = self.out.mul(d_left, c_right)?;

        let c_left = self.copy(left)?;
        let d_right = self.derive(right)?;
        let second = self.out.mul(c_left, d_right)?;
        let numerator = self.out.sub(first, second)?;

        let c_right = self.copy(right)?;
        let c_right_again = self.copy(right)?;
        let denominator = self.out.mul(c_right, c_right_again)?;

        self.out.div(numerator, denominator)
    }

    /// Differentiates `base^exponent`, choosing the rule by which side is constant.
    ///
    /// A side is constant if it contains no variable at all, not only if it does not contain the
    /// variable being differentiated with respect to.
    fn power_rule(&mut self, power: NodeId, base: NodeId, exponent: NodeId) -> Result<NodeId, Error> {
        if self.src.is_constant(exponent) {
            // c * f^(c-1) * f'
            self.step(Step::Power);
            let coefficient = self.copy(exponent)?;
            let c_base = self.copy(base)?;
            let c_exponent = self.copy(exponent)?;
            let one = self.out.new_literal(1.0)?;
            let reduced = self.out.sub(c_exponent, one)?;
            let pow = self.out.pow(c_base, reduced)?;
            let outer = self.out.mul(coefficient, pow)?;
            let d_base = self.derive(base)?;
            self.out.mul(outer, d_base)
        } else if self.src.is_constant(base) {
            // log(c) * c^g * g'
            self.step(Step::Exponential);
            let c_base = self.copy(base)?;
            let log = self.out.log(c_base)?;
            let c_power = self.copy(power)?;
            let d_exponent = self.derive(exponent)?;
            let inner = self.out.mul(c_power, d_exponent)?;
            self.out.mul(log, inner)
        } else {
            // f^g * (g' * log(f) + g / f * f')
            self.step(Step::GeneralPower);
            let c_power = self.copy(power)?;

            let d_exponent = self.derive(exponent)?;
            let c_base = self.copy(base)?;
            let log = self.out.log(c_base)?;
            let first = self.out.mul(d_exponent, log)?;

            let c_exponent = self.copy(exponent)?;
            let c_base = self.copy(base)?;
            let ratio = self.out.div(c_exponent, c_base)?;
            let d_base = self.derive(base)?;
            let second = self.out.mul(ratio, d_base)?;

            let sum = self.out.add(first, second)?;
            self.out.mul(c_power, sum)
        }
    }
}

/// Differentiates the tree with respect to the variable `with`, and simplifies the result with
/// the default options.
///
/// The input tree is not modified.
pub fn differentiate(tree: &Tree, with: char) -> Result<Tree, Error> {
    differentiate_with(tree, with, &SimplifyOptions::default())
}

/// Differentiates the tree with respect to the variable `with`, and simplifies the result with
/// the given options.
pub fn differentiate_with(tree: &Tree, with: char, options: &SimplifyOptions) -> Result<Tree, Error> {
    differentiate_with_steps(tree, with, options, &mut ())
}

/// Differentiates the tree with respect to the variable `with`, reporting every differentiation
/// rule applied to the step collector.
pub fn differentiate_with_steps(
    tree: &Tree,
    with: char,
    options: &SimplifyOptions,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<Tree, Error> {
    let mut diff = Differentiator::new(tree.arena(), with, options, step_collector);
    let root = diff.derive(tree.root())?;
    let mut out = diff.out;
    simplify_node(&mut out, root, options, &mut ());

    let derivative = out.into_tree(root);
    debug!("d/d{} `{}` = `{}`", with, tree, derivative);
    Ok(derivative)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use symdiff_error::ErrorClass;
    use symdiff_parser::{parse, Limits, LimitsBuilder};
    use crate::numerical::eval::evaluate;
    use super::*;

    fn derivative_of(source: &str) -> Tree {
        let derivative = differentiate(&parse(source).unwrap(), 'x').unwrap();
        derivative.validate().unwrap();
        derivative
    }

    /// Approximates the derivative with a central difference.
    fn finite_difference(tree: &Tree, x: f64) -> f64 {
        const H: f64 = 1e-5;
        (evaluate(tree, x + H) - evaluate(tree, x - H)) / (2.0 * H)
    }

    #[test]
    fn polynomial() {
        let derivative = derivative_of("x^2 + 3*x");
        assert_eq!(derivative.to_string(), "2 * x + 3");
        assert_eq!(evaluate(&derivative, 2.0), 7.0);
    }

    #[test]
    fn power_rule() {
        for n in [2.0, 3.0, 0.5, -1.0, 4.25] {
            let derivative = derivative_of(&format!("x ^ {}", n));
            for p in [0.5, 1.5, 3.0] {
                assert_relative_eq!(evaluate(&derivative, p), n * p.powf(n - 1.0), epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn linearity() {
        let f = derivative_of("sin x");
        let g = derivative_of("x ^ 3");
        let combined = derivative_of("2 * sin x + 3 * x ^ 3");
        for p in [-1.0, 0.0, 0.7, 2.0] {
            let expected = 2.0 * evaluate(&f, p) + 3.0 * evaluate(&g, p);
            assert_relative_eq!(evaluate(&combined, p), expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn matches_finite_difference() {
        let sources = [
            "x^2 + x + 1",
            "sin x * cos x",
            "exp (2 * x) / (x + 3)",
            "log (x * x + 1)",
            "x ^ x",
            "2 ^ x",
            "cos (x ^ 2) - x / 4",
            "(x - 1) ^ 3 * exp (0 - x)",
        ];
        for source in sources {
            let tree = parse(source).unwrap();
            let derivative = differentiate(&tree, 'x').unwrap();
            for p in [0.5, 1.0, 1.7, 2.3] {
                let symbolic = evaluate(&derivative, p);
                let numeric = finite_difference(&tree, p);
                assert!(
                    (symbolic - numeric).abs() < 1e-4,
                    "for `{}` at x={}, got {} but the finite difference is {}",
                    source, p, symbolic, numeric,
                );
            }
        }
    }

    #[test]
    fn other_variables_are_constant() {
        assert_eq!(derivative_of("x * y"), parse("y").unwrap());
        assert_eq!(differentiate(&parse("x * y").unwrap(), 'y').unwrap(), parse("x").unwrap());
        assert_eq!(derivative_of("y ^ 2"), parse("0").unwrap());
    }

    #[test]
    fn constancy_ignores_the_variable() {
        // `y` is a variable, so the general power rule applies rather than the power rule
        assert_eq!(derivative_of("x ^ y"), parse("x^y * (y / x)").unwrap());
    }

    #[test]
    fn quotient() {
        assert_eq!(derivative_of("1 / x"), parse("-1 / (x * x)").unwrap());
        assert_eq!(derivative_of("x / 2"), parse("0.5").unwrap());
    }

    #[test]
    fn input_is_not_modified() {
        let tree = parse("sin (x ^ 2) / (x + 1)").unwrap();
        let before = tree.clone();
        let derivative = differentiate(&tree, 'x').unwrap();
        assert_eq!(tree, before);
        assert_eq!(tree.len(), before.len());
        derivative.validate().unwrap();
    }

    #[test]
    fn steps_are_reported() {
        let tree = parse("x * sin x").unwrap();
        let mut steps = Vec::new();
        differentiate_with_steps(&tree, 'x', &SimplifyOptions::default(), &mut steps).unwrap();
        assert_eq!(steps, [Step::Product, Step::Variable, Step::Sin, Step::Variable]);
    }

    #[test]
    fn depth_limit() {
        let limits = LimitsBuilder::new().max_depth(4).build();
        let mut arena = Arena::with_limits(limits);
        let mut id = arena.new_variable('x').unwrap();
        for _ in 0..10 {
            id = arena.sin(id).unwrap();
        }

        let err = differentiate(&arena.into_tree(id), 'x').unwrap_err();
        assert!(err.is::<DepthLimitExceeded>());
        assert_eq!(err.class(), ErrorClass::Overflow);
    }

    #[test]
    fn default_depth_limit_fits_the_stack() {
        let limit = Limits::default().max_depth;
        let outcome = std::thread::Builder::new()
            .stack_size(2 << 20)
            .spawn(move || {
                let chain = |depth: usize| {
                    let mut arena = Arena::new();
                    let mut id = arena.new_variable('x').unwrap();
                    for _ in 0..depth {
                        id = arena.sin(id).unwrap();
                    }
                    arena.into_tree(id)
                };
                let at_limit = differentiate(&chain(limit - 1), 'x')
                    .map(|tree| tree.validate().is_ok())
                    .map_err(|err| err.class());
                let past_limit = differentiate(&chain(limit), 'x').map_err(|err| err.class());
                (at_limit, past_limit)
            })
            .unwrap()
            .join()
            .unwrap();

        assert!(outcome.0.unwrap());
        assert_eq!(outcome.1.unwrap_err(), ErrorClass::Overflow);
    }

    #[test]
    fn malformed_node() {
        let mut arena = Arena::new();
        let x = arena.new_variable('x').unwrap();
        let y = arena.new_variable('y').unwrap();
        let root = arena.mul(x, y).unwrap();
        arena.drop_children(root);

        let err = differentiate(&arena.into_tree(root), 'x').unwrap_err();
        assert_eq!(err.class(), ErrorClass::InvalidNodeShape);
    }

    #[test]
    fn node_limit() {
        let limits = LimitsBuilder::new().max_nodes(8).build();
        let tree = symdiff_parser::parse_with("sin x * cos x", limits).unwrap();
        let err = differentiate(&tree, 'x').unwrap_err();
        assert_eq!(err.class(), ErrorClass::OutOfMemory);
    }

    proptest! {
        #[test]
        fn result_is_well_formed(expr in crate::arbitrary::expr()) {
            let tree = expr.build();
            let derivative = differentiate(&tree, 'x').unwrap();
            prop_assert!(derivative.validate().is_ok());
        }
    }
}
