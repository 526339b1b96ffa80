use std::ops::ControlFlow;
use symdiff_parser::{Arena, Node, NodeId, Tree, Visitor};
use super::func::apply;

/// Computes the value of each node after its children, keeping intermediate results on a stack.
struct Eval<F> {
    bindings: F,
    values: Vec<f64>,
}

impl<F: Fn(char) -> Option<f64>> Visitor for Eval<F> {
    fn post(&mut self, arena: &Arena, id: NodeId) -> ControlFlow<()> {
        let value = match *arena.node(id) {
            Node::Literal(value) => value,
            Node::Variable(name) => (self.bindings)(name).unwrap_or(f64::NAN),
            Node::Operation { op, left, right } => {
                // operands were pushed left first; a missing operand evaluates to NaN
                let rhs = right.and_then(|_| self.values.pop()).unwrap_or(f64::NAN);
                let lhs = left.and_then(|_| self.values.pop()).unwrap_or(f64::NAN);
                apply(op, lhs, rhs)
            },
        };
        self.values.push(value);
        ControlFlow::Continue(())
    }
}

/// Evaluates the tree with the variable `x` bound to the given value.
///
/// Any other variable evaluates to NaN, which propagates through the result. Domain errors follow
/// floating-point semantics and are not reported.
pub fn evaluate(tree: &Tree, x: f64) -> f64 {
    evaluate_at(tree, |name| (name == 'x').then_some(x))
}

/// Evaluates the tree, looking up the value of each variable with `bindings`. Unbound variables
/// evaluate to NaN.
///
/// The evaluation is iterative, so trees of any depth can be evaluated.
pub fn evaluate_at(tree: &Tree, bindings: impl Fn(char) -> Option<f64>) -> f64 {
    let mut eval = Eval { bindings, values: Vec::new() };
    let _ = tree.walk(&mut eval);
    eval.values.pop().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use symdiff_parser::parse;
    use super::*;

    fn eval_str(source: &str, x: f64) -> f64 {
        evaluate(&parse(source).unwrap(), x)
    }

    #[test]
    fn precedence() {
        assert_eq!(eval_str("1+2*3", 0.0), 7.0);
        assert_eq!(eval_str("2^3", 0.0), 8.0);
        assert_eq!(eval_str("2^3^2", 0.0), 64.0);
        assert_eq!(eval_str("8 / 4 / 2", 0.0), 1.0);
    }

    #[test]
    fn functions() {
        assert_relative_eq!(eval_str("sin x * sin x + cos x * cos x", 0.7), 1.0, epsilon = 1e-12);
        assert_relative_eq!(eval_str("log (exp x)", 2.5), 2.5, epsilon = 1e-12);
        assert_relative_eq!(eval_str("x^2 + 3*x", 2.0), 10.0);
    }

    #[test]
    fn unbound_variables_are_nan() {
        assert!(eval_str("x + y", 1.0).is_nan());
        assert!(eval_str("0 * a", 1.0).is_nan());
    }

    #[test]
    fn domain_errors() {
        assert_eq!(eval_str("1 / (x - 1)", 1.0), f64::INFINITY);
        assert!(eval_str("log x", -1.0).is_nan());
    }

    #[test]
    fn custom_bindings() {
        let tree = parse("(x - a) ^ 2").unwrap();
        let value = evaluate_at(&tree, |name| match name {
            'x' => Some(5.0),
            'a' => Some(2.0),
            _ => None,
        });
        assert_eq!(value, 9.0);
    }

    #[test]
    fn deep_tree() {
        let mut arena = Arena::new();
        let mut id = arena.new_variable('x').unwrap();
        for _ in 0..100_000 {
            let one = arena.new_literal(1.0).unwrap();
            id = arena.add(id, one).unwrap();
        }
        let tree = arena.into_tree(id);
        assert_eq!(evaluate(&tree, 0.5), 100_000.5);
    }
}
