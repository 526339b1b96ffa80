use approx::assert_relative_eq;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use symdiff_compute::numerical::eval::{evaluate, evaluate_at};
use symdiff_compute::symbolic::{differentiate, simplify, taylor, taylor_terms};
use symdiff_parser::{dump, parse, ErrorClass, Tree};

#[test]
fn derivative_of_polynomial() {
    let tree = parse("x^2 + 3*x").expect("parse");
    let derivative = differentiate(&tree, 'x').expect("differentiate");
    assert_eq!(evaluate(&derivative, 2.0), 7.0);
}

#[test]
fn pythagorean_identity() {
    let mut tree = parse("sin x * sin x + cos x * cos x").expect("parse");
    simplify(&mut tree);
    assert_eq!(tree, Tree::literal(1.0).expect("literal"));
}

#[test]
fn power_of_literals() {
    let mut tree = parse("2^3").expect("parse");
    assert_eq!(evaluate(&tree, 0.0), 8.0);
    simplify(&mut tree);
    assert_eq!(tree.arena().literal_value(tree.root()), Some(8.0));
}

#[test]
fn precedence_of_literals() {
    let mut tree = parse("1+2*3").expect("parse");
    assert_eq!(evaluate(&tree, 0.0), 7.0);
    simplify(&mut tree);
    assert_eq!(tree.arena().literal_value(tree.root()), Some(7.0));
}

#[test]
fn derivative_survives_dump() {
    let tree = parse("exp (x * x) / log (x + 2)").expect("parse");
    let derivative = differentiate(&tree, 'x').expect("differentiate");
    let loaded = dump::load(&dump::store(&derivative)).expect("load");
    for x in [0.3, 1.0, 2.5] {
        assert_relative_eq!(evaluate(&loaded, x), evaluate(&derivative, x), max_relative = 1e-5);
    }
}

#[test]
fn second_derivative() {
    let tree = parse("x ^ 4 - sin x").expect("parse");
    let first = differentiate(&tree, 'x').expect("differentiate");
    let second = differentiate(&first, 'x').expect("differentiate");
    for x in [-1.0, 0.5, 2.0] {
        assert_relative_eq!(evaluate(&second, x), 12.0 * x * x + f64::sin(x), epsilon = 1e-9);
    }
}

#[test]
fn taylor_series_of_sine() {
    let series = taylor(&parse("sin x").expect("parse"), 7).expect("taylor");
    let value = evaluate_at(&series, |name| match name {
        'x' => Some(0.3),
        'a' => Some(0.0),
        _ => None,
    });
    assert_relative_eq!(value, 0.3f64.sin(), epsilon = 1e-9);
}

#[test]
fn non_finite_results_print_back() {
    for source in ["1 / 0", "log 0", "0 / 0", "x * (1 / 0)"] {
        let mut folded = parse(source).expect("parse");
        simplify(&mut folded);

        let mut reparsed = parse(&folded.to_string()).expect("reparse");
        simplify(&mut reparsed);
        assert_eq!(reparsed, folded);
    }
}

#[test]
fn errors_are_classified() {
    assert_eq!(parse("(x + 1").unwrap_err().class(), ErrorClass::MalformedInput);
    assert_eq!(parse("x + ").unwrap_err().class(), ErrorClass::MalformedInput);
    assert_eq!(dump::load("{ '+' { 'x' } }").unwrap_err().class(), ErrorClass::MalformedInput);
}

/// Polynomials in `x` with small integer coefficients.
fn polynomial() -> impl Strategy<Value = (Vec<i32>, String)> {
    prop::collection::vec(-5i32..5, 1..5).prop_map(|coefficients| {
        let source = coefficients.iter()
            .enumerate()
            .map(|(power, coefficient)| format!("{} * x ^ {}", coefficient, power))
            .collect::<Vec<_>>()
            .join(" + ");
        (coefficients, source)
    })
}

proptest! {
    #[test]
    fn polynomial_derivative((coefficients, source) in polynomial(), x in -2.0f64..2.0) {
        let derivative = differentiate(&parse(&source).unwrap(), 'x').unwrap();
        let expected = coefficients.iter()
            .enumerate()
            .skip(1)
            .map(|(power, &coefficient)| f64::from(coefficient) * power as f64 * x.powi(power as i32 - 1))
            .sum::<f64>();
        prop_assert!((evaluate(&derivative, x) - expected).abs() < 1e-9);
    }

    #[test]
    fn simplify_is_idempotent((_, source) in polynomial()) {
        let mut once = differentiate(&parse(&source).unwrap(), 'x').unwrap();
        simplify(&mut once);
        let mut twice = once.clone();
        simplify(&mut twice);
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn taylor_first_term((_, source) in polynomial(), order in 0u32..4) {
        let tree = parse(&source).unwrap();
        let series = taylor_terms(&tree, order).unwrap();

        let mut first = series.root();
        for _ in 0..order {
            first = series.arena().left(first).unwrap();
        }
        let mut renamed = tree.clone();
        renamed.rename_variable('x', 'a');
        prop_assert_eq!(series.subtree(first).unwrap(), renamed);
    }
}
