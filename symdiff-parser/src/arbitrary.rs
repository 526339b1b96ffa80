//! Random expression trees for property tests.

use proptest::prelude::*;
use crate::tree::{Arena, NodeId, OpKind, Tree};

/// An owned expression that can be built into a [`Tree`].
#[derive(Debug, Clone)]
pub enum Expr {
    Literal(f64),
    Variable(char),
    Unary(OpKind, Box<Expr>),
    Binary(OpKind, Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Builds the expression into a fresh tree.
    pub fn build(&self) -> Tree {
        let mut arena = Arena::new();
        let root = self.build_in(&mut arena);
        arena.into_tree(root)
    }

    fn build_in(&self, arena: &mut Arena) -> NodeId {
        match self {
            Expr::Literal(value) => arena.new_literal(*value).unwrap(),
            Expr::Variable(name) => arena.new_variable(*name).unwrap(),
            Expr::Unary(op, arg) => {
                let arg = arg.build_in(arena);
                arena.unary(*op, arg).unwrap()
            },
            Expr::Binary(op, left, right) => {
                let left = left.build_in(arena);
                let right = right.build_in(arena);
                arena.binary(*op, left, right).unwrap()
            },
        }
    }
}

/// Literals with at most three decimals, so that they survive the six-decimal dump format.
fn literal() -> impl Strategy<Value = f64> {
    (-2000i32..2000, 0i32..4).prop_map(|(n, scale)| f64::from(n) / 10f64.powi(scale))
}

/// Expressions over the variables `x` and `y`.
pub fn expr() -> impl Strategy<Value = Expr> {
    let leaf = prop_oneof![
        literal().prop_map(Expr::Literal),
        prop::sample::select(vec!['x', 'y']).prop_map(Expr::Variable),
    ];

    leaf.prop_recursive(6, 48, 2, |inner| {
        prop_oneof![
            (
                prop::sample::select(vec![OpKind::Sin, OpKind::Cos, OpKind::Exp, OpKind::Log]),
                inner.clone(),
            )
                .prop_map(|(op, arg)| Expr::Unary(op, Box::new(arg))),
            (
                prop::sample::select(vec![OpKind::Add, OpKind::Sub, OpKind::Mul, OpKind::Div, OpKind::Pow]),
                inner.clone(),
                inner,
            )
                .prop_map(|(op, left, right)| Expr::Binary(op, Box::new(left), Box::new(right))),
        ]
    })
}
