//! Property-based tests for the formula engine.
//!
//! Random ASTs are rendered to text and checked for:
//! 1. Round trip: re-parsing the canonical text gives the same text and the
//!    same value.
//! 2. Chunking: parallel and sequential evaluation over a domain agree
//!    exactly, values and warnings alike.

use plotcalc::{
    EvalOptions, Formula,
    ast::{BinaryOperator, Expr, FunctionId, Span, UnaryOperator},
    interpreter::evaluator::core::{Environment, evaluate},
};
use proptest::prelude::*;

fn literal_strategy() -> impl Strategy<Value = Expr> {
    prop_oneof![(0_u32..1000).prop_map(f64::from),
                (0_u32..400).prop_map(|n| f64::from(n) / 4.0),
                Just(0.0),
                Just(f64::INFINITY)].prop_map(|value| Expr::Literal { value,
                                                            span: Span::default() })
}

fn operator_strategy() -> impl Strategy<Value = BinaryOperator> {
    prop_oneof![Just(BinaryOperator::Add),
                Just(BinaryOperator::Sub),
                Just(BinaryOperator::Mul),
                Just(BinaryOperator::Div),
                Just(BinaryOperator::Mod),
                Just(BinaryOperator::Pow)]
}

fn expr_strategy() -> impl Strategy<Value = Expr> {
    let leaf = prop_oneof![literal_strategy(),
                           Just(Expr::Variable { span: Span::default() })];

    leaf.prop_recursive(6, 48, 2, |inner| {
            prop_oneof![inner.clone().prop_map(|operand| Expr::UnaryOp {
                                                  op:      UnaryOperator::Negate,
                                                  operand: Box::new(operand),
                                                  span:    Span::default(),
                                              }),
                        (inner.clone(), operator_strategy(), inner.clone()).prop_map(
                            |(left, op, right)| Expr::BinaryOp { left: Box::new(left),
                                                                 op,
                                                                 right: Box::new(right),
                                                                 span: Span::default() }
                        ),
                        (prop::sample::select(FunctionId::ALL.to_vec()), inner).prop_map(
                            |(function, argument)| Expr::Call { function,
                                                                argument: Box::new(argument),
                                                                span: Span::default() }
                        )]
        })
}

fn same_number(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || a.to_bits() == b.to_bits()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn rendering_reparses_to_the_same_text(ast in expr_strategy()) {
        let rendered = ast.to_string();
        let formula = Formula::parse(&rendered)
            .map_err(|e| TestCaseError::fail(format!("{rendered:?} failed to parse: {e}")))?;
        prop_assert_eq!(formula.to_string(), rendered);
    }

    #[test]
    fn rendering_reparses_to_the_same_value(ast in expr_strategy(), x in -10.0_f64..10.0) {
        let rendered = ast.to_string();
        let formula = Formula::parse(&rendered)
            .map_err(|e| TestCaseError::fail(format!("{rendered:?} failed to parse: {e}")))?;

        let direct = evaluate(&ast, &Environment::scalar(x))
            .map(|e| e.value.as_scalar())
            .map_err(|e| e.kind());
        let reparsed = formula.eval_at(x).map(Some).map_err(|e| e.kind());

        match (direct, reparsed) {
            (Ok(Some(a)), Ok(Some(b))) => prop_assert!(same_number(a, b), "{rendered}: {a} vs {b}"),
            (Err(a), Err(b)) => prop_assert_eq!(a, b),
            (a, b) => prop_assert!(false, "{rendered}: {a:?} vs {b:?}"),
        }
    }

    #[test]
    fn parallel_evaluation_matches_sequential(
        ast in expr_strategy(),
        domain in prop::collection::vec(-10.0_f64..10.0, 0..300),
        chunk_size in 1_usize..40,
    ) {
        let formula = Formula::parse(&ast.to_string())
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        let parallel = formula.eval_over_with(&domain, EvalOptions { parallel: true, chunk_size });
        let sequential = formula.eval_over_with(&domain, EvalOptions::sequential());

        match (parallel, sequential) {
            (Ok(p), Ok(s)) => {
                prop_assert_eq!(p.warnings(), s.warnings());
                prop_assert_eq!(p.values().len(), s.values().len());
                for (a, b) in p.values().iter().zip(s.values()) {
                    prop_assert!(same_number(*a, *b), "{a} vs {b}");
                }
            },
            (p, s) => prop_assert_eq!(p.is_err(), s.is_err()),
        }
    }
}
