use std::fs;

use plotcalc::{
    BinaryOpSymbol, ErrorKind, EvalOptions, Formula,
    ast::Span,
    error::{DomainErrorKind, EvalError, SyntaxErrorKind},
    evaluate_formula, evaluate_formula_at, evaluate_scalar_binary,
    interpreter::evaluator::core::{Context, DomainPolicy, Environment},
    parse_formula,
};
use pretty_assertions::assert_eq;
use walkdir::WalkDir;

#[test]
fn corpus_cases_hold() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/corpus").into_iter()
                                    .filter_map(Result::ok)
                                    .filter(|e| e.path().extension().is_some_and(|ext| ext == "cases"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (i, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            count += 1;
            check_case(line).unwrap_or_else(|msg| panic!("{path:?}:{}: {line}\n{msg}", i + 1));
        }
    }

    assert!(count > 0, "No cases found in tests/corpus");
}

fn check_case(line: &str) -> Result<(), String> {
    let (input, expected) = line.rsplit_once(" => ").ok_or("missing ' => '")?;
    let (formula, x) = input.rsplit_once(" @ ").ok_or("missing ' @ '")?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x: {e}"))?;
    let result = evaluate_formula_at(formula, x);

    if let Some(kind) = expected.strip_prefix('!') {
        let expected_kind = match kind {
            "lex" => ErrorKind::Lex,
            "syntax" => ErrorKind::Syntax,
            "domain" => ErrorKind::Domain,
            other => return Err(format!("unknown error kind '{other}'")),
        };
        return match result {
            Err(e) if e.kind() == expected_kind => Ok(()),
            Err(e) => Err(format!("expected {expected_kind}, got {}", e.kind())),
            Ok(v) => Err(format!("expected {expected_kind}, got {v}")),
        };
    }

    let expected: f64 = expected.trim().parse().map_err(|e| format!("bad expectation: {e}"))?;
    let actual = result.map_err(|e| format!("unexpected error: {e}"))?;
    if approx_eq(actual, expected) {
        Ok(())
    } else {
        Err(format!("expected {expected}, got {actual}"))
    }
}

fn approx_eq(actual: f64, expected: f64) -> bool {
    if expected.is_nan() {
        return actual.is_nan();
    }
    if expected.is_infinite() {
        return actual == expected;
    }
    (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0)
}

fn assert_syntax(formula: &str, kind: SyntaxErrorKind, span: Span) {
    let err = match parse_formula(formula) {
        Err(plotcalc::EngineError::Syntax(e)) => e,
        other => panic!("expected a syntax error for {formula:?}, got {other:?}"),
    };
    assert_eq!((err.kind, err.span), (kind, span), "{formula:?}");
}

#[test]
fn syntax_errors_point_at_the_culprit() {
    assert_syntax("sin(x", SyntaxErrorKind::MismatchedParen, Span::new(3, 4));
    assert_syntax("(x + 1", SyntaxErrorKind::MismatchedParen, Span::new(0, 1));
    assert_syntax("x)", SyntaxErrorKind::MismatchedParen, Span::new(1, 2));
    assert_syntax("foo(x)", SyntaxErrorKind::UnknownIdentifier, Span::new(0, 3));
    assert_syntax("x + y", SyntaxErrorKind::UnknownIdentifier, Span::new(4, 5));
    assert_syntax("2 +", SyntaxErrorKind::UnexpectedEnd, Span::new(3, 3));
    assert_syntax("", SyntaxErrorKind::UnexpectedEnd, Span::new(0, 0));
    assert_syntax("sin()", SyntaxErrorKind::UnexpectedToken, Span::new(4, 5));
    assert_syntax("2 3", SyntaxErrorKind::UnexpectedToken, Span::new(2, 3));
}

#[test]
fn lex_errors_carry_the_character() {
    let err = match parse_formula("x $ 2") {
        Err(plotcalc::EngineError::Lex(e)) => e,
        other => panic!("expected a lex error, got {other:?}"),
    };
    assert_eq!((err.position, err.character), (2, '$'));
}

#[test]
fn canonical_rendering() {
    let cases = [("2**3**2", "2**3**2"),
                 ("(2**3)**2", "(2**3)**2"),
                 ("-x**2", "-x**2"),
                 ("(-x)**2", "(-x)**2"),
                 ("1 - (2 - 3)", "1 - (2 - 3)"),
                 ("(1 - 2) - 3", "1 - 2 - 3"),
                 ("EXP( x*(1+x) )", "exp(x * (1 + x))"),
                 ("2 * -x", "2 * -x")];
    for (input, rendered) in cases {
        assert_eq!(Formula::parse(input).unwrap().to_string(), rendered);
    }
}

#[test]
fn calculator_operations() {
    assert_eq!(evaluate_scalar_binary(BinaryOpSymbol::Add, 0.1, 0.2), Ok(0.1 + 0.2));
    assert_eq!(evaluate_scalar_binary(BinaryOpSymbol::Sub, 3.0, 5.0), Ok(-2.0));
    assert_eq!(evaluate_scalar_binary(BinaryOpSymbol::Mul, 4.0, 2.5), Ok(10.0));
    assert_eq!(evaluate_scalar_binary(BinaryOpSymbol::Div, 9.0, 4.0), Ok(2.25));
    assert_eq!(evaluate_scalar_binary(BinaryOpSymbol::Mod, -7.0, 3.0), Ok(2.0));
    assert_eq!(evaluate_scalar_binary(BinaryOpSymbol::Pow, 2.0, 10.0), Ok(1024.0));
    assert_eq!(evaluate_scalar_binary(BinaryOpSymbol::LogBase, 8.0, 2.0), Ok(3.0));
}

#[test]
fn calculator_preconditions() {
    let kind = |op, l, r| evaluate_scalar_binary(op, l, r).map_err(|e| e.kind);

    assert_eq!(kind(BinaryOpSymbol::Div, 1.0, 0.0), Err(DomainErrorKind::DivideByZero));
    assert_eq!(kind(BinaryOpSymbol::Div, 1.0, -0.0), Err(DomainErrorKind::DivideByZero));
    assert_eq!(kind(BinaryOpSymbol::Mod, 1.0, 0.0), Err(DomainErrorKind::ModuloByZero));
    assert_eq!(kind(BinaryOpSymbol::LogBase, 0.0, 2.0), Err(DomainErrorKind::NonPositiveArgument));
    assert_eq!(kind(BinaryOpSymbol::LogBase, 8.0, 1.0), Err(DomainErrorKind::InvalidLogBase));
    assert_eq!(kind(BinaryOpSymbol::LogBase, 8.0, -2.0), Err(DomainErrorKind::InvalidLogBase));
    // argument is checked before the base
    assert_eq!(kind(BinaryOpSymbol::LogBase, -1.0, 1.0), Err(DomainErrorKind::NonPositiveArgument));
    assert!(evaluate_scalar_binary(BinaryOpSymbol::LogBase, 8.0, 1.000_000_000_1).is_ok());
    assert!(evaluate_scalar_binary(BinaryOpSymbol::Div, f64::NAN, 0.5).unwrap().is_nan());
}

#[test]
fn operation_names_parse() {
    assert_eq!("+".parse::<BinaryOpSymbol>(), Ok(BinaryOpSymbol::Add));
    assert_eq!(" mod ".parse::<BinaryOpSymbol>(), Ok(BinaryOpSymbol::Mod));
    assert_eq!("^".parse::<BinaryOpSymbol>(), Ok(BinaryOpSymbol::Pow));
    assert_eq!("LOG".parse::<BinaryOpSymbol>(), Ok(BinaryOpSymbol::LogBase));
    assert!("sqrt".parse::<BinaryOpSymbol>().is_err());

    for op in BinaryOpSymbol::ALL {
        assert_eq!(op.symbol().parse::<BinaryOpSymbol>(), Ok(op));
    }
}

#[test]
fn curves_keep_their_shape() {
    assert_eq!(evaluate_formula("x", &[1.0, 2.0, 3.0]).unwrap().values(), &[1.0, 2.0, 3.0]);
    assert_eq!(evaluate_formula("x**2", &[-2.0, 0.0, 3.0]).unwrap().values(), &[4.0, 0.0, 9.0]);
    assert_eq!(evaluate_formula("4", &[1.0, 2.0]).unwrap().values(), &[4.0, 4.0]);
    assert!(evaluate_formula("x + 1", &[]).unwrap().values().is_empty());
}

#[test]
fn plotting_blanks_out_violations() {
    let curve = evaluate_formula("1/x", &[0.0]).unwrap();
    assert!(curve.values()[0].is_nan());
    assert_eq!(curve.warnings().len(), 1);
    assert_eq!(curve.warnings()[0].kind, DomainErrorKind::DivideByZero);
    assert_eq!(curve.warnings()[0].count, 1);
    assert_eq!(curve.warnings()[0].first_value, 0.0);

    let err = evaluate_scalar_binary(BinaryOpSymbol::Div, 1.0, 0.0).unwrap_err();
    assert_eq!(err.kind, DomainErrorKind::DivideByZero);
}

#[test]
fn warnings_are_grouped_per_node() {
    let curve = evaluate_formula("log(x) + 1/x", &[-1.0, 0.0, 2.0]).unwrap();
    let values = curve.values();
    assert!(values[0].is_nan() && values[1].is_nan());
    assert!((values[2] - (2.0_f64.ln() + 0.5)).abs() < 1e-12);

    let summary = curve.warnings()
                       .iter()
                       .map(|w| (w.kind, w.operator, w.count, w.first_value))
                       .collect::<Vec<_>>();
    assert_eq!(summary,
               vec![(DomainErrorKind::NonPositiveArgument, "log", 2, -1.0),
                    (DomainErrorKind::DivideByZero, "/", 1, 0.0)]);
}

#[test]
fn constant_violation_counts_every_point() {
    let curve = evaluate_formula("x + 1/0", &[1.0, 2.0, 3.0]).unwrap();
    assert!(curve.values().iter().all(|v| v.is_nan()));
    assert_eq!(curve.warnings()[0].count, 3);

    let empty = evaluate_formula("1/0", &[]).unwrap();
    assert!(empty.values().is_empty());
    assert!(!empty.has_warnings());
}

#[test]
fn nan_is_reported_once() {
    let curve = evaluate_formula("log(log(x))", &[-1.0, 0.5, 3.0]).unwrap();
    let counts = curve.warnings().iter().map(|w| w.count).collect::<Vec<_>>();
    // inner log fails at -1; outer log fails at 0.5 only
    assert_eq!(counts, vec![1, 1]);
    assert!(curve.values()[2].is_finite());
}

#[test]
fn parallel_matches_sequential() {
    let domain = plotcalc::linspace(-20.0, 20.0, 4001);
    let formula = Formula::parse("log(x) * tan(x) + 1 / (x % 3) - 1/0").unwrap();

    let parallel = formula.eval_over_with(&domain, EvalOptions { parallel:   true,
                                                                 chunk_size: 37, })
                          .unwrap();
    let sequential = formula.eval_over_with(&domain, EvalOptions::sequential()).unwrap();

    assert_eq!(parallel.warnings(), sequential.warnings());
    let bits = |c: &plotcalc::Curve| c.values().iter().map(|v| v.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(&parallel), bits(&sequential));
    assert_eq!(parallel.values().len(), domain.len());
}

#[test]
fn reports_keep_operator_and_value() {
    let err = evaluate_formula_at("2 * log(x)", -3.0).unwrap_err();
    let report = err.report();
    assert_eq!(report.kind, ErrorKind::Domain);
    assert_eq!(report.operator_or_function.as_deref(), Some("log"));
    assert_eq!(report.value, Some(-3.0));
    assert_eq!(report.render("2 * log(x)").lines().last(), Some("    ^^^"));

    let err = plotcalc::EngineError::from(evaluate_scalar_binary(BinaryOpSymbol::Mod, 5.0, 0.0)
                                              .unwrap_err());
    let report = err.report();
    assert_eq!(report.kind, ErrorKind::Domain);
    assert_eq!(report.operator_or_function.as_deref(), Some("%"));
    assert_eq!(report.value, Some(0.0));
    assert_eq!(report.span, None);
    assert!(!report.render("").contains('\n'));
}

#[test]
fn deep_nesting_does_not_overflow() {
    let depth = 5_000;
    let formula = format!("{}x{}", "(".repeat(depth), ")".repeat(depth));
    assert_eq!(evaluate_formula_at(&formula, 2.0).unwrap(), 2.0);

    let depth = 300_000;
    let negations = Formula::parse(&format!("{}x", "-".repeat(depth))).unwrap();
    assert_eq!(negations.eval_at(2.0).unwrap(), 2.0);
    assert_eq!(negations.ast().node_count(), depth + 1);
    assert!(negations.ast().uses_variable());
    drop(negations);
}

#[test]
fn overflowing_literals_survive_rendering() {
    let digits = "9".repeat(400);
    let formula = Formula::parse(&format!("{digits} + x")).unwrap();
    assert_eq!(formula.eval_at(1.0).unwrap(), f64::INFINITY);

    let reparsed = Formula::parse(&formula.to_string()).unwrap();
    assert_eq!(reparsed.to_string(), formula.to_string());
    assert_eq!(reparsed.eval_at(1.0).unwrap(), f64::INFINITY);
}

#[test]
fn strict_policy_over_a_domain() {
    let ast = parse_formula("1 / x").unwrap();
    let env = Environment::vector(vec![1.0, 0.0]);
    let mut ctx = Context::with_policy(&env, DomainPolicy::Strict);

    assert_eq!(ctx.policy(), DomainPolicy::Strict);
    match ctx.eval(&ast) {
        Err(EvalError::Domain { error, span }) => {
            assert_eq!(error.kind, DomainErrorKind::DivideByZero);
            assert_eq!(span, Span::new(2, 3));
        },
        other => panic!("expected a domain error, got {other:?}"),
    }
}

#[test]
fn engine_errors_expose_the_domain_failure() {
    let err = evaluate_formula_at("x % 0", 1.0).unwrap_err();
    assert_eq!(err.domain_error().map(|e| e.kind), Some(DomainErrorKind::ModuloByZero));

    let err = parse_formula("sin(").unwrap_err();
    assert_eq!(err.domain_error(), None);
}

#[test]
fn curve_values_can_be_taken() {
    let curve = evaluate_formula("x * 10", &[0.5, 1.5]).unwrap();
    assert_eq!(curve.into_values(), vec![5.0, 15.0]);
}
