use std::process::ExitCode;

use clap::{Parser, Subcommand};
use plotcalc::{BinaryOpSymbol, EngineError, EvalOptions, Formula, evaluate_scalar_binary, linspace};

/// plotcalc is a sandboxed calculator and formula plotter for expressions in
/// one variable `x`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Applies one operation to two numbers, e.g. `calc 8 log 2`.
    Calc {
        #[arg(allow_negative_numbers = true)]
        x:  f64,
        /// One of `+ - * / % ** log`, or its name (`add`, `pow`, ...).
        op: BinaryOpSymbol,
        #[arg(allow_negative_numbers = true)]
        y:  f64,
    },
    /// Lists the calculator's operations.
    Ops,
    /// Evaluates a formula at a single point.
    Eval {
        formula: String,
        /// Value bound to `x`.
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        x:       f64,
    },
    /// Samples a formula over an interval and prints `x<TAB>y` rows.
    ///
    /// Points where the formula is undefined print as `NaN`; a summary of
    /// them goes to stderr.
    Plot {
        formula:    String,
        #[arg(long, default_value_t = -10.0, allow_negative_numbers = true)]
        from:       f64,
        #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
        to:         f64,
        #[arg(long, default_value_t = 401)]
        samples:    usize,
        /// Evaluate on the calling thread only.
        #[arg(long)]
        sequential: bool,
        /// Number of points per parallel chunk.
        #[arg(long, default_value_t = plotcalc::formula::DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,
    },
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let (source, result) = match args.command {
        Command::Calc { x, op, y } => (String::new(), calc(x, op, y)),
        Command::Ops => {
            for op in BinaryOpSymbol::ALL {
                println!("{:<4}{}", op.symbol(), op.label());
            }
            return ExitCode::SUCCESS;
        },
        Command::Eval { formula, x } => {
            let result = eval(&formula, x);
            (formula, result)
        },
        Command::Plot { formula,
                        from,
                        to,
                        samples,
                        sequential,
                        chunk_size, } => {
            let options = EvalOptions { parallel: !sequential,
                                        chunk_size };
            let result = plot(&formula, &linspace(from, to, samples), options);
            (formula, result)
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.report().render(&source));
            ExitCode::FAILURE
        },
    }
}

fn calc(x: f64, op: BinaryOpSymbol, y: f64) -> Result<(), EngineError> {
    let result = evaluate_scalar_binary(op, x, y)?;
    println!("{result}");
    Ok(())
}

fn eval(formula: &str, x: f64) -> Result<(), EngineError> {
    let result = Formula::parse(formula)?.eval_at(x)?;
    println!("{result}");
    Ok(())
}

fn plot(formula: &str, domain: &[f64], options: EvalOptions) -> Result<(), EngineError> {
    let formula = Formula::parse(formula)?;
    let curve = formula.eval_over_with(domain, options)?;

    for (x, y) in domain.iter().zip(curve.values()) {
        println!("{x}\t{y}");
    }
    for warning in curve.warnings() {
        eprintln!("{}", warning.report().render(formula.source()));
    }
    Ok(())
}

/// Installs a `fmt` subscriber when `RUST_LOG` is set.
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry().with(fmt::layer().with_writer(std::io::stderr)
                                                        .with_target(true)
                                                        .with_level(true))
                                      .with(EnvFilter::from_default_env())
                                      .init();
    }
}
