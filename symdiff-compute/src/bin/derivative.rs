use ariadne::Source;
use std::process::ExitCode;
use symdiff_compute::numerical::eval::evaluate;
use symdiff_compute::symbolic::{differentiate, taylor};
use symdiff_parser::{dump, parse, Error};
use tracing_subscriber::EnvFilter;

/// Differentiates the expression given on the command line (or `x^2 + 3*x`), evaluates the
/// derivative at `x = 2`, and prints its Taylor series of degree 3.
///
/// Set `RUST_LOG=debug` to trace the pipeline.
fn run(input: &str) -> Result<(), Error> {
    let tree = parse(input)?;
    println!("f(x)   = {}", tree);

    let derivative = differentiate(&tree, 'x')?;
    println!("f'(x)  = {}", derivative);
    println!("f'(2)  = {}", evaluate(&derivative, 2.0));

    let series = taylor(&tree, 3)?;
    println!("taylor = {}", series);

    println!();
    print!("{}", dump::store(&derivative));
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let input = if args.is_empty() {
        String::from("x^2 + 3*x")
    } else {
        args.join(" ")
    };

    match run(&input) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if err.spans.is_empty() {
                eprintln!("{}", err);
            } else {
                let _ = err.build_report("input").eprint(("input", Source::from(input.as_str())));
            }
            ExitCode::FAILURE
        },
    }
}
