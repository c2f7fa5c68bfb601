//! ecma-parse
//!
//! Parses ECMAScript sources given as files or `--eval` text and prints the
//! ESTree JSON of each. Exits with status 1 if any input fails.

use clap::Parser as ClapParser;
use ecma_cli::{Cli, CliError, CliResult, ErrorReport, Input, Runner};
use tracing_subscriber::EnvFilter;

fn init_tracing(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn inputs(cli: &Cli) -> CliResult<Vec<Input>> {
    if let Some(code) = &cli.eval {
        return Ok(vec![Input::eval(code.as_str())]);
    }
    if cli.files.is_empty() {
        return Err(CliError::NoInput);
    }
    cli.files.iter().map(|path| Input::read(path)).collect()
}

fn report(cli: &Cli, name: &str, err: &CliError) -> CliResult<()> {
    match err.parse_error() {
        Some(error) if cli.json_errors => {
            println!("{}", serde_json::to_string(&ErrorReport::new(name, error))?);
        }
        _ => eprintln!("Error: {}", err),
    }
    Ok(())
}

fn run(cli: &Cli) -> CliResult<bool> {
    let runner = Runner::new(cli.options()?)
        .with_compact(cli.compact)
        .with_check_only(cli.check);
    let inputs = inputs(cli)?;
    let mut ok = true;
    for (input, result) in inputs.iter().zip(runner.run_all(&inputs)) {
        match result {
            Ok(json) if json.is_empty() => {}
            Ok(json) => println!("{}", json),
            Err(err) => {
                ok = false;
                report(cli, &input.name, &err)?;
            }
        }
    }
    Ok(ok)
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    }
}
