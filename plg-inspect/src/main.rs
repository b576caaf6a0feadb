/// PLG Inspector - import a PLG object file and print what was loaded
///
/// Usage: plg-inspect <FILE> [--scale S] [--config CONFIG.toml] [--radius max|average] [--vertices]
///
/// Set RUST_LOG=debug to trace the importer's phases.
use clap::Parser;
use std::error::Error;
use std::io::stdout;
use std::process::ExitCode;

use plg_inspect::Args;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    match plg_inspect::run(&args, &mut stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("plg-inspect: {}", err);
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {}", cause);
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}
