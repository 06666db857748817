use std::process::ExitCode;

use clap::Parser;
use hire::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    hire::logging::init(cli.verbose);

    match hire::run(&cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("Error: {error:#}");
            ExitCode::FAILURE
        }
    }
}
