use std::process::ExitCode;

use clap::Parser;
use gametes_sweep_cluster::cli::Cli;
use gametes_sweep_cluster::{app, logging};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => {
            // --help and --version also arrive here and are not failures.
            let _ = error.print();
            return if error.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(error) = logging::init_logging() {
        eprintln!("ERROR: failed to initialise logging: {error}");
        return ExitCode::FAILURE;
    }

    match app::run(cli) {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("ERROR: {error}");
            println!("{error:?}");
            ExitCode::FAILURE
        }
    }
}
