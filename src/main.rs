//! # sat-dpll
//!
//! Command-line front end of the DPLL solver. Reads CNF formulas in DIMACS
//! format and prints one verdict line per formula: `sat` followed by the
//! signed literals of every assigned variable, or `unsat`.
//!
//! ## Usage
//!
//! ```sh
//! # Solve a DIMACS file, or every .cnf file below a directory
//! sat-dpll problem.cnf
//! sat-dpll benchmarks/
//!
//! # Subcommands
//! sat-dpll file --path problem.cnf --seed 42 --stats
//! sat-dpll text --input "p cnf 2 2
//! 1 2 0
//! -1 -2 0"
//! sat-dpll dir --path benchmarks/ --restart-strategy never
//! sat-dpll completions bash
//! ```
//!
//! Statistics are printed as DIMACS comment lines (`c ...`) after the verdict.
//! Logging goes to stderr; `--debug` turns on search-level messages and
//! `RUST_LOG` (for example `RUST_LOG=restart=debug,propagation=trace`) gives
//! finer control.

mod command_line;

use crate::command_line::cli::{Cli, CliError, Commands, CommonOptions, solve_dir, solve_file, solve_text};
use clap::{CommandFactory, Parser};
use std::path::Path;
use std::process::ExitCode;

/// Global allocator using `tikv-jemallocator` for performance and memory usage tracking.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

fn solve_path(path: &Path, common: &CommonOptions) -> Result<(), CliError> {
    if path.is_dir() {
        solve_dir(path, common)
    } else {
        solve_file(path, common)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::File { path, common }) => {
            init_logging(common.debug);
            solve_file(&path, &common)
        }
        Some(Commands::Text { input, common }) => {
            init_logging(common.debug);
            solve_text(&input, &common)
        }
        Some(Commands::Dir { path, common }) => {
            init_logging(common.debug);
            solve_dir(&path, &common)
        }
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
        None => {
            init_logging(cli.common.debug);
            match cli.path {
                Some(path) => solve_path(&path, &cli.common),
                None => {
                    log::error!("No input provided. Use --help for more information.");
                    return ExitCode::FAILURE;
                }
            }
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
