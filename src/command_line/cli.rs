#![allow(clippy::cast_precision_loss)]

use clap::{Args, Parser, Subcommand, ValueEnum};
use sat_dpll::sat::cnf::Cnf;
use sat_dpll::sat::dimacs::{ParseError, parse_file, parse_str};
use sat_dpll::sat::dpll::Dpll;
use sat_dpll::sat::restarter::{Geometric, Never, Restarter};
use sat_dpll::{Config, SolutionStats, Solver, SolverError, Verdict};
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;
use tikv_jemalloc_ctl::{epoch, stats};

/// Defines the command-line interface for the sat solver application.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(
    name = "sat-dpll",
    version,
    about = "A DPLL SAT solver with randomized restarts",
    long_about = "A DPLL SAT solver with unit propagation, chronological backtracking and \
                  randomized restarts.\n\nA flipped decision is never re-opened within a restart \
                  epoch, so `unsat` can be reported for formulas that are in fact satisfiable. \
                  A `sat` answer is always a genuine model."
)]
pub(crate) struct Cli {
    /// An optional path argument. If provided without a subcommand, it's
    /// treated as a DIMACS .cnf file, or a directory of them, to solve.
    pub path: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `file`, `text`, `dir`).
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve a CNF file in DIMACS format.
    File {
        /// Path to the DIMACS .cnf file.
        #[arg(long)]
        path: PathBuf,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a CNF formula provided as plain text.
    Text {
        /// DIMACS input as a string (e.g. "p cnf 3 2\n1 -2 0\n2 3 0").
        /// Each line after the problem line is one clause; 0 terminates a clause.
        #[arg(short, long)]
        input: String,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every .cnf file below a directory.
    Dir {
        #[arg(long)]
        path: PathBuf,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// When to restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum RestarterType {
    /// Cutoff doubles after every restart.
    #[default]
    Geometric,
    /// Never restart.
    Never,
}

impl Display for RestarterType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Geometric => write!(f, "geometric"),
            Self::Never => write!(f, "never"),
        }
    }
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct CommonOptions {
    /// Enable debug logging. `RUST_LOG` takes precedence.
    #[arg(short, long, default_value_t = false)]
    pub(crate) debug: bool,

    /// Re-check a found model against the formula.
    #[arg(short, long, default_value_t = true, action = clap::ArgAction::Set)]
    pub(crate) verify: bool,

    /// Print problem and search statistics after solving.
    #[arg(short, long, default_value_t = false)]
    pub(crate) stats: bool,

    /// Seed for polarity choices and restart shuffles.
    #[arg(long)]
    pub(crate) seed: Option<u64>,

    /// Backtracks before the first restart.
    #[arg(long, default_value_t = sat_dpll::sat::restarter::DEFAULT_CUTOFF)]
    pub(crate) restart_cutoff: usize,

    #[arg(long, default_value_t = RestarterType::Geometric)]
    pub(crate) restart_strategy: RestarterType,

    /// Give up after this many search iterations.
    #[arg(long)]
    pub(crate) max_iterations: Option<u64>,
}

impl Default for CommonOptions {
    fn default() -> Self {
        Self {
            debug: false,
            verify: true,
            stats: false,
            seed: None,
            restart_cutoff: sat_dpll::sat::restarter::DEFAULT_CUTOFF,
            restart_strategy: RestarterType::Geometric,
            max_iterations: None,
        }
    }
}

impl CommonOptions {
    pub(crate) fn config(&self) -> Config {
        Config {
            seed: self.seed,
            restart_cutoff: self.restart_cutoff,
            max_iterations: self.max_iterations,
        }
    }
}

/// Everything that can stop the front end.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("{}: {source}", .path.display())]
    Parse { path: PathBuf, source: ParseError },

    #[error(transparent)]
    Text(#[from] ParseError),

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error("model failed verification")]
    Verification,

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

/// Result of one solver run.
pub(crate) struct Outcome {
    pub verdict: Verdict,
    pub elapsed: Duration,
    pub stats: SolutionStats,
}

/// Solves `cnf` with the restart strategy and configuration from `common`.
pub(crate) fn solve(cnf: Cnf, common: &CommonOptions) -> Result<Outcome, SolverError> {
    match common.restart_strategy {
        RestarterType::Geometric => solve_with::<Geometric>(cnf, common),
        RestarterType::Never => solve_with::<Never>(cnf, common),
    }
}

fn solve_with<R: Restarter>(cnf: Cnf, common: &CommonOptions) -> Result<Outcome, SolverError> {
    let time = Instant::now();
    let mut solver: Dpll<R> = Dpll::with_config(cnf, common.config());
    let result = solver.solve();
    let elapsed = time.elapsed();

    log::debug!("Search finished in {elapsed:?}: {:?}", solver.stats());

    result.map(|verdict| Outcome {
        verdict,
        elapsed,
        stats: solver.stats(),
    })
}

/// Parses and solves one DIMACS file.
pub(crate) fn solve_file(path: &Path, common: &CommonOptions) -> Result<(), CliError> {
    let time = Instant::now();
    let cnf = parse_file(path).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let parse_time = time.elapsed();

    log::info!("Solving: {}", path.display());
    solve_and_report(cnf, common, parse_time)
}

/// Parses and solves DIMACS text given on the command line.
pub(crate) fn solve_text(input: &str, common: &CommonOptions) -> Result<(), CliError> {
    let time = Instant::now();
    let cnf = parse_str(input)?;
    let parse_time = time.elapsed();

    solve_and_report(cnf, common, parse_time)
}

/// Solves every `.cnf` file below `path`.
///
/// # Errors
///
/// Stops at the first file that fails to parse, solve or verify.
pub(crate) fn solve_dir(path: &Path, common: &CommonOptions) -> Result<(), CliError> {
    if !path.is_dir() {
        return Err(CliError::NotADirectory(path.to_path_buf()));
    }

    for entry in walkdir::WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path();

        if !file_path.is_file() {
            continue;
        }

        if file_path.extension().is_none_or(|ext| ext != "cnf") {
            log::debug!("Skipping non-CNF file: {}", file_path.display());
            continue;
        }

        println!("c {}", file_path.display());
        solve_file(file_path, common)?;
    }

    Ok(())
}

/// Solves `cnf`, prints the verdict line and, if asked, verification and statistics.
pub(crate) fn solve_and_report(
    cnf: Cnf,
    common: &CommonOptions,
    parse_time: Duration,
) -> Result<(), CliError> {
    let num_vars = cnf.num_vars;
    let num_clauses = cnf.len();
    let num_literals = cnf.num_literals();
    let check = common.verify.then(|| cnf.clone());

    let outcome = solve(cnf, common)?;

    println!("{}", outcome.verdict);

    if let (Some(cnf), Some(model)) = (check, outcome.verdict.solutions()) {
        let ok = cnf.verify(model);
        log::info!("Verified: {ok}");
        if !ok {
            return Err(CliError::Verification);
        }
    }

    if common.stats {
        print_stats(
            parse_time,
            &outcome,
            (num_vars, num_clauses, num_literals),
            memory_usage(),
        );
    }

    Ok(())
}

/// Allocated and resident memory in MiB, as reported by jemalloc.
pub(crate) fn memory_usage() -> Option<(f64, f64)> {
    epoch::advance().ok()?;

    let allocated_bytes = stats::allocated::read().ok()?;
    let resident_bytes = stats::resident::read().ok()?;

    Some((
        allocated_bytes as f64 / (1024.0 * 1024.0),
        resident_bytes as f64 / (1024.0 * 1024.0),
    ))
}

/// Helper function to print a single statistic line in a formatted table row.
pub(crate) fn stat_line(label: &str, value: impl Display) {
    println!("c |  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate (value/second).
pub(crate) fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("c |  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics as DIMACS comment lines.
pub(crate) fn print_stats(
    parse_time: Duration,
    outcome: &Outcome,
    (num_vars, num_clauses, num_literals): (usize, usize, usize),
    memory: Option<(f64, f64)>,
) {
    let s = &outcome.stats;
    let elapsed_secs = outcome.elapsed.as_secs_f64();

    println!("c =======================[ Problem Statistics ]=======================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Variables", num_vars);
    stat_line("Clauses", num_clauses);
    stat_line("Literals", num_literals);

    println!("c ========================[ Search Statistics ]=======================");
    stat_line_with_rate("Decisions", s.decisions, elapsed_secs);
    stat_line_with_rate("Propagations", s.propagations, elapsed_secs);
    stat_line_with_rate("Backtracks", s.backtracks, elapsed_secs);
    stat_line_with_rate("Restarts", s.restarts, elapsed_secs);
    stat_line("Final restart cutoff", s.restart_cutoff);
    stat_line("Iterations", s.iterations);
    if let Some((allocated, resident)) = memory {
        stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
        stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    }
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("c ====================================================================");
}
