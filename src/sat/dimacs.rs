#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A parser for DIMACS-style CNF input.
//!
//! The accepted format:
//! - Comment lines starting with `c` are skipped, as are blank lines before
//!   the problem line.
//! - A problem line `p cnf <num_variables> <num_clauses>` must come before the
//!   first clause. Only the variable count is used; the clause count is
//!   informational.
//! - Every other line is exactly one clause: whitespace-separated signed
//!   integers. A `0` ends the clause, even in the middle of a line, and the
//!   rest of the line is ignored. A line holding only `0`, and a blank line
//!   after the problem line, are the empty clause.
//! - A line starting with `%` ends the input (common in benchmark sets).
//!
//! Unlike the solver core, the parser checks every literal against the
//! declared variable count.

use crate::sat::clause::Clause;
use crate::sat::cnf::Cnf;
use crate::sat::log::targets;
use itertools::Itertools;
use std::io::{self, BufRead};
use std::path::Path;
use thiserror::Error;

/// Errors raised while reading DIMACS input. Line numbers are 1-based.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The underlying reader failed.
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),

    /// A clause, or the end of input, came before any `p cnf` line.
    #[error("missing `p cnf` problem line before the first clause")]
    MissingHeader,

    /// The problem line is not `p cnf <variables> [<clauses>]`.
    #[error("line {line}: malformed problem line, expected `p cnf <variables> <clauses>`")]
    InvalidHeader {
        /// Line of the problem line.
        line: usize,
    },

    /// A clause token does not parse as an integer.
    #[error("line {line}: `{token}` is not an integer literal")]
    InvalidLiteral {
        /// Line of the clause.
        line: usize,
        /// The offending token.
        token: String,
    },

    /// A literal names a variable above the declared count.
    #[error("line {line}: literal {literal} is outside 1..={num_vars}")]
    LiteralOutOfRange {
        /// Line of the clause.
        line: usize,
        /// The offending literal.
        literal: i32,
        /// Variable count from the problem line.
        num_vars: usize,
    },
}

/// Parses DIMACS text from a `BufRead` source.
///
/// # Errors
///
/// A [`ParseError`] for I/O failures, a missing or malformed problem line,
/// non-integer tokens and literals outside the declared variable range.
pub fn parse_dimacs<R: BufRead>(reader: R) -> Result<Cnf, ParseError> {
    let mut num_vars = None;
    let mut clauses: Vec<Vec<i32>> = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = i + 1;
        let mut parts = line.split_whitespace().peekable();

        match parts.peek() {
            None if num_vars.is_none() => {}
            Some(t) if t.starts_with('c') => {}
            Some(t) if t.starts_with('%') => break,
            Some(&"p") => {
                num_vars = Some(parse_header(parts, line_no)?);
            }
            _ => {
                let n = num_vars.ok_or(ParseError::MissingHeader)?;
                clauses.push(parse_clause(parts, n, line_no)?);
            }
        }
    }

    let num_vars = num_vars.ok_or(ParseError::MissingHeader)?;
    log::debug!(
        target: targets::DIMACS,
        "Parsed {} clauses over {num_vars} variables",
        clauses.len()
    );
    Ok(Cnf::new(num_vars, clauses))
}

fn parse_header<'a>(
    mut parts: impl Iterator<Item = &'a str>,
    line: usize,
) -> Result<usize, ParseError> {
    let invalid = || ParseError::InvalidHeader { line };

    if parts.next() != Some("p") || parts.next() != Some("cnf") {
        return Err(invalid());
    }

    let num_vars = parts
        .next()
        .and_then(|t| t.parse::<usize>().ok())
        .ok_or_else(invalid)?;

    if let Some(num_clauses) = parts.next() {
        num_clauses.parse::<usize>().map_err(|_| invalid())?;
    }

    Ok(num_vars)
}

fn parse_clause<'a>(
    parts: impl Iterator<Item = &'a str>,
    num_vars: usize,
    line: usize,
) -> Result<Vec<i32>, ParseError> {
    let mut literals = Vec::new();

    for token in parts {
        let literal = token
            .parse::<i32>()
            .map_err(|_| ParseError::InvalidLiteral {
                line,
                token: token.to_string(),
            })?;

        if literal == 0 {
            break;
        }

        if literal.unsigned_abs() as usize > num_vars {
            return Err(ParseError::LiteralOutOfRange {
                line,
                literal,
                num_vars,
            });
        }

        literals.push(literal);
    }

    Ok(literals)
}

/// Parses DIMACS text held in a string.
///
/// # Errors
///
/// See [`parse_dimacs`].
pub fn parse_str(input: &str) -> Result<Cnf, ParseError> {
    parse_dimacs(input.as_bytes())
}

/// Parses the DIMACS file at `path`.
///
/// # Errors
///
/// See [`parse_dimacs`]; opening the file may also fail.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Cnf, ParseError> {
    let file = std::fs::File::open(path)?;
    parse_dimacs(io::BufReader::new(file))
}

/// Clause literals of `cnf` in DIMACS order, for round-tripping and export.
#[must_use]
pub fn to_literals(cnf: &Cnf) -> Vec<Vec<i32>> {
    cnf.iter().map(Clause::to_dimacs).collect_vec()
}
