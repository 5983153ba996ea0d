//! This module contains all custom errors used in this library.

use std::io;
use std::num::ParseIntError;
use thiserror::Error;

/// Errors of the edge list grammar `{<a,b>,<c,d>,...}`.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("edge list ended early, expected {expected}")]
    UnexpectedEnd { expected: &'static str },
    #[error("unexpected '{found}' at position {position}, expected {expected}")]
    Unexpected {
        position: usize,
        found: char,
        expected: &'static str,
    },
    #[error("malformed vertex number at position {position}")]
    BadInt {
        position: usize,
        #[source]
        source: ParseIntError,
    },
}

/// Errors raised while (re)building a `UGraph`.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("Invalid vertex count {0}")]
    InvalidSize(i64),
    /// `a` and `b` are the 1-indexed endpoints as given in the input.
    #[error("Invalid Edge specified <{a},{b}> for {num_vertices} vertices")]
    InvalidEdge { a: i64, b: i64, num_vertices: usize },
    #[error("Invalid Edge specified: {0}")]
    Malformed(#[from] ParseError),
}

#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("No vertex cover found for {num_vertices} vertices")]
    NoCoverFound { num_vertices: usize },
    #[error("Search interrupted while solving for a cover of size {k}")]
    Interrupted { k: usize },
    #[error("Solver failed on a cover of size {k}: {reason}")]
    OracleFailed { k: usize, reason: String },
    /// The formula for `k` would need more than `Var::LIMIT` variables.
    #[error("Graph too large: a cover of size {k} of {num_vertices} vertices cannot be encoded")]
    TooLarge { num_vertices: usize, k: usize },
    #[error("InvalidSolution: {0}")]
    InvalidSolution(String),
    #[error("Could not dump formula: {0}")]
    Dump(#[from] io::Error),
}

/// Everything a single command line can fail with. All variants are recovered by the session
/// loop.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Invalid arguments for {command} command: {found:?}")]
    Arguments { command: char, found: Vec<String> },
    #[error("Command not supported: {0}")]
    Unsupported(String),
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error(transparent)]
    Processing(#[from] ProcessingError),
}
