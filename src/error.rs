use std::time::Duration;

use thiserror::Error;

/// Result type for cart optimization
pub type Result<T> = std::result::Result<T, CartError>;

/// Errors surfaced to callers of the optimizer.
///
/// An infeasible cart is not an error: it comes back as a plan with `solvable: false`.
#[derive(Error, Debug)]
pub enum CartError {
    /// Malformed wanted list or seller catalog
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The solver backend could not produce an answer
    #[error(transparent)]
    Solver(#[from] SolverError),
}

/// Failures of a solver backend to return a usable result
#[derive(Error, Debug)]
pub enum SolverError {
    /// The backend library reported a failure
    #[error("Solver backend failed: {0}")]
    Backend(String),

    /// The backend returned no solution at all
    #[error("Solver returned no solution")]
    EmptyResult,

    /// An optimal status came back without a value for every variable
    #[error("Solver returned {got} values for {expected} variables")]
    MissingValues { expected: usize, got: usize },

    /// The solve did not finish in the configured time
    #[error("Solver timed out after {0:?}")]
    Timeout(Duration),
}

impl CartError {
    pub fn invalid(details: impl Into<String>) -> Self {
        CartError::InvalidInput(details.into())
    }
}
