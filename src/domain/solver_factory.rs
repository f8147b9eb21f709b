use std::fmt;
use std::time::Duration;

use crate::domain::solver::Solver;
use crate::domain::solvers::GlpkSolver;

#[cfg(feature = "highs-solver")]
use crate::domain::solvers::HighsSolver;

#[cfg(feature = "gurobi-solver")]
use crate::domain::solvers::GurobiSolver;

/// Available solver backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverType {
    Glpk,
    #[cfg(feature = "highs-solver")]
    Highs,
    #[cfg(feature = "gurobi-solver")]
    Gurobi,
}

impl SolverType {
    /// Parse solver type from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "glpk" => Some(SolverType::Glpk),
            #[cfg(feature = "highs-solver")]
            "highs" => Some(SolverType::Highs),
            #[cfg(feature = "gurobi-solver")]
            "gurobi" => Some(SolverType::Gurobi),
            _ => None,
        }
    }

    /// Backends compiled into this build
    pub fn available() -> Vec<SolverType> {
        vec![
            SolverType::Glpk,
            #[cfg(feature = "highs-solver")]
            SolverType::Highs,
            #[cfg(feature = "gurobi-solver")]
            SolverType::Gurobi,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SolverType::Glpk => "glpk",
            #[cfg(feature = "highs-solver")]
            SolverType::Highs => "highs",
            #[cfg(feature = "gurobi-solver")]
            SolverType::Gurobi => "gurobi",
        }
    }
}

impl Default for SolverType {
    fn default() -> Self {
        SolverType::Glpk
    }
}

impl fmt::Display for SolverType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Create a solver instance based on the specified type
///
/// `time_limit` makes the backend give up with `SolverError::Timeout` instead of
/// running on; see each backend for what it can bound.
pub fn create_solver(solver_type: SolverType, time_limit: Option<Duration>) -> Box<dyn Solver> {
    match solver_type {
        SolverType::Glpk => Box::new(GlpkSolver::with_time_limit(time_limit)),
        #[cfg(feature = "highs-solver")]
        SolverType::Highs => Box::new(HighsSolver::with_time_limit(time_limit)),
        #[cfg(feature = "gurobi-solver")]
        SolverType::Gurobi => Box::new(GurobiSolver::with_time_limit(time_limit)),
    }
}
