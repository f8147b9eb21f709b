use crate::domain::polyhedron::Polyhedron;
use crate::error::SolverError;
use crate::models::Status;

/// What a backend hands back: a status and, when optimal, one value per column.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSolution {
    pub status: Status,
    /// Indexed like `Polyhedron::variables`; empty unless `status` is `Optimal`
    pub values: Vec<f64>,
}

impl RawSolution {
    pub fn optimal(values: Vec<f64>) -> Self {
        RawSolution {
            status: Status::Optimal,
            values,
        }
    }

    pub fn without_values(status: Status) -> Self {
        RawSolution {
            status,
            values: Vec::new(),
        }
    }
}

/// Common interface for MIP solvers
pub trait Solver: Send + Sync {
    /// Minimize the polyhedron's objective over its integer points
    ///
    /// # Arguments
    /// * `polyhedron` - Constraints `Ax <= b`, variable bounds and kinds, objective
    ///
    /// # Returns
    /// The solve status with variable values, or an error when the backend could not
    /// determine an answer
    fn solve(&self, polyhedron: &Polyhedron) -> Result<RawSolution, SolverError>;

    /// Get the solver name for logging/debugging
    fn name(&self) -> &str;
}
