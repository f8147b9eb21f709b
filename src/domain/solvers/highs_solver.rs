use crate::domain::polyhedron::Polyhedron;
use crate::domain::solver::{RawSolution, Solver};
use crate::error::SolverError;
use crate::models::Status;

use ::highs::{ColProblem, HighsModelStatus, Sense};
use std::time::Duration;

/// HiGHS solver implementation
pub struct HighsSolver {
    time_limit: Option<Duration>,
}

impl HighsSolver {
    pub fn new() -> Self {
        HighsSolver { time_limit: None }
    }

    pub fn with_time_limit(time_limit: Option<Duration>) -> Self {
        HighsSolver { time_limit }
    }

    /// Convert HiGHS status to our API status
    fn convert_status(model_status: HighsModelStatus) -> Status {
        match model_status {
            HighsModelStatus::Optimal => Status::Optimal,
            HighsModelStatus::Infeasible => Status::Infeasible,
            HighsModelStatus::UnboundedOrInfeasible => Status::Unbounded,
            HighsModelStatus::Unbounded => Status::Unbounded,
            _ => Status::Error,
        }
    }
}

impl Default for HighsSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver for HighsSolver {
    fn solve(&self, polyhedron: &Polyhedron) -> Result<RawSolution, SolverError> {
        let mut problem = ColProblem::new();

        // First, add all constraint rows
        let rows: Vec<_> = polyhedron
            .b
            .iter()
            .map(|&rhs| problem.add_row(..=rhs as f64))
            .collect();

        // Then the columns with their coefficients in those rows
        let col_data = polyhedron.column_entries();
        for (col_idx, var) in polyhedron.variables.iter().enumerate() {
            let (lower, upper) = var.bound;
            let row_factors: Vec<_> = col_data[col_idx]
                .iter()
                .map(|&(row_idx, val)| (rows[row_idx], val))
                .collect();

            problem.add_integer_column(
                polyhedron.objective[col_idx],
                lower as f64..=upper as f64,
                &row_factors,
            );
        }

        let mut model = problem.optimise(Sense::Minimise);
        model.set_option("presolve", "off");
        if let Some(limit) = self.time_limit {
            model.set_option("time_limit", limit.as_secs_f64());
        }
        let solved = model.solve();

        let model_status = solved.status();
        if let (Some(limit), HighsModelStatus::ReachedTimeLimit) = (self.time_limit, model_status) {
            return Err(SolverError::Timeout(limit));
        }

        let status = Self::convert_status(model_status);
        if status != Status::Optimal {
            return Ok(RawSolution::without_values(status));
        }

        let solution = solved.get_solution();
        let values = solution.columns().to_vec();
        if values.len() != polyhedron.variables.len() {
            return Err(SolverError::MissingValues {
                expected: polyhedron.variables.len(),
                got: values.len(),
            });
        }

        Ok(RawSolution::optimal(values))
    }

    fn name(&self) -> &str {
        "HiGHS"
    }
}
