use crate::convert::{to_borrowed_objective, to_glpk_polyhedron};
use crate::domain::polyhedron::Polyhedron;
use crate::domain::solver::{RawSolution, Solver};
use crate::error::SolverError;
use crate::models::Status;

use glpk_rust::{solve_ilps as glpk_solve_ilps, Solution};
use log::warn;
use parking_lot::Mutex;
use std::time::Duration;

const NO_TERMINAL_OUTPUT: bool = false;
const MINIMIZE: bool = false;

// GLPK keeps process-wide state, so solves from different threads take turns.
static GLPK_LOCK: Mutex<()> = parking_lot::const_mutex(());

/// GLPK solver implementation
///
/// GLPK solves cannot be interrupted, so the time limit only bounds the wait for
/// another thread's solve to release the library.
pub struct GlpkSolver {
    time_limit: Option<Duration>,
}

impl GlpkSolver {
    pub fn new() -> Self {
        GlpkSolver { time_limit: None }
    }

    pub fn with_time_limit(time_limit: Option<Duration>) -> Self {
        GlpkSolver { time_limit }
    }
}

impl Default for GlpkSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver for GlpkSolver {
    fn solve(&self, polyhedron: &Polyhedron) -> Result<RawSolution, SolverError> {
        let objective = to_borrowed_objective(polyhedron);

        // Solver expects &mut
        let mut glpk_polyhedron = to_glpk_polyhedron(polyhedron);

        let lib_solutions: Vec<Solution> = {
            let _guard = match self.time_limit {
                Some(limit) => GLPK_LOCK
                    .try_lock_for(limit)
                    .ok_or(SolverError::Timeout(limit))?,
                None => GLPK_LOCK.lock(),
            };
            glpk_solve_ilps(
                &mut glpk_polyhedron,
                vec![objective],
                MINIMIZE,
                NO_TERMINAL_OUTPUT,
            )
        };

        let solution = lib_solutions
            .into_iter()
            .next()
            .ok_or(SolverError::EmptyResult)?;

        if let Some(error) = &solution.error {
            warn!("GLPK reported: {}", error);
        }

        let status: Status = solution.status.into();
        if status != Status::Optimal {
            return Ok(RawSolution::without_values(status));
        }

        let values: Vec<f64> = polyhedron
            .variables
            .iter()
            .filter_map(|v| solution.solution.get(v.id.as_str()).map(|&x| x as f64))
            .collect();

        if values.len() != polyhedron.variables.len() {
            return Err(SolverError::MissingValues {
                expected: polyhedron.variables.len(),
                got: values.len(),
            });
        }

        Ok(RawSolution::optimal(values))
    }

    fn name(&self) -> &str {
        "GLPK"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::polyhedron::VariableKind;

    #[test]
    fn test_solve_given_busy_library_times_out() {
        let mut p = Polyhedron::new();
        let x = p.add_variable(VariableKind::Integer, (0, 3), 1.0);
        p.add_row(&[(x, -1)], -1);

        let limit = Duration::from_millis(50);
        let solver = GlpkSolver::with_time_limit(Some(limit));

        let _busy = GLPK_LOCK.lock();
        assert!(matches!(
            solver.solve(&p),
            Err(SolverError::Timeout(l)) if l == limit
        ));
    }
}
