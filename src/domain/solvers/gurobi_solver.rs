use crate::domain::polyhedron::{Polyhedron, VariableKind};
use crate::domain::solver::{RawSolution, Solver};
use crate::error::SolverError;
use crate::models::Status;

use grb::prelude::*;
use std::time::Duration;

/// Gurobi solver implementation
pub struct GurobiSolver {
    time_limit: Option<Duration>,
}

impl GurobiSolver {
    pub fn new() -> Self {
        GurobiSolver { time_limit: None }
    }

    pub fn with_time_limit(time_limit: Option<Duration>) -> Self {
        GurobiSolver { time_limit }
    }

    /// Convert Gurobi status to our API status
    fn convert_status(status: grb::Status) -> Status {
        match status {
            grb::Status::Optimal => Status::Optimal,
            grb::Status::Infeasible => Status::Infeasible,
            grb::Status::InfOrUnbd | grb::Status::Unbounded => Status::Unbounded,
            _ => Status::Error,
        }
    }
}

impl Default for GurobiSolver {
    fn default() -> Self {
        Self::new()
    }
}

fn backend(context: &str) -> impl Fn(grb::Error) -> SolverError + '_ {
    move |e| SolverError::Backend(format!("{}: {}", context, e))
}

impl Solver for GurobiSolver {
    fn solve(&self, polyhedron: &Polyhedron) -> std::result::Result<RawSolution, SolverError> {
        let mut env = Env::new("").map_err(backend("Failed to create Gurobi environment"))?;

        // Set to 1 to enable verbose logging for debugging
        env.set(param::OutputFlag, 0)
            .map_err(backend("Failed to set Gurobi output flag"))?;

        // 0 = use all available cores
        env.set(param::Threads, 0)
            .map_err(backend("Failed to set Gurobi thread count"))?;

        if let Some(limit) = self.time_limit {
            env.set(param::TimeLimit, limit.as_secs_f64())
                .map_err(backend("Failed to set Gurobi time limit"))?;
        }

        let mut model = Model::with_env("cart", &env)
            .map_err(backend("Failed to create Gurobi model"))?;

        let mut vars: Vec<Var> = Vec::with_capacity(polyhedron.variables.len());
        for var in polyhedron.variables.iter() {
            let (lower, upper) = var.bound;

            let gurobi_var = match var.kind {
                VariableKind::Binary => add_binvar!(model, name: &var.id)
                    .map_err(backend("Failed to add binary variable"))?,
                VariableKind::Integer => add_intvar!(
                    model,
                    name: &var.id,
                    bounds: lower as f64..upper as f64
                )
                .map_err(backend("Failed to add integer variable"))?,
            };
            vars.push(gurobi_var);
        }

        model
            .update()
            .map_err(backend("Failed to update model after adding variables"))?;

        // Add constraints (Ax <= b), keeping empty rows so `0 <= b` is still enforced
        for (row_idx, entries) in polyhedron.row_entries().iter().enumerate() {
            let rhs = polyhedron.b[row_idx] as f64;
            let expr = entries.iter().fold(Expr::Constant(0.0), |acc, &(col_idx, coeff)| {
                acc + coeff * vars[col_idx]
            });

            let constraint_name = format!("c{}", row_idx);
            model
                .add_constr(&constraint_name, c!(expr <= rhs))
                .map_err(backend("Failed to add constraint"))?;
        }

        let obj_expr = polyhedron.objective.iter().enumerate().fold(
            Expr::Constant(0.0),
            |acc, (idx, &coeff)| {
                if coeff != 0.0 {
                    acc + coeff * vars[idx]
                } else {
                    acc
                }
            },
        );

        model
            .set_objective(obj_expr, ModelSense::Minimize)
            .map_err(backend("Failed to set objective"))?;

        model.optimize().map_err(backend("Failed to optimize"))?;

        let model_status = model
            .status()
            .map_err(backend("Failed to get model status"))?;
        // An incumbent found before the limit is not proven optimal
        if let (Some(limit), grb::Status::TimeLimit) = (self.time_limit, model_status) {
            return Err(SolverError::Timeout(limit));
        }
        let status = Self::convert_status(model_status);
        if status != Status::Optimal {
            return Ok(RawSolution::without_values(status));
        }

        let values = vars
            .iter()
            .map(|var| model.get_obj_attr(attr::X, var))
            .collect::<grb::Result<Vec<f64>>>()
            .map_err(backend("Failed to read solution values"))?;

        Ok(RawSolution::optimal(values))
    }

    fn name(&self) -> &str {
        "Gurobi"
    }
}
