use crate::domain::polyhedron::{IntegerSparseMatrix, Polyhedron};
use crate::models::Status;
use std::collections::HashMap;

use glpk_rust::{
    Bound, IntegerSparseMatrix as GlpkMatrix, SparseLEIntegerPolyhedron as GlpkPoly,
    Status as GlpkStatus, Variable as GlpkVar,
};

/// Convert the model objective to the borrowed map GLPK expects.
pub fn to_borrowed_objective(polyhedron: &Polyhedron) -> HashMap<&str, f64> {
    polyhedron
        .variables
        .iter()
        .zip(&polyhedron.objective)
        .filter(|(_, &coeff)| coeff != 0.0)
        .map(|(v, &coeff)| (v.id.as_str(), coeff))
        .collect()
}

/// Convert the model polyhedron to a GLPK LE polyhedron by building borrowed variables.
pub fn to_glpk_polyhedron(le: &Polyhedron) -> GlpkPoly<'_> {
    let a = to_glpk_matrix(&le.a);
    let b: Vec<Bound> = le.b.iter().map(|&v| (0, v)).collect();

    let variables: Vec<GlpkVar<'_>> = le
        .variables
        .iter()
        .map(|v| GlpkVar {
            id: v.id.as_str(), // borrow directly from the model variable
            bound: v.bound,
        })
        .collect();

    GlpkPoly {
        a,
        b,
        variables,
        double_bound: false,
    }
}

fn to_glpk_matrix(m: &IntegerSparseMatrix) -> GlpkMatrix {
    GlpkMatrix {
        rows: m.rows.clone(),
        cols: m.cols.clone(),
        vals: m.vals.clone(),
    }
}

impl From<GlpkStatus> for Status {
    fn from(s: GlpkStatus) -> Self {
        match s {
            GlpkStatus::Optimal => Status::Optimal,
            GlpkStatus::Infeasible | GlpkStatus::NoFeasible | GlpkStatus::EmptySpace => {
                Status::Infeasible
            }
            GlpkStatus::Unbounded => Status::Unbounded,
            // Feasible is not proven optimal
            GlpkStatus::Feasible
            | GlpkStatus::Undefined
            | GlpkStatus::SimplexFailed
            | GlpkStatus::MIPFailed => Status::Error,
        }
    }
}
