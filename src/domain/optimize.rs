use std::collections::BTreeMap;

use log::{debug, info};

use crate::domain::builder::build_model;
use crate::domain::extract::extract_plan;
use crate::domain::normalize::normalize;
use crate::domain::solver::Solver;
use crate::error::Result;
use crate::models::{SellerOffer, SolutionPlan, WantedItem};

/// Finds the cheapest way to buy every wanted item from the given sellers.
///
/// Runs normalize → build → solve → extract on fresh state. An infeasible cart comes
/// back as `Ok` with `solvable: false`. Errors are invalid input or a solver that could
/// not answer.
pub fn optimize_cart(
    solver: &dyn Solver,
    wanted: &[WantedItem],
    sellers: &[SellerOffer],
) -> Result<SolutionPlan> {
    let input = normalize(wanted, sellers)?;

    // The "at least one seller" row would force a pointless purchase
    if input.items.is_empty() {
        debug!("Empty wanted list, nothing to buy");
        return Ok(SolutionPlan::solved(0.0, BTreeMap::new()));
    }

    let model = build_model(&input)?;

    if model.polyhedron.trivially_infeasible() {
        info!("Cart is not solvable: a wanted item has no seller");
        return Ok(SolutionPlan::unsolvable());
    }

    debug!(
        "Solving cart model with {} ({} columns, {} rows)",
        solver.name(),
        model.polyhedron.ncols(),
        model.polyhedron.nrows(),
    );
    let solution = solver.solve(&model.polyhedron)?;

    let plan = extract_plan(&input, &model.registry, &solution)?;
    if let Some(total) = plan.total {
        info!(
            "Cart solved by {}: total {} across {} sellers",
            solver.name(),
            total,
            plan.sellers.as_ref().map_or(0, |s| s.len()),
        );
    }
    Ok(plan)
}
