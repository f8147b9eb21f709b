use std::collections::BTreeMap;

use log::{debug, warn};

use crate::domain::builder::{VariableKey, VariableRegistry};
use crate::domain::normalize::NormalizedInput;
use crate::domain::solver::RawSolution;
use crate::error::SolverError;
use crate::models::{PurchasedItem, SellerPurchase, SolutionPlan, Status};

/// Ship indicators at or above this value count as 1.
const INDICATOR_THRESHOLD: f64 = 0.5;

/// Decodes solver output into a seller-keyed purchase plan.
///
/// Integer columns are rounded to the nearest integer before use, so values like
/// `0.999999` or `1.000001` read as one unit. Sellers whose indicator is off are left
/// out, whatever noise their allocation columns carry. A seller whose indicator is on
/// but who supplies nothing (only possible with a zero fee) is left out too.
pub fn extract_plan(
    input: &NormalizedInput,
    registry: &VariableRegistry,
    solution: &RawSolution,
) -> Result<SolutionPlan, SolverError> {
    if solution.status != Status::Optimal {
        warn!("Cart is not solvable: solver status {:?}", solution.status);
        return Ok(SolutionPlan::unsolvable());
    }

    if solution.values.len() != registry.len() {
        return Err(SolverError::MissingValues {
            expected: registry.len(),
            got: solution.values.len(),
        });
    }

    let shipped: Vec<bool> = (0..input.sellers.len())
        .map(|seller| {
            registry
                .ship_column(seller)
                .map(|col| solution.values[col] >= INDICATOR_THRESHOLD)
                .unwrap_or(false)
        })
        .collect();

    let mut items_by_seller: Vec<Vec<PurchasedItem>> = vec![Vec::new(); input.sellers.len()];
    let mut total = 0.0;

    for (col, key) in registry.iter() {
        let (item, seller) = match key {
            VariableKey::Allocation { item, seller } => (item, seller),
            VariableKey::Ship { .. } => continue,
        };
        if !shipped[seller] {
            continue;
        }

        let quantity = solution.values[col].round();
        if quantity < 1.0 {
            continue;
        }

        let offers = &input.sellers[seller].offers;
        if let Ok(pos) = offers.binary_search_by_key(&item, |offer| offer.item) {
            total += quantity * offers[pos].unit_price;
        }
        items_by_seller[seller].push(PurchasedItem {
            id: input.items[item].to_string(),
            quantity: quantity as i64,
        });
    }

    let mut sellers = BTreeMap::new();
    for (idx, items) in items_by_seller.into_iter().enumerate() {
        let seller = &input.sellers[idx];
        if !shipped[idx] {
            continue;
        }
        if items.is_empty() {
            debug!("Seller {} selected without purchases, skipping", seller.label);
            continue;
        }

        total += seller.shipping_fee;
        sellers.insert(
            seller.id.to_string(),
            SellerPurchase {
                shipping_fee: seller.shipping_fee,
                items,
            },
        );
    }

    debug!("Extracted plan: {} sellers, total {}", sellers.len(), total);

    Ok(SolutionPlan::solved(total, sellers))
}
