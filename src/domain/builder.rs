use log::debug;

use crate::domain::normalize::NormalizedInput;
use crate::domain::polyhedron::{Polyhedron, VariableKind};
use crate::error::{CartError, Result};

/// Domain meaning of a model column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableKey {
    /// Binary: the seller is used and its shipping fee is paid
    Ship { seller: usize },
    /// Integer: units of `item` bought from `seller`
    Allocation { item: usize, seller: usize },
}

/// Column index → domain key, filled while the model is built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableRegistry {
    keys: Vec<VariableKey>,
    ship_columns: Vec<usize>,
}

impl VariableRegistry {
    fn register(&mut self, col: usize, key: VariableKey) {
        debug_assert_eq!(col, self.keys.len());
        if let VariableKey::Ship { seller } = key {
            debug_assert_eq!(seller, self.ship_columns.len());
            self.ship_columns.push(col);
        }
        self.keys.push(key);
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn key(&self, col: usize) -> Option<VariableKey> {
        self.keys.get(col).copied()
    }

    pub fn ship_column(&self, seller: usize) -> Option<usize> {
        self.ship_columns.get(seller).copied()
    }

    /// `(column, key)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, VariableKey)> + '_ {
        self.keys.iter().copied().enumerate()
    }
}

/// Row indices of each constraint family.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstraintRows {
    /// Per seller: allocations force the ship indicator on
    pub shipping: Vec<usize>,
    /// At least one seller is used
    pub any_seller: usize,
    /// Per wanted item: demand is met
    pub demand: Vec<usize>,
}

#[derive(Debug, Clone)]
pub struct BuiltModel {
    pub polyhedron: Polyhedron,
    pub registry: VariableRegistry,
    pub rows: ConstraintRows,
    pub big_m: i32,
}

/// Builds the cart MIP as a `<=` integer polyhedron.
///
/// Stock limits are column bounds. Each `>=` constraint is negated into `<=` form.
pub fn build_model(input: &NormalizedInput) -> Result<BuiltModel> {
    let big_m = big_m(input)?;

    let mut polyhedron = Polyhedron::new();
    let mut registry = VariableRegistry::default();
    let mut rows = ConstraintRows::default();

    let mut ship_columns = Vec::with_capacity(input.sellers.len());
    let mut columns_by_item: Vec<Vec<usize>> = vec![Vec::new(); input.items.len()];
    // Nothing wanted: picking a seller buys nothing, so it costs nothing
    let charge_shipping = !input.items.is_empty();

    for (seller_idx, seller) in input.sellers.iter().enumerate() {
        let fee = if charge_shipping { seller.shipping_fee } else { 0.0 };
        let ship = polyhedron.add_variable(VariableKind::Binary, (0, 1), fee);
        registry.register(ship, VariableKey::Ship { seller: seller_idx });
        ship_columns.push(ship);

        let mut shipping_row: Vec<(usize, i32)> = Vec::with_capacity(seller.offers.len() + 1);
        for offer in &seller.offers {
            let col = polyhedron.add_variable(
                VariableKind::Integer,
                (0, offer.available),
                offer.unit_price,
            );
            registry.register(
                col,
                VariableKey::Allocation {
                    item: offer.item,
                    seller: seller_idx,
                },
            );
            columns_by_item[offer.item].push(col);
            shipping_row.push((col, 1));
        }

        // Σ allocations - M * ship <= 0
        shipping_row.push((ship, -big_m));
        rows.shipping.push(polyhedron.add_row(&shipping_row, 0));
    }

    // Σ ship >= 1
    let any_seller: Vec<(usize, i32)> = ship_columns.iter().map(|&col| (col, -1)).collect();
    rows.any_seller = polyhedron.add_row(&any_seller, -1);

    // Σ allocations of item >= requested; an unstocked item leaves the row empty
    for (item_idx, columns) in columns_by_item.iter().enumerate() {
        let entries: Vec<(usize, i32)> = columns.iter().map(|&col| (col, -1)).collect();
        rows.demand
            .push(polyhedron.add_row(&entries, -input.requested[item_idx]));
    }

    debug!(
        "Built cart model: {} sellers, {} wanted items, {} columns, {} rows, M = {}",
        input.sellers.len(),
        input.items.len(),
        polyhedron.ncols(),
        polyhedron.nrows(),
        big_m,
    );

    Ok(BuiltModel {
        polyhedron,
        registry,
        rows,
        big_m,
    })
}

/// Activation constant: total wanted quantity plus the seller count.
fn big_m(input: &NormalizedInput) -> Result<i32> {
    let m = input.total_requested() + input.sellers.len() as i64;
    i32::try_from(m).map_err(|_| {
        CartError::invalid(format!(
            "Cart is too large for the solver: activation bound {} exceeds {}",
            m,
            i32::MAX,
        ))
    })
}
