use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ---------- API (wire) types: owned & serde-friendly ----------

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WantedItem {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub quantity: i64, // signed so non-positive values reach validation
}

impl WantedItem {
    pub fn new(id: impl Into<String>, quantity: i64) -> Self {
        WantedItem {
            id: id.into(),
            name: None,
            quantity,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct CatalogEntry {
    pub price: f64,
    pub quantity: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SellerOffer {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(alias = "shipping")]
    pub shipping_fee: f64,
    pub catalog: BTreeMap<String, CatalogEntry>,
}

impl SellerOffer {
    pub fn new(id: impl Into<String>, shipping_fee: f64) -> Self {
        SellerOffer {
            id: id.into(),
            name: None,
            shipping_fee,
            catalog: BTreeMap::new(),
        }
    }

    /// Adds (or replaces) a catalog entry, builder style.
    pub fn with_item(mut self, item_id: impl Into<String>, price: f64, quantity: i64) -> Self {
        self.catalog
            .insert(item_id.into(), CatalogEntry { price, quantity });
        self
    }

    /// Label used in log lines: the seller name when present, the id otherwise.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeRequest {
    pub wanted_items: Vec<WantedItem>,
    pub sellers: Vec<SellerOffer>,
}

// ---------- API response types ----------

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PurchasedItem {
    pub id: String,
    pub quantity: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SellerPurchase {
    pub shipping_fee: f64,
    pub items: Vec<PurchasedItem>,
}

/// Outcome of one optimization. `total` and `sellers` are present iff `solvable`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SolutionPlan {
    pub solvable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sellers: Option<BTreeMap<String, SellerPurchase>>,
}

impl SolutionPlan {
    pub fn unsolvable() -> Self {
        SolutionPlan {
            solvable: false,
            total: None,
            sellers: None,
        }
    }

    pub fn solved(total: f64, sellers: BTreeMap<String, SellerPurchase>) -> Self {
        SolutionPlan {
            solvable: true,
            total: Some(total),
            sellers: Some(sellers),
        }
    }
}

/// Solve outcome as reported by a solver backend.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Optimal,
    Infeasible,
    Unbounded,
    Error,
}
