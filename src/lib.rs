//! Cheapest way to fill a shopping cart from many sellers with flat shipping fees.
//!
//! The wanted list and seller catalogs become a mixed-integer program: one integer
//! column per (item, seller) pair the seller stocks, one binary "ship" column per
//! seller. A pluggable [`Solver`] backend minimizes it and the answer is decoded into
//! a [`SolutionPlan`].

pub mod config;
pub mod convert;
pub mod domain;
pub mod error;
pub mod models;

pub use domain::optimize::optimize_cart;
pub use domain::solver::{RawSolution, Solver};
pub use domain::solver_factory::{create_solver, SolverType};
pub use error::{CartError, SolverError};
pub use models::{
    CatalogEntry, OptimizeRequest, PurchasedItem, SellerOffer, SellerPurchase, SolutionPlan,
    Status, WantedItem,
};
