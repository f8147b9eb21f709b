use std::collections::HashMap;

use cart_optimizer::domain::builder::{build_model, VariableKey};
use cart_optimizer::domain::normalize::normalize;
use cart_optimizer::domain::polyhedron::Polyhedron;
use cart_optimizer::domain::solvers::GlpkSolver;
use cart_optimizer::{optimize_cart, SellerOffer, SolutionPlan, WantedItem};

fn two_sellers(second_price_of_a: f64) -> Vec<SellerOffer> {
    vec![
        SellerOffer::new("1", 10.0)
            .with_item("A", 50.0, 1)
            .with_item("B", 20.0, 1),
        SellerOffer::new("2", 30.0).with_item("A", second_price_of_a, 1),
    ]
}

/// Checks quantity conservation, capacity, shipping consistency and cost accounting.
fn assert_plan_is_consistent(wanted: &[WantedItem], sellers: &[SellerOffer], plan: &SolutionPlan) {
    assert!(plan.solvable);
    let plan_sellers = plan.sellers.as_ref().expect("solvable plan has sellers");
    let offers: HashMap<&str, &SellerOffer> = sellers.iter().map(|s| (s.id.as_str(), s)).collect();

    let mut bought: HashMap<&str, i64> = HashMap::new();
    let mut cost = 0.0;
    for (seller_id, purchase) in plan_sellers {
        let seller = offers[seller_id.as_str()];
        assert!(!purchase.items.is_empty());
        assert_eq!(purchase.shipping_fee, seller.shipping_fee);
        cost += purchase.shipping_fee;

        for item in &purchase.items {
            let entry = seller.catalog[&item.id];
            assert!(item.quantity > 0);
            assert!(item.quantity <= entry.quantity);
            *bought.entry(item.id.as_str()).or_default() += item.quantity;
            cost += item.quantity as f64 * entry.price;
        }
    }

    for item in wanted {
        assert_eq!(bought.get(item.id.as_str()).copied(), Some(item.quantity));
    }
    assert_eq!(bought.len(), wanted.len());
    assert!((plan.total.unwrap() - cost).abs() < 1e-9);
}

fn satisfies(polyhedron: &Polyhedron, values: &[f64]) -> bool {
    let within_bounds = polyhedron
        .variables
        .iter()
        .zip(values)
        .all(|(v, &x)| v.bound.0 as f64 <= x && x <= v.bound.1 as f64);
    let rows_hold = polyhedron
        .row_entries()
        .iter()
        .zip(&polyhedron.b)
        .all(|(entries, &rhs)| {
            entries.iter().map(|&(col, val)| val * values[col]).sum::<f64>() <= rhs as f64
        });
    within_bounds && rows_hold
}

#[test]
fn test_split_order_is_cheaper() {
    let wanted = vec![WantedItem::new("A", 1), WantedItem::new("B", 1)];
    let sellers = two_sellers(19.0);

    let plan = optimize_cart(&GlpkSolver::new(), &wanted, &sellers).unwrap();

    assert_eq!(plan.total, Some(79.0));
    let plan_sellers = plan.sellers.as_ref().unwrap();
    assert_eq!(plan_sellers.len(), 2);
    assert_eq!(plan_sellers["1"].items[0].id, "B");
    assert_eq!(plan_sellers["2"].items[0].id, "A");
    assert_plan_is_consistent(&wanted, &sellers, &plan);
}

#[test]
fn test_single_order_is_cheaper() {
    let wanted = vec![WantedItem::new("A", 1), WantedItem::new("B", 1)];
    let sellers = two_sellers(21.0);

    let plan = optimize_cart(&GlpkSolver::new(), &wanted, &sellers).unwrap();

    assert_eq!(plan.total, Some(80.0));
    assert_eq!(plan.sellers.as_ref().unwrap().len(), 1);
    assert!(plan.sellers.as_ref().unwrap().contains_key("1"));
    assert_plan_is_consistent(&wanted, &sellers, &plan);
}

#[test]
fn test_need_to_buy_from_all_to_suit_quantity() {
    let wanted = vec![WantedItem::new("A", 2), WantedItem::new("B", 1)];
    let sellers = two_sellers(21.0);

    let plan = optimize_cart(&GlpkSolver::new(), &wanted, &sellers).unwrap();

    assert_eq!(plan.total, Some(131.0));
    assert_eq!(plan.sellers.as_ref().unwrap().len(), sellers.len());
    assert_plan_is_consistent(&wanted, &sellers, &plan);
}

#[test]
fn test_requested_quantities_are_not_available() {
    let wanted = vec![WantedItem::new("A", 2)];
    let sellers = vec![SellerOffer::new("1", 30.0).with_item("A", 21.0, 1)];

    let plan = optimize_cart(&GlpkSolver::new(), &wanted, &sellers).unwrap();

    assert_eq!(plan, SolutionPlan::unsolvable());
    let value = serde_json::to_value(&plan).unwrap();
    assert!(value.get("total").is_none());
    assert!(value.get("sellers").is_none());
}

#[test]
fn test_item_nobody_stocks_is_not_solvable() {
    let wanted = vec![WantedItem::new("A", 1), WantedItem::new("Q", 1)];
    let sellers = two_sellers(19.0);

    let plan = optimize_cart(&GlpkSolver::new(), &wanted, &sellers).unwrap();

    assert!(!plan.solvable);
}

#[test]
fn test_several_units_from_one_seller() {
    let wanted = vec![WantedItem::new("A", 3), WantedItem::new("B", 2)];
    let sellers = vec![
        SellerOffer::new("1", 5.0)
            .with_item("A", 4.0, 10)
            .with_item("B", 9.0, 1),
        SellerOffer::new("2", 5.0)
            .with_item("A", 3.0, 2)
            .with_item("B", 8.0, 5),
        SellerOffer::new("3", 100.0).with_item("B", 1.0, 5),
    ];

    let plan = optimize_cart(&GlpkSolver::new(), &wanted, &sellers).unwrap();

    // Seller 2 only has two A, so seller 1 adds the third: 5 + 5 + 2*3 + 4 + 2*8
    assert_eq!(plan.total, Some(36.0));
    let plan_sellers = plan.sellers.as_ref().unwrap();
    assert_eq!(plan_sellers["1"].items.len(), 1);
    assert_eq!(plan_sellers["2"].items.len(), 2);
    assert_plan_is_consistent(&wanted, &sellers, &plan);
}

#[test]
fn test_idle_seller_is_feasible_but_never_optimal() {
    let wanted = vec![WantedItem::new("A", 1), WantedItem::new("B", 1)];
    let sellers = two_sellers(21.0);
    let input = normalize(&wanted, &sellers).unwrap();
    let model = build_model(&input).unwrap();

    // Buy everything from seller 1 but switch seller 2's indicator on as well
    let values: Vec<f64> = model
        .registry
        .iter()
        .map(|(_, key)| match key {
            VariableKey::Ship { .. } => 1.0,
            VariableKey::Allocation { seller, .. } => if seller == 0 { 1.0 } else { 0.0 },
        })
        .collect();

    // The activation rows only stop buying without paying, not paying without buying
    assert!(satisfies(&model.polyhedron, &values));

    // The objective is what rules the idle seller out
    let plan = optimize_cart(&GlpkSolver::new(), &wanted, &sellers).unwrap();
    assert_eq!(model.polyhedron.evaluate(&values), 110.0);
    assert_eq!(plan.total, Some(80.0));
}

#[test]
fn test_empty_wanted_list_needs_no_sellers() {
    let sellers = two_sellers(19.0);

    let plan = optimize_cart(&GlpkSolver::new(), &[], &sellers).unwrap();

    assert!(plan.solvable);
    assert_eq!(plan.total, Some(0.0));
    assert!(plan.sellers.unwrap().is_empty());
}
