use std::collections::{HashMap, HashSet};

use crate::error::{CartError, Result};
use crate::models::{SellerOffer, WantedItem};

/// One catalog entry of a seller for a wanted item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Offer {
    /// Index into `NormalizedInput::items`
    pub item: usize,
    pub unit_price: f64,
    pub available: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSeller<'a> {
    pub id: &'a str,
    pub label: &'a str,
    pub shipping_fee: f64,
    /// Only wanted items, in wanted-list order
    pub offers: Vec<Offer>,
}

/// Validated and indexed view over a wanted list and the seller catalogs.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedInput<'a> {
    /// Wanted item ids in request order
    pub items: Vec<&'a str>,
    /// Requested quantity per item index
    pub requested: Vec<i32>,
    pub item_index: HashMap<&'a str, usize>,
    pub sellers: Vec<NormalizedSeller<'a>>,
}

impl<'a> NormalizedInput<'a> {
    pub fn requested_quantity(&self, item_id: &str) -> Option<i32> {
        self.item_index.get(item_id).map(|&i| self.requested[i])
    }

    pub fn is_wanted(&self, item_id: &str) -> bool {
        self.item_index.contains_key(item_id)
    }

    pub fn total_requested(&self) -> i64 {
        self.requested.iter().map(|&q| q as i64).sum()
    }
}

pub fn normalize<'a>(
    wanted: &'a [WantedItem],
    sellers: &'a [SellerOffer],
) -> Result<NormalizedInput<'a>> {
    let mut items = Vec::with_capacity(wanted.len());
    let mut requested = Vec::with_capacity(wanted.len());
    let mut item_index: HashMap<&str, usize> = HashMap::with_capacity(wanted.len());

    for item in wanted {
        let quantity = to_solver_int(item.quantity).ok_or_else(|| {
            CartError::invalid(format!(
                "Wanted item {} has quantity {}, expected a positive integer",
                item.id, item.quantity,
            ))
        })?;
        if item_index.insert(item.id.as_str(), items.len()).is_some() {
            return Err(CartError::invalid(format!(
                "Wanted item {} is listed more than once",
                item.id,
            )));
        }
        items.push(item.id.as_str());
        requested.push(quantity);
    }

    let mut seen_sellers: HashSet<&str> = HashSet::with_capacity(sellers.len());
    let mut normalized_sellers = Vec::with_capacity(sellers.len());

    for seller in sellers {
        if !seen_sellers.insert(seller.id.as_str()) {
            return Err(CartError::invalid(format!(
                "Seller {} is listed more than once",
                seller.id,
            )));
        }
        if !seller.shipping_fee.is_finite() || seller.shipping_fee < 0.0 {
            return Err(CartError::invalid(format!(
                "Seller {} has shipping fee {}, expected a non-negative number",
                seller.id, seller.shipping_fee,
            )));
        }

        let mut offers = Vec::new();
        for (item_id, entry) in &seller.catalog {
            if !entry.price.is_finite() || entry.price <= 0.0 {
                return Err(CartError::invalid(format!(
                    "Seller {} prices item {} at {}, expected a positive number",
                    seller.id, item_id, entry.price,
                )));
            }
            let available = to_solver_int(entry.quantity).ok_or_else(|| {
                CartError::invalid(format!(
                    "Seller {} stocks item {} with quantity {}, expected a positive integer",
                    seller.id, item_id, entry.quantity,
                ))
            })?;

            if let Some(&item) = item_index.get(item_id.as_str()) {
                offers.push(Offer {
                    item,
                    unit_price: entry.price,
                    available,
                });
            }
        }
        offers.sort_by_key(|offer| offer.item);

        normalized_sellers.push(NormalizedSeller {
            id: seller.id.as_str(),
            label: seller.label(),
            shipping_fee: seller.shipping_fee,
            offers,
        });
    }

    Ok(NormalizedInput {
        items,
        requested,
        item_index,
        sellers: normalized_sellers,
    })
}

/// Positive quantities the solver's 32-bit integer columns can hold.
fn to_solver_int(quantity: i64) -> Option<i32> {
    i32::try_from(quantity).ok().filter(|&q| q > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sellers() -> Vec<SellerOffer> {
        vec![
            SellerOffer::new("1", 10.0)
                .with_item("A", 50.0, 1)
                .with_item("B", 20.0, 1)
                .with_item("Z", 5.0, 3),
            SellerOffer::new("2", 30.0).with_item("A", 19.0, 1),
        ]
    }

    #[test]
    fn test_normalize_given_valid_input_should_index_wanted_items() {
        let wanted = vec![WantedItem::new("B", 1), WantedItem::new("A", 2)];
        let sellers = sellers();
        let input = normalize(&wanted, &sellers).unwrap();

        assert_eq!(input.items, vec!["B", "A"]);
        assert_eq!(input.requested_quantity("A"), Some(2));
        assert_eq!(input.requested_quantity("Z"), None);
        assert!(input.is_wanted("B"));
        assert_eq!(input.total_requested(), 3);
    }

    #[test]
    fn test_normalize_given_unwanted_catalog_items_should_filter_them() {
        let wanted = vec![WantedItem::new("B", 1), WantedItem::new("A", 1)];
        let sellers = sellers();
        let input = normalize(&wanted, &sellers).unwrap();

        // Z is dropped and offers follow wanted-list order (B before A)
        assert_eq!(
            input.sellers[0].offers,
            vec![
                Offer { item: 0, unit_price: 20.0, available: 1 },
                Offer { item: 1, unit_price: 50.0, available: 1 },
            ]
        );
        assert_eq!(input.sellers[1].offers.len(), 1);
    }

    #[test]
    fn test_normalize_given_seller_without_wanted_items_should_keep_it() {
        let wanted = vec![WantedItem::new("Q", 1)];
        let sellers = sellers();
        let input = normalize(&wanted, &sellers).unwrap();

        assert_eq!(input.sellers.len(), 2);
        assert!(input.sellers.iter().all(|s| s.offers.is_empty()));
    }

    #[test]
    fn test_normalize_given_non_positive_quantity_should_return_error() {
        let sellers = sellers();
        for quantity in [0, -3] {
            let wanted = vec![WantedItem::new("A", quantity)];
            assert!(matches!(
                normalize(&wanted, &sellers),
                Err(CartError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_normalize_given_quantity_beyond_solver_range_should_return_error() {
        let wanted = vec![WantedItem::new("A", i32::MAX as i64 + 1)];
        assert!(normalize(&wanted, &sellers()).is_err());
    }

    #[test]
    fn test_normalize_given_duplicate_ids_should_return_error() {
        let wanted = vec![WantedItem::new("A", 1), WantedItem::new("A", 1)];
        assert!(normalize(&wanted, &sellers()).is_err());

        let wanted = vec![WantedItem::new("A", 1)];
        let duplicated = vec![SellerOffer::new("1", 1.0), SellerOffer::new("1", 2.0)];
        assert!(normalize(&wanted, &duplicated).is_err());
    }

    #[test]
    fn test_normalize_given_bad_catalog_entry_should_return_error() {
        let wanted = vec![WantedItem::new("A", 1)];
        let bad_entries = [
            SellerOffer::new("1", 10.0).with_item("A", 0.0, 1),
            SellerOffer::new("1", 10.0).with_item("A", -1.0, 1),
            SellerOffer::new("1", 10.0).with_item("A", f64::NAN, 1),
            SellerOffer::new("1", 10.0).with_item("A", 5.0, 0),
            // entries nobody asked for are validated too
            SellerOffer::new("1", 10.0).with_item("X", 5.0, -1),
        ];
        for seller in bad_entries {
            let sellers = vec![seller];
            assert!(normalize(&wanted, &sellers).is_err());
        }
    }

    #[test]
    fn test_normalize_given_negative_shipping_should_return_error() {
        let wanted = vec![WantedItem::new("A", 1)];
        let sellers = vec![SellerOffer::new("1", -0.5).with_item("A", 5.0, 1)];
        assert!(normalize(&wanted, &sellers).is_err());

        let free_shipping = vec![SellerOffer::new("1", 0.0).with_item("A", 5.0, 1)];
        assert!(normalize(&wanted, &free_shipping).is_ok());
    }
}
