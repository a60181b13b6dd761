//! Offer Statistics

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::offers::OfferDetails;

/// Aggregate figures over a set of offers, active or not.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OfferStats {
    /// Offers of any status
    pub total_offers: usize,

    /// Offers still on sale
    pub active_offers: usize,

    /// Soft-deleted offers
    pub inactive_offers: usize,

    /// Distinct operator names
    pub operators: usize,

    /// Distinct categories
    pub categories: usize,

    /// Distinct regions
    pub regions: usize,

    /// Mean selling price
    pub avg_price: Option<f64>,

    /// Lowest selling price
    pub min_price: Option<u32>,

    /// Highest selling price
    pub max_price: Option<u32>,
}

impl OfferStats {
    /// Compute statistics from `(offer, is_active)` pairs.
    pub fn from_offers<'a>(offers: impl IntoIterator<Item = (&'a OfferDetails, bool)>) -> Self {
        let mut stats = Self::default();

        let mut operators = FxHashSet::default();
        let mut categories = FxHashSet::default();
        let mut regions = FxHashSet::default();
        let mut price_sum = 0_u64;

        for (offer, is_active) in offers {
            stats.total_offers += 1;

            if is_active {
                stats.active_offers += 1;
            } else {
                stats.inactive_offers += 1;
            }

            operators.insert(offer.operator.as_str());
            categories.insert(offer.category.as_str());
            regions.insert(offer.region.as_str());

            price_sum += u64::from(offer.selling_price);

            stats.min_price = Some(
                stats
                    .min_price
                    .map_or(offer.selling_price, |min| min.min(offer.selling_price)),
            );
            stats.max_price = Some(
                stats
                    .max_price
                    .map_or(offer.selling_price, |max| max.max(offer.selling_price)),
            );
        }

        stats.operators = operators.len();
        stats.categories = categories.len();
        stats.regions = regions.len();

        if stats.total_offers > 0 {
            #[expect(clippy::cast_precision_loss, reason = "prices and counts are small")]
            let avg = price_sum as f64 / stats.total_offers as f64;

            stats.avg_price = Some(avg);
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use crate::offers::DEFAULT_REGION;

    use super::*;

    fn offer(operator: &str, category: &str, price: u32) -> OfferDetails {
        OfferDetails {
            operator: operator.to_string(),
            title: "Pack".to_string(),
            data_amount: "1GB".to_string(),
            minutes: 0,
            validity_days: 7,
            selling_price: price,
            original_price: None,
            region: DEFAULT_REGION.to_string(),
            category: category.to_string(),
            whatsapp_number: "+8801712345678".to_string(),
            description: None,
        }
    }

    #[test]
    fn empty_set_has_no_prices() {
        let stats = OfferStats::from_offers([]);

        assert_eq!(stats.total_offers, 0);
        assert_eq!(stats.avg_price, None);
        assert_eq!(stats.min_price, None);
    }

    #[test]
    fn counts_and_prices_cover_inactive_offers() {
        let offers = [
            offer("GP", "data", 100),
            offer("GP", "combo", 300),
            offer("Robi", "data", 200),
        ];

        let stats = OfferStats::from_offers(
            offers
                .iter()
                .zip([true, false, true]),
        );

        assert_eq!(stats.total_offers, 3);
        assert_eq!(stats.active_offers, 2);
        assert_eq!(stats.inactive_offers, 1);
        assert_eq!(stats.operators, 2);
        assert_eq!(stats.categories, 2);
        assert_eq!(stats.regions, 1);
        assert_eq!(stats.min_price, Some(100));
        assert_eq!(stats.max_price, Some(300));
        assert!(stats.avg_price.is_some_and(|avg| (avg - 200.0).abs() < f64::EPSILON));
    }
}
