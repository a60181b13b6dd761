//! Offer View
//!
//! Stateless filter and sort projection over an already fetched offer list.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::offers::{DEFAULT_REGION, OfferDetails};

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Smallest first
    #[default]
    Asc,

    /// Largest first
    Desc,
}

impl SortOrder {
    /// Lowercase name, as used in queries.
    pub const fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    /// Apply the direction to an ascending ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// What to sort a view by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewSort {
    /// Selling price
    #[default]
    Price,

    /// Validity in days
    Validity,

    /// Heuristic numeric data amount
    Data,
}

/// Offer View
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferView {
    /// Keep only this operator
    pub operator: Option<String>,

    /// Keep only this region; the default region keeps everything
    pub region: Option<String>,

    /// Case-insensitive substring of title or operator
    pub search: Option<String>,

    /// Sort key
    pub sort: ViewSort,

    /// Sort direction
    pub order: SortOrder,
}

impl OfferView {
    /// Filter and sort `offers`, returning references in display order.
    ///
    /// Sorting is stable, so offers that compare equal keep their input order.
    pub fn apply<'a, T: AsRef<OfferDetails>>(&self, offers: &'a [T]) -> Vec<&'a T> {
        let search = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase);

        let region = self
            .region
            .as_deref()
            .filter(|region| *region != DEFAULT_REGION);

        let mut visible: Vec<&T> = offers
            .iter()
            .filter(|offer| {
                let offer: &OfferDetails = (*offer).as_ref();

                self.operator
                    .as_deref()
                    .is_none_or(|operator| offer.operator == operator)
                    && region.is_none_or(|region| offer.region == region)
                    && search.as_deref().is_none_or(|term| {
                        offer.title.to_lowercase().contains(term)
                            || offer.operator.to_lowercase().contains(term)
                    })
            })
            .collect();

        visible.sort_by(|a, b| {
            self.order
                .apply(self.compare((*a).as_ref(), (*b).as_ref()))
        });

        visible
    }

    fn compare(&self, a: &OfferDetails, b: &OfferDetails) -> Ordering {
        match self.sort {
            ViewSort::Price => a.selling_price.cmp(&b.selling_price),
            ViewSort::Validity => a.validity_days.cmp(&b.validity_days),
            ViewSort::Data => a.data_amount_value().total_cmp(&b.data_amount_value()),
        }
    }
}
