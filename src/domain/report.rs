//! Read-side views over a snapshot and the popularity metadata.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::sales::{SalesAggregateRow, SalesSnapshot};

/// Column a sales report can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Quantity,
    Total,
}

/// Direction of a report sort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Rows of a snapshot in report order.
///
/// Without a sort key the snapshot's own order is kept. Sorting is stable,
/// so equal values keep their snapshot order.
#[must_use]
pub fn sorted_rows(
    snapshot: &SalesSnapshot,
    key: Option<SortKey>,
    order: SortOrder,
) -> Vec<&SalesAggregateRow> {
    let mut rows: Vec<&SalesAggregateRow> = snapshot.rows().iter().collect();
    let Some(key) = key else {
        return rows;
    };

    rows.sort_by(|a, b| {
        let ord = match key {
            SortKey::Quantity => a.quantity_sold.cmp(&b.quantity_sold),
            SortKey::Total => a.total_sales.cmp(&b.total_sales),
        };
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
    rows
}

/// Highlight band for a yearly quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityBand {
    Plain,
    Green,
    Yellow,
    Orange,
    Red,
}

impl QuantityBand {
    /// Band for a quantity; each threshold is exclusive.
    #[must_use]
    pub const fn classify(quantity: u64) -> Self {
        if quantity > 1000 {
            Self::Red
        } else if quantity > 500 {
            Self::Orange
        } else if quantity > 250 {
            Self::Yellow
        } else if quantity > 125 {
            Self::Green
        } else {
            Self::Plain
        }
    }

    /// Pastel background colour for the band, `None` when unhighlighted.
    #[must_use]
    pub const fn background(self) -> Option<(u8, u8, u8)> {
        match self {
            Self::Red => Some((0xff, 0xcc, 0xcc)),
            Self::Orange => Some((0xff, 0xcc, 0x99)),
            Self::Yellow => Some((0xff, 0xff, 0xcc)),
            Self::Green => Some((0xcc, 0xff, 0xcc)),
            Self::Plain => None,
        }
    }
}

impl fmt::Display for QuantityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Plain => "plain",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Orange => "orange",
            Self::Red => "red",
        };
        f.write_str(name)
    }
}

/// One entry of the catalog popularity ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PopularityRank {
    pub product_id: ProductId,
    pub popularity: i64,
}

/// Order products for a "sort by popularity" catalog view.
///
/// Highest popularity first; equal values fall back to ascending product id.
#[must_use]
pub fn rank_by_popularity(values: &BTreeMap<ProductId, i64>) -> Vec<PopularityRank> {
    let mut ranks: Vec<PopularityRank> = values
        .iter()
        .map(|(product_id, popularity)| PopularityRank {
            product_id: *product_id,
            popularity: *popularity,
        })
        .collect();
    ranks.sort_by(|a, b| match b.popularity.cmp(&a.popularity) {
        Ordering::Equal => a.product_id.cmp(&b.product_id),
        other => other,
    });
    ranks
}
