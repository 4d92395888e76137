//! Order store read port.

use crate::domain::{LineItem, ReportingWindow};
use crate::error::Result;

/// Read access to completed orders' line items.
///
/// Implementations issue a single bulk read and must not filter, merge or
/// re-price items: grouping and bundle-price substitution happen in the
/// aggregator so they behave the same for every store.
pub trait OrderLineReader: Send + Sync {
    /// Line items of completed orders dated within `window`, both bounds
    /// inclusive, each joined to its product's display name.
    fn completed_line_items(&self, window: &ReportingWindow) -> Result<Vec<LineItem>>;
}
