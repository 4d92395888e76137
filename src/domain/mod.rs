//! Store-agnostic domain logic.
//!
//! Pure types and functions: window resolution, line-item aggregation and
//! the read-side report views. Nothing here touches storage.

pub mod id;
pub mod report;
pub mod sales;
pub mod window;

pub use id::ProductId;
pub use report::{
    rank_by_popularity, sorted_rows, PopularityRank, QuantityBand, SortKey, SortOrder,
};
pub use sales::{LineItem, SalesAggregateRow, SalesSnapshot};
pub use window::{resolve_window, validate_fiscal_month, ReportingWindow};
