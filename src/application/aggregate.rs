//! Sales aggregation stage.

use std::sync::Arc;

use tracing::{debug, error};

use crate::domain::{ReportingWindow, SalesSnapshot};
use crate::error::{JobError, Result};
use crate::port::outbound::order::OrderLineReader;

/// Turns the completed line items of a window into a [`SalesSnapshot`].
pub struct Aggregator {
    reader: Arc<dyn OrderLineReader>,
}

impl Aggregator {
    #[must_use]
    pub fn new(reader: Arc<dyn OrderLineReader>) -> Self {
        Self { reader }
    }

    /// Aggregate every completed line item in `window`.
    ///
    /// # Errors
    /// Returns [`JobError::Aggregation`] carrying the store's message when the
    /// read fails. Nothing is written in that case.
    pub fn aggregate(&self, window: &ReportingWindow) -> Result<SalesSnapshot> {
        let items = self.reader.completed_line_items(window).map_err(|e| {
            error!(error = %e, "Order line-item read failed");
            JobError::Aggregation {
                cause: e.to_string(),
            }
        })?;

        debug!(line_items = items.len(), "Loaded completed line items");
        Ok(SalesSnapshot::from_line_items(items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LineItem, ProductId};
    use crate::error::Error;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    struct FixedReader(Vec<LineItem>);

    impl OrderLineReader for FixedReader {
        fn completed_line_items(&self, _window: &ReportingWindow) -> Result<Vec<LineItem>> {
            Ok(self.0.clone())
        }
    }

    struct FailingReader;

    impl OrderLineReader for FailingReader {
        fn completed_line_items(&self, _window: &ReportingWindow) -> Result<Vec<LineItem>> {
            Err(Error::Database("no such table: order_items".to_string()))
        }
    }

    fn window() -> ReportingWindow {
        let start = NaiveDate::from_ymd_opt(2024, 9, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 8, 31)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();
        ReportingWindow::new(start, end).unwrap()
    }

    fn line(id: i64, qty: u64) -> LineItem {
        LineItem {
            product_id: ProductId::new(id),
            product_name: format!("Seed {id}"),
            quantity: qty,
            line_total: dec!(2.50),
            bundle_price: None,
        }
    }

    #[test]
    fn aggregation_is_idempotent_on_unchanged_orders() {
        let aggregator = Aggregator::new(Arc::new(FixedReader(vec![
            line(3, 4),
            line(1, 9),
            line(3, 5),
            line(2, 9),
        ])));

        let first = aggregator.aggregate(&window()).unwrap();
        let second = aggregator.aggregate(&window()).unwrap();
        assert_eq!(first, second);

        let ids: Vec<i64> = first.rows().iter().map(|r| r.product_id.value()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn read_failure_becomes_aggregation_error_with_cause() {
        let aggregator = Aggregator::new(Arc::new(FailingReader));
        let err = aggregator.aggregate(&window()).unwrap_err();
        match err {
            Error::Job(JobError::Aggregation { cause }) => {
                assert!(cause.contains("no such table"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
