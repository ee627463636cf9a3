use crate::models::snapshot::YearSnapshot;

/// Keep the tickers that have at least one year with data, in input order.
///
/// A ticker missing from the snapshot entirely is dropped the same way as one
/// whose row is all `None`. Idempotent.
pub fn filter_visible(tickers: &[String], snapshot: &YearSnapshot) -> Vec<String> {
    tickers
        .iter()
        .filter(|t| snapshot.has_data(t))
        .cloned()
        .collect()
}
