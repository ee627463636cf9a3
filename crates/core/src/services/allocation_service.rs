use crate::models::allocation::{AllocationBreakdown, AllocationEntry, AllocationRow};

/// Turn an allocation into a total plus per-entry percentages.
///
/// - `total` sums the positive finite amounts; missing, zero, negative and
///   non-finite amounts count as 0 but their rows are still returned.
/// - `percent` is `round(amount / total * 100)` per entry, independently, so
///   the sum can drift from 100 by up to one point per entry.
/// - With a zero total every percent is 0.
/// - Rows keep the input order.
pub fn aggregate_allocation(entries: &[AllocationEntry]) -> AllocationBreakdown {
    let total: f64 = entries.iter().map(AllocationEntry::effective_amount).sum();

    let rows = entries
        .iter()
        .map(|entry| {
            let amount = entry.effective_amount();
            let percent = if total > 0.0 && amount > 0.0 {
                (amount / total * 100.0).round() as i64
            } else {
                0
            };
            AllocationRow {
                ticker: entry.ticker.clone(),
                amount,
                percent,
            }
        })
        .collect();

    AllocationBreakdown { total, rows }
}
