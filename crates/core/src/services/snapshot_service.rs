use std::collections::HashMap;

use super::alignment::DateAxis;
use crate::models::snapshot::{TargetYears, YearSnapshot};

/// Reduce dense daily series to one value per target year.
///
/// `dates` is the raw ISO-8601 axis from the history response. See
/// [`snapshot_from_axis`] for the reduction rules.
pub fn build_year_snapshot<S: AsRef<str>>(
    dates: &[S],
    series: &HashMap<String, Vec<Option<f64>>>,
    years: &TargetYears,
) -> YearSnapshot {
    snapshot_from_axis(&DateAxis::parse(dates), series, years)
}

/// Reduce dense daily series to one value per target year.
///
/// Each year's axis index is resolved once (nearest point to Dec 31) and
/// shared by every ticker. A slot is `None` when the axis is empty, the
/// series is shorter than the index, or the value there is not finite.
/// Every row has exactly `years.len()` slots.
pub fn snapshot_from_axis(
    axis: &DateAxis,
    series: &HashMap<String, Vec<Option<f64>>>,
    years: &TargetYears,
) -> YearSnapshot {
    let indices: Vec<Option<usize>> = years
        .year_ends()
        .into_iter()
        .map(|(_, year_end)| year_end.and_then(|t| axis.nearest_index(t)))
        .collect();

    let rows = series
        .iter()
        .map(|(ticker, values)| {
            let row = indices
                .iter()
                .map(|idx| {
                    idx.and_then(|i| values.get(i).copied().flatten())
                        .filter(|v| v.is_finite())
                })
                .collect();
            (ticker.clone(), row)
        })
        .collect();

    YearSnapshot {
        years: years.years().to_vec(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(entries: &[(&str, Vec<Option<f64>>)]) -> HashMap<String, Vec<Option<f64>>> {
        entries
            .iter()
            .map(|(t, v)| (t.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn picks_value_nearest_each_year_end() {
        let dates = ["2020-12-30", "2021-06-30", "2021-12-31", "2022-12-29"];
        let s = series(&[("TICK", vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)])]);
        let years = TargetYears::new(vec![2020, 2021, 2022]);

        let snap = build_year_snapshot(&dates, &s, &years);
        assert_eq!(snap.row("TICK").unwrap(), &[Some(1.0), Some(3.0), Some(4.0)]);
    }

    #[test]
    fn short_series_yields_no_data_slots() {
        let dates = ["2020-12-31", "2021-12-31", "2022-12-31"];
        let s = series(&[("SHORT", vec![Some(5.0)])]);
        let years = TargetYears::new(vec![2020, 2021, 2022]);

        let snap = build_year_snapshot(&dates, &s, &years);
        assert_eq!(snap.row("SHORT").unwrap(), &[Some(5.0), None, None]);
    }

    #[test]
    fn empty_axis_marks_every_slot_missing() {
        let dates: [&str; 0] = [];
        let s = series(&[("A", vec![Some(1.0)]), ("B", vec![])]);
        let snap = build_year_snapshot(&dates, &s, &TargetYears::default());

        assert_eq!(snap.ticker_count(), 2);
        for row in snap.rows.values() {
            assert_eq!(row.len(), 5);
            assert!(row.iter().all(Option::is_none));
        }
    }
}
