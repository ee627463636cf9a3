use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// The shared date axis of a history response.
///
/// Positions mirror the raw `dates` array one-to-one so that every series
/// stays aligned. An entry that could not be parsed is kept as `None` and is
/// never picked as a nearest point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateAxis {
    points: Vec<Option<DateTime<Utc>>>,
}

impl DateAxis {
    /// Build an axis from ISO-8601 strings.
    pub fn parse<S: AsRef<str>>(dates: &[S]) -> Self {
        Self {
            points: dates.iter().map(|d| parse_timestamp(d.as_ref())).collect(),
        }
    }

    /// Build an axis from decoded date slots. A missing slot stays in place
    /// as an unparseable point.
    pub fn from_slots(dates: &[Option<String>]) -> Self {
        Self {
            points: dates
                .iter()
                .map(|d| d.as_deref().and_then(parse_timestamp))
                .collect(),
        }
    }

    pub fn points(&self) -> &[Option<DateTime<Utc>>] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// See [`nearest_index`].
    pub fn nearest_index(&self, target: DateTime<Utc>) -> Option<usize> {
        nearest_index(&self.points, target)
    }
}

/// Parse an axis timestamp.
///
/// Accepts RFC 3339 with an offset, a naive `YYYY-MM-DDTHH:MM:SS[.f]`
/// (read as UTC, which is what the backend's `isoformat()` emits) and a bare
/// `YYYY-MM-DD` (UTC midnight).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Index of the axis point closest in time to `target`.
///
/// Linear left-to-right scan; only a strictly smaller distance replaces the
/// current best, so ties resolve to the lowest index. Returns `None` for an
/// empty axis, and `Some(0)` for a non-empty axis with no parseable point.
pub fn nearest_index(axis: &[Option<DateTime<Utc>>], target: DateTime<Utc>) -> Option<usize> {
    if axis.is_empty() {
        return None;
    }

    let target_ms = target.timestamp_millis();
    let mut best = 0;
    let mut best_diff: Option<u64> = None;

    for (i, point) in axis.iter().enumerate() {
        let Some(point) = point else { continue };
        let diff = point.timestamp_millis().abs_diff(target_ms);
        if best_diff.map_or(true, |b| diff < b) {
            best = i;
            best_diff = Some(diff);
        }
    }

    Some(best)
}
