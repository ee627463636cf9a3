/// Whole-percent return from the first to the last slot of a snapshot row.
///
/// Returns 0 when either end is missing or non-finite, when the start is
/// not positive, or when the row is empty. Otherwise
/// `round((end - start) / start * 100)`, rounding half away from zero.
/// Never panics and never yields NaN or infinity.
pub fn compute_return(row: &[Option<f64>]) -> i64 {
    let (Some(Some(start)), Some(Some(end))) = (row.first(), row.last()) else {
        return 0;
    };
    let (start, end) = (*start, *end);
    if !start.is_finite() || !end.is_finite() || start <= 0.0 {
        return 0;
    }

    let pct = ((end - start) / start * 100.0).round();
    if pct.is_finite() {
        // `as` saturates at the i64 bounds
        pct as i64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubling_is_one_hundred_percent() {
        let row = [Some(100.0), Some(120.0), Some(90.0), Some(150.0), Some(200.0)];
        assert_eq!(compute_return(&row), 100);
    }

    #[test]
    fn zero_start_is_guarded() {
        let row = [Some(0.0), Some(50.0), Some(60.0), Some(70.0), Some(80.0)];
        assert_eq!(compute_return(&row), 0);
    }

    #[test]
    fn negative_start_is_guarded() {
        assert_eq!(compute_return(&[Some(-10.0), Some(10.0)]), 0);
    }

    #[test]
    fn missing_ends_are_zero() {
        assert_eq!(compute_return(&[None, Some(1.0), Some(2.0)]), 0);
        assert_eq!(compute_return(&[Some(1.0), Some(2.0), None]), 0);
        assert_eq!(compute_return(&[]), 0);
    }

    #[test]
    fn rounds_half_away_from_zero() {
        // +12.5% and -12.5%
        assert_eq!(compute_return(&[Some(200.0), Some(225.0)]), 13);
        assert_eq!(compute_return(&[Some(200.0), Some(175.0)]), -13);
    }

    #[test]
    fn total_loss_is_minus_one_hundred() {
        assert_eq!(compute_return(&[Some(50.0), Some(0.0)]), -100);
    }

    #[test]
    fn single_slot_row_has_zero_return() {
        assert_eq!(compute_return(&[Some(42.0)]), 0);
    }
}
