//! Helpers shared by the SIP and EMI schedules.

use crate::core::error::ValidationError;

/// Longest schedule produced, in months.
pub const MAX_SCHEDULE_MONTHS: f64 = 12_000.0;

/// Slack for `years * 12` landing a hair above a whole month.
const MONTH_EPSILON: f64 = 1e-9;

/// Nominal annual percentage to the monthly rate used by both formulas.
pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0 / 12.0
}

/// Elapsed-month checkpoints every `step` months up to `total_months`, with a
/// final partial checkpoint when `total_months` is not a multiple of `step`.
pub(crate) fn month_marks(
    total_months: f64,
    step: f64,
    field: &'static str,
) -> Result<Vec<f64>, ValidationError> {
    if total_months > MAX_SCHEDULE_MONTHS {
        return Err(ValidationError::Overflow { field });
    }

    let count = ((total_months - MONTH_EPSILON) / step).ceil().max(1.0) as usize;
    Ok((1..=count)
        .map(|k| {
            if k == count {
                total_months
            } else {
                k as f64 * step
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_rate() {
        assert!((monthly_rate(12.0) - 0.01).abs() < 1e-15);
        assert_eq!(monthly_rate(0.0), 0.0);
    }

    #[test]
    fn test_whole_and_partial_marks() {
        assert_eq!(month_marks(36.0, 12.0, "years").unwrap(), vec![12.0, 24.0, 36.0]);
        assert_eq!(month_marks(3.0, 1.0, "years").unwrap(), vec![1.0, 2.0, 3.0]);
        assert_eq!(month_marks(6.0, 12.0, "years").unwrap(), vec![6.0]);
        assert_eq!(month_marks(2.5, 1.0, "years").unwrap(), vec![1.0, 2.0, 2.5]);
    }

    #[test]
    fn test_marks_are_bounded() {
        assert_eq!(
            month_marks(MAX_SCHEDULE_MONTHS + 1.0, 1.0, "years"),
            Err(ValidationError::Overflow { field: "years" })
        );
    }
}
