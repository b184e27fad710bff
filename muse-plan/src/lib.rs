//! Task-time estimation.
//!
//! The estimator keeps two numeric fields — free hours and number of tasks —
//! and turns them into a minutes-per-task figure. Inputs are coerced, not
//! validated: an unparsable field becomes `NaN` and zero tasks yields an
//! infinite estimate, and both flow into the rendered line as their textual
//! form rather than an error. That mirrors the loose arithmetic of the
//! original planner page on purpose.
//!
//! `buffer_minutes` is reserved time subtracted from the free-hours budget
//! before dividing; it defaults to 0, in which case the formula is exactly
//! `round(free_hours * 60 / num_of_tasks)`.

/// Estimator state, overwritten on every input event.
#[derive(Debug, Clone)]
pub struct Estimator {
    free_hours: f64,
    num_of_tasks: f64,
    buffer_minutes: u32,
}

impl Default for Estimator {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Estimator {
    /// Fields start as `NaN`, the numeric reading of "not yet entered".
    pub fn new(buffer_minutes: u32) -> Self {
        Self {
            free_hours: f64::NAN,
            num_of_tasks: f64::NAN,
            buffer_minutes,
        }
    }

    pub fn set_free_hours(&mut self, v: f64) {
        self.free_hours = v;
    }

    pub fn set_num_of_tasks(&mut self, v: f64) {
        self.num_of_tasks = v;
    }

    /// `round((free_hours * 60 - buffer) / num_of_tasks)`.
    ///
    /// Division by zero or `NaN` inputs is not guarded; the result may be
    /// non-finite and the caller renders it as-is.
    pub fn minutes_per_task(&self) -> f64 {
        let budget = self.free_hours * 60.0 - f64::from(self.buffer_minutes);
        let minutes = (budget / self.num_of_tasks).round();
        tracing::debug!(
            target: "plan",
            free_hours = self.free_hours,
            num_of_tasks = self.num_of_tasks,
            buffer_minutes = self.buffer_minutes,
            minutes,
            "plan.estimate"
        );
        minutes
    }

    /// The line appended to the estimator transcript.
    pub fn estimate_line(&self) -> String {
        format!(
            "You should spend {} minutes on each task.",
            format_minutes(self.minutes_per_task())
        )
    }
}

/// Loose numeric coercion for free-form input: empty means 0, anything
/// unparsable means `NaN`.
///
/// ```
/// use muse_plan::coerce_number;
///
/// assert_eq!(coerce_number("2.5"), 2.5);
/// assert_eq!(coerce_number(""), 0.0);
/// assert!(coerce_number("four").is_nan());
/// ```
pub fn coerce_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse().unwrap_or(f64::NAN)
}

fn format_minutes(v: f64) -> String {
    if v.is_finite() {
        format!("{}", v as i64)
    } else {
        v.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_hours_over_four_tasks_is_thirty_minutes() {
        let mut est = Estimator::default();
        est.set_free_hours(2.0);
        est.set_num_of_tasks(4.0);
        assert_eq!(
            est.estimate_line(),
            "You should spend 30 minutes on each task."
        );
    }

    #[test]
    fn zero_tasks_renders_a_non_finite_value_without_panicking() {
        let mut est = Estimator::default();
        est.set_free_hours(2.0);
        est.set_num_of_tasks(0.0);
        let line = est.estimate_line();
        assert!(line.contains("inf"), "line was: {line}");
    }

    #[test]
    fn unset_hours_propagate_nan_into_the_line() {
        let mut est = Estimator::default();
        est.set_num_of_tasks(4.0);
        assert!(est.estimate_line().contains("NaN"));
    }

    #[test]
    fn buffer_minutes_come_off_the_budget_first() {
        let mut est = Estimator::new(30);
        est.set_free_hours(2.0);
        est.set_num_of_tasks(3.0);
        // (120 - 30) / 3
        assert_eq!(
            est.estimate_line(),
            "You should spend 30 minutes on each task."
        );
    }

    #[test]
    fn fractional_results_are_rounded() {
        let mut est = Estimator::default();
        est.set_free_hours(1.0);
        est.set_num_of_tasks(7.0);
        // 60 / 7 = 8.57...
        assert_eq!(
            est.estimate_line(),
            "You should spend 9 minutes on each task."
        );
    }
}
