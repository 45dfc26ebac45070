//! The stepped-threshold alert decision.
//!
//! A wallet below its threshold alerts once per step of decline rather than
//! on every poll. The boundaries `threshold, threshold-delta, …` (down to
//! zero, exclusive) form alert steps; a repeat alert fires only when the
//! balance has dropped past a step the previously recorded balance had not
//! reached.

use serde::{Deserialize, Serialize};

/// Outcome of evaluating a wallet balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    /// Balance is above the threshold; nothing to do.
    Ok,
    /// Balance is low but has not crossed a new step; suppress the repeat.
    Skip,
    /// Balance is low and newly so, or has crossed another step; alert.
    Error,
}

impl AlertLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            AlertLevel::Ok => "ok",
            AlertLevel::Skip => "skip",
            AlertLevel::Error => "error",
        }
    }

    /// Whether this outcome requires sending an alert.
    #[inline]
    pub fn is_alert(self) -> bool {
        matches!(self, AlertLevel::Error)
    }
}

/// Decide whether a wallet's current balance warrants an alert.
///
/// `previous_balance` is the balance recorded on the last non-suppressed
/// evaluation, absent on first observation. `delta` must be positive;
/// [`crate::numeric::parse_delta`] normalizes registry values upstream.
pub fn alert_level(
    balance: f64,
    previous_balance: Option<f64>,
    threshold: f64,
    delta: f64,
) -> AlertLevel {
    if balance > threshold {
        return AlertLevel::Ok;
    }

    // First low observation has no baseline to suppress against.
    let Some(previous) = previous_balance else {
        return AlertLevel::Error;
    };

    match next_step_below(previous, threshold, delta) {
        // Already below the smallest meaningful boundary last time.
        None if previous < delta => AlertLevel::Skip,
        // Has not dropped past the next lower step since last recorded.
        Some(next) if balance > next => AlertLevel::Skip,
        _ => AlertLevel::Error,
    }
}

/// Largest boundary in `threshold, threshold-delta, …` that is positive and
/// strictly below `previous`. None when every positive boundary is at or
/// above `previous`, or when the sequence is empty.
fn next_step_below(previous: f64, threshold: f64, delta: f64) -> Option<f64> {
    if threshold <= 0.0 {
        return None;
    }
    if previous > threshold {
        return Some(threshold);
    }
    // Whole steps needed to get strictly below `previous`.
    let steps = ((threshold - previous) / delta).floor() + 1.0;
    let mut boundary = threshold - steps * delta;
    // Division slop can leave the boundary at or above `previous`.
    if boundary >= previous {
        boundary -= delta;
    }
    (boundary > 0.0).then_some(boundary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const THRESHOLD: f64 = 20.0;
    const DELTA: f64 = 5.0;

    #[test]
    fn test_ok_above_threshold() {
        assert_eq!(alert_level(30.0, None, THRESHOLD, DELTA), AlertLevel::Ok);
        // Healthy regardless of what was recorded before.
        assert_eq!(alert_level(30.0, Some(1.0), THRESHOLD, DELTA), AlertLevel::Ok);
        assert_eq!(alert_level(20.001, Some(50.0), THRESHOLD, DELTA), AlertLevel::Ok);
    }

    #[test]
    fn test_threshold_boundary_is_low() {
        // Exactly at threshold counts as low.
        assert_eq!(alert_level(20.0, None, THRESHOLD, DELTA), AlertLevel::Error);
    }

    #[test]
    fn test_first_low_observation_alerts() {
        assert_eq!(alert_level(18.0, None, THRESHOLD, DELTA), AlertLevel::Error);
    }

    #[test]
    fn test_alerts_when_previous_was_above_threshold() {
        assert_eq!(alert_level(18.0, Some(21.0), THRESHOLD, DELTA), AlertLevel::Error);
    }

    #[test]
    fn test_suppresses_within_current_step() {
        assert_eq!(alert_level(18.0, Some(19.0), THRESHOLD, DELTA), AlertLevel::Skip);
    }

    #[test]
    fn test_realerts_past_next_step() {
        assert_eq!(alert_level(15.0, Some(19.0), THRESHOLD, DELTA), AlertLevel::Error);
    }

    #[test]
    fn test_last_step_alerts_once() {
        assert_eq!(alert_level(4.0, Some(6.0), THRESHOLD, DELTA), AlertLevel::Error);
        // Re-poll at the already-recorded low balance stays quiet.
        assert_eq!(alert_level(4.0, Some(4.0), THRESHOLD, DELTA), AlertLevel::Skip);
    }

    #[test]
    fn test_unchanged_low_balance_is_idempotent() {
        for balance in [19.0, 13.0, 7.0, 2.0] {
            assert_eq!(
                alert_level(balance, Some(balance), THRESHOLD, DELTA),
                AlertLevel::Skip,
                "re-poll at {balance} must not re-alert"
            );
        }
    }

    #[test]
    fn test_step_crossing_monotonicity() {
        // 16 stays inside the step previous=19 had reached, 14 crosses one.
        assert_eq!(alert_level(16.0, Some(19.0), THRESHOLD, DELTA), AlertLevel::Skip);
        assert_eq!(alert_level(14.0, Some(19.0), THRESHOLD, DELTA), AlertLevel::Error);
        // Multi-step drop in a single poll still alerts.
        assert_eq!(alert_level(1.0, Some(19.0), THRESHOLD, DELTA), AlertLevel::Error);
    }

    #[test]
    fn test_next_step_below() {
        assert_eq!(next_step_below(21.0, THRESHOLD, DELTA), Some(20.0));
        assert_eq!(next_step_below(19.0, THRESHOLD, DELTA), Some(15.0));
        assert_eq!(next_step_below(15.0, THRESHOLD, DELTA), Some(10.0));
        assert_eq!(next_step_below(6.0, THRESHOLD, DELTA), Some(5.0));
        // No positive boundary below 4: the sequence bottoms out at 5.
        assert_eq!(next_step_below(4.0, THRESHOLD, DELTA), None);
        // Empty sequence when the threshold itself is not positive.
        assert_eq!(next_step_below(10.0, 0.0, DELTA), None);
    }

    #[test]
    fn test_fractional_delta() {
        // threshold 1.0, delta 0.25: boundaries 1.0, 0.75, 0.5, 0.25
        assert_eq!(alert_level(0.8, Some(0.9), 1.0, 0.25), AlertLevel::Skip);
        assert_eq!(alert_level(0.7, Some(0.9), 1.0, 0.25), AlertLevel::Error);
        assert_eq!(alert_level(0.1, Some(0.1), 1.0, 0.25), AlertLevel::Skip);
    }

    #[test]
    fn test_serde_level_names() {
        assert_eq!(serde_json::to_string(&AlertLevel::Skip).unwrap(), "\"skip\"");
        assert_eq!(AlertLevel::Error.as_str(), "error");
    }
}
