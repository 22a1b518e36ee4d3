use crate::state::TimeAwareResult;

/// Fraction of the market's life still remaining, in [0, 1].
/// Unusable inputs (non-finite, non-positive window) count as fully elapsed.
#[inline]
pub fn remaining_fraction(remaining_minutes: f64, window_minutes: f64) -> f64 {
    if !window_minutes.is_finite() || window_minutes <= 0.0 {
        return 0.0;
    }
    let frac = remaining_minutes / window_minutes;
    if frac.is_nan() {
        return 0.0;
    }
    frac.clamp(0.0, 1.0)
}

/// Shrink a heuristic probability toward 0.5 as the market ages.
///
/// adjusted = 0.5 + (raw - 0.5) * remaining / window
///
/// Only used when no statistical estimate is available.
pub fn apply_time_awareness(raw_up: f64, remaining_minutes: f64, window_minutes: f64) -> TimeAwareResult {
    let time_decay = remaining_fraction(remaining_minutes, window_minutes);
    let raw_up = if raw_up.is_finite() { raw_up } else { 0.5 };
    let adjusted_up = (0.5 + (raw_up - 0.5) * time_decay).clamp(0.0, 1.0);
    TimeAwareResult {
        time_decay,
        adjusted_up,
        adjusted_down: 1.0 - adjusted_up,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_window_is_unchanged() {
        let r = apply_time_awareness(0.8, 15.0, 15.0);
        assert_eq!(r.time_decay, 1.0);
        assert!((r.adjusted_up - 0.8).abs() < 1e-12);
        assert!((r.adjusted_down - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_expired_is_midpoint() {
        for raw in [0.0, 0.2, 0.5, 0.95, 1.0] {
            let r = apply_time_awareness(raw, 0.0, 15.0);
            assert_eq!(r.adjusted_up, 0.5, "raw={raw}");
        }
    }

    #[test]
    fn test_halfway_halves_the_edge() {
        let r = apply_time_awareness(0.9, 7.5, 15.0);
        assert!((r.time_decay - 0.5).abs() < 1e-12);
        assert!((r.adjusted_up - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_out_of_range_remaining_is_clamped() {
        assert_eq!(apply_time_awareness(0.9, 30.0, 15.0).time_decay, 1.0);
        assert_eq!(apply_time_awareness(0.9, -5.0, 15.0).time_decay, 0.0);
    }

    #[test]
    fn test_degenerate_window() {
        let r = apply_time_awareness(0.9, 5.0, 0.0);
        assert_eq!(r.time_decay, 0.0);
        assert_eq!(r.adjusted_up, 0.5);
        assert_eq!(remaining_fraction(f64::NAN, 15.0), 0.0);
        assert_eq!(remaining_fraction(f64::INFINITY, 15.0), 1.0);
    }
}
