//! Logit-space blend of the heuristic score and the strike model.
//!
//! logit(p) = logit(strike_up) + alpha * (2 * ta_up - 1) * w_ta
//!
//! where:
//!   strike_up = lognormal P(finish above strike), the baseline
//!   ta_up     = heuristic probability, mapped to a tilt in [-1, 1]
//!   w_ta      = remaining / window, clamped to [0, 1]
//!
//! The strike model already prices distance and time to expiry, so the
//! heuristic only tilts it, and the tilt vanishes at expiry.

use crate::config::DEFAULT_ALPHA;
use crate::models::normal::{logistic, logit};
use crate::scoring::time_decay::remaining_fraction;
use crate::state::BlendResult;

/// Strike probabilities are held this far from 0/1 before taking the logit.
const LOGIT_EPS: f64 = 1e-6;

/// Blend inputs. Stack-allocated.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct BlendParams {
    pub ta_up: Option<f64>,
    pub strike_up: Option<f64>,
    pub remaining_minutes: f64,
    pub window_minutes: f64,
    pub alpha: f64,
}

impl BlendParams {
    pub fn new(ta_up: Option<f64>, strike_up: Option<f64>, remaining_minutes: f64, window_minutes: f64) -> Self {
        Self {
            ta_up,
            strike_up,
            remaining_minutes,
            window_minutes,
            alpha: DEFAULT_ALPHA,
        }
    }
}

/// Blend the two estimates. If one side is unknown the other passes through
/// with full weight; `None` only when both are unknown.
///
/// Pure function: deterministic from inputs.
pub fn blend_probabilities(params: &BlendParams) -> Option<BlendResult> {
    let ta_up = params.ta_up.filter(|p| p.is_finite());
    let strike_up = params.strike_up.filter(|p| p.is_finite());

    let (ta_up, strike_up) = match (ta_up, strike_up) {
        (Some(ta), Some(strike)) => (ta, strike),
        (Some(ta), None) => {
            tracing::trace!(ta_up = ta, "strike estimate unknown, heuristic passes through");
            return Some(BlendResult { blended_up: ta.clamp(0.0, 1.0), w_ta: 1.0, w_strike: 0.0 });
        }
        (None, Some(strike)) => {
            tracing::trace!(strike_up = strike, "heuristic unknown, strike passes through");
            return Some(BlendResult { blended_up: strike.clamp(0.0, 1.0), w_ta: 0.0, w_strike: 1.0 });
        }
        (None, None) => return None,
    };

    let w_ta = remaining_fraction(params.remaining_minutes, params.window_minutes);
    let w_strike = 1.0 - w_ta;

    let alpha = if params.alpha.is_finite() { params.alpha } else { DEFAULT_ALPHA };
    let tilt = (ta_up.clamp(0.0, 1.0) - 0.5) * 2.0;
    let shift = alpha * tilt * w_ta;

    // No tilt: return the baseline untouched rather than round-tripping it
    if shift == 0.0 {
        return Some(BlendResult { blended_up: strike_up.clamp(0.0, 1.0), w_ta, w_strike });
    }

    let base = strike_up.clamp(LOGIT_EPS, 1.0 - LOGIT_EPS);
    let blended_up = logistic(logit(base) + shift).clamp(0.0, 1.0);

    Some(BlendResult { blended_up, w_ta, w_strike })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strike_only_passes_through() {
        let r = blend_probabilities(&BlendParams::new(None, Some(0.7), 5.0, 15.0)).unwrap();
        assert_eq!(r.blended_up, 0.7);
        assert_eq!(r.w_ta, 0.0);
        assert_eq!(r.w_strike, 1.0);
    }

    #[test]
    fn test_heuristic_only_passes_through() {
        let r = blend_probabilities(&BlendParams::new(Some(0.3), None, 5.0, 15.0)).unwrap();
        assert_eq!(r.blended_up, 0.3);
        assert_eq!(r.w_ta, 1.0);
        assert_eq!(r.w_strike, 0.0);
    }

    #[test]
    fn test_both_unknown() {
        assert!(blend_probabilities(&BlendParams::new(None, None, 5.0, 15.0)).is_none());
        assert!(blend_probabilities(&BlendParams::new(Some(f64::NAN), None, 5.0, 15.0)).is_none());
    }

    #[test]
    fn test_expiry_returns_strike_exactly() {
        for ta in [0.0, 0.1, 0.5, 0.77, 1.0] {
            for strike in [0.0, 0.123456789, 0.5, 0.9, 1.0] {
                let r = blend_probabilities(&BlendParams::new(Some(ta), Some(strike), 0.0, 15.0)).unwrap();
                assert_eq!(r.blended_up, strike, "ta={ta} strike={strike}");
                assert_eq!(r.w_ta, 0.0);
                assert_eq!(r.w_strike, 1.0);
            }
        }
    }

    #[test]
    fn test_neutral_heuristic_keeps_strike() {
        let r = blend_probabilities(&BlendParams::new(Some(0.5), Some(0.64), 10.0, 15.0)).unwrap();
        assert_eq!(r.blended_up, 0.64);
    }

    #[test]
    fn test_tilt_direction_and_bound() {
        let up = blend_probabilities(&BlendParams::new(Some(0.9), Some(0.5), 15.0, 15.0)).unwrap();
        let down = blend_probabilities(&BlendParams::new(Some(0.1), Some(0.5), 15.0, 15.0)).unwrap();
        assert!(up.blended_up > 0.5 && down.blended_up < 0.5);
        assert!((up.blended_up + down.blended_up - 1.0).abs() < 1e-12);

        // Max tilt at full weight is alpha in logit space
        let max = blend_probabilities(&BlendParams::new(Some(1.0), Some(0.5), 15.0, 15.0)).unwrap();
        assert!((max.blended_up - logistic(DEFAULT_ALPHA)).abs() < 1e-12);
    }

    #[test]
    fn test_tilt_shrinks_with_time() {
        let early = blend_probabilities(&BlendParams::new(Some(0.9), Some(0.4), 12.0, 15.0)).unwrap();
        let late = blend_probabilities(&BlendParams::new(Some(0.9), Some(0.4), 3.0, 15.0)).unwrap();
        assert!(early.blended_up > late.blended_up);
        assert!(late.blended_up > 0.4);
        assert!((early.w_ta - 0.8).abs() < 1e-12);
        assert!((early.w_strike - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_certain_strike_stays_in_range() {
        let r = blend_probabilities(&BlendParams::new(Some(0.0), Some(1.0), 15.0, 15.0)).unwrap();
        assert!((0.0..=1.0).contains(&r.blended_up));
        assert!(r.blended_up > 0.99, "tilt must not override a certain tail: {}", r.blended_up);
    }

    #[test]
    fn test_custom_alpha() {
        let mut params = BlendParams::new(Some(1.0), Some(0.5), 15.0, 15.0);
        params.alpha = 0.0;
        assert_eq!(blend_probabilities(&params).unwrap().blended_up, 0.5);
    }
}
