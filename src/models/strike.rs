use crate::models::normal::normal_cdf;

/// Below this sigma*sqrt(t) the diffusion is treated as frozen.
const MIN_SIGMA_T: f64 = 1e-6;

/// Volatility-free fallback levels.
const STEP_ABOVE: f64 = 0.75;
const STEP_BELOW: f64 = 0.25;

/// Inputs for the lognormal strike probability. Stack-allocated.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[repr(C)]
pub struct StrikeParams {
    pub current_price: Option<f64>,
    pub price_to_beat: Option<f64>,
    pub remaining_minutes: Option<f64>,
    pub sigma_per_minute: Option<f64>,
    pub mu_per_minute: f64,
}

/// Probability that a lognormal diffusion finishes above the strike.
///
/// P(S_T > K) = Phi(d), d = (ln(S/K) + mu*t) / (sigma * sqrt(t))
///
/// with `t` and `sigma`/`mu` all in minutes. Returns `None` when the price,
/// strike or remaining time is unusable. Degenerate volatility and expiry
/// resolve to deterministic rules instead of NaN.
///
/// Pure function: same inputs always produce the same output.
pub fn strike_probability(params: &StrikeParams) -> Option<f64> {
    let spot = params.current_price.filter(|p| p.is_finite() && *p > 0.0)?;
    let strike = params.price_to_beat.filter(|p| p.is_finite() && *p > 0.0)?;
    let remaining = params.remaining_minutes.filter(|t| t.is_finite())?;

    let t = remaining.max(0.0);
    if t == 0.0 {
        return Some(expiry_outcome(spot, strike));
    }

    let sigma = match params.sigma_per_minute {
        Some(s) if s.is_finite() && s > 0.0 => s,
        _ => {
            tracing::trace!(spot, strike, "no usable sigma, using step fallback");
            return Some(step_outcome(spot, strike));
        }
    };

    let sigma_t = sigma * t.sqrt();
    if sigma_t < MIN_SIGMA_T {
        return Some(expiry_outcome(spot, strike));
    }

    let mu = if params.mu_per_minute.is_finite() { params.mu_per_minute } else { 0.0 };
    let drift = mu * t;
    let d = ((spot / strike).ln() + drift) / sigma_t;

    Some(normal_cdf(d).clamp(0.0, 1.0))
}

/// Deterministic resolution: above wins, below loses, exact tie is a coin flip.
#[inline]
fn expiry_outcome(spot: f64, strike: f64) -> f64 {
    if spot > strike {
        1.0
    } else if spot < strike {
        0.0
    } else {
        0.5
    }
}

#[inline]
fn step_outcome(spot: f64, strike: f64) -> f64 {
    if spot > strike {
        STEP_ABOVE
    } else if spot < strike {
        STEP_BELOW
    } else {
        0.5
    }
}
