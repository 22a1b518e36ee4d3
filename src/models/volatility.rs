use crate::config::DEFAULT_LOOKBACK_MINUTES;
use crate::state::VolatilityEstimate;

/// Fewer closes than this and nothing is estimated.
const MIN_CLOSES: usize = 3;

/// Smallest lookback (in returns) the estimator will use.
const MIN_LOOKBACK: usize = 2;

/// Estimate per-minute log-return mean and standard deviation from a
/// close series ordered oldest to newest.
///
/// The lookback is clamped to `[2, closes.len() - 1]` and the most recent
/// `lookback + 1` closes are used. Pairs where either price is non-positive
/// or non-finite are skipped. Sigma is Bessel-corrected and unknown with
/// fewer than two usable returns.
///
/// Pure function: allocation-free, bounded by the lookback.
pub fn estimate_volatility(closes: &[f64], lookback_minutes: usize) -> VolatilityEstimate {
    if closes.len() < MIN_CLOSES {
        return VolatilityEstimate::UNKNOWN;
    }

    let lookback = lookback_minutes.clamp(MIN_LOOKBACK, closes.len() - 1);
    let window = &closes[closes.len() - (lookback + 1)..];

    // First pass: count and sum
    let mut n: usize = 0;
    let mut sum: f64 = 0.0;
    for pair in window.windows(2) {
        if let Some(r) = log_return(pair[0], pair[1]) {
            n += 1;
            sum += r;
        }
    }

    if n == 0 {
        tracing::trace!(closes = closes.len(), "no usable returns in lookback");
        return VolatilityEstimate::UNKNOWN;
    }

    let nf = n as f64;
    let mean = sum / nf;

    if n < 2 {
        return VolatilityEstimate { sigma: None, mu: Some(mean), n };
    }

    // Second pass: centered sum of squares
    let mut var_sum: f64 = 0.0;
    for pair in window.windows(2) {
        if let Some(r) = log_return(pair[0], pair[1]) {
            let d = r - mean;
            var_sum += d * d;
        }
    }
    let sigma = (var_sum / (nf - 1.0)).sqrt();

    VolatilityEstimate {
        sigma: sigma.is_finite().then_some(sigma),
        mu: mean.is_finite().then_some(mean),
        n,
    }
}

/// Same as [`estimate_volatility`] with the default 60-minute lookback.
#[inline]
pub fn estimate_volatility_default(closes: &[f64]) -> VolatilityEstimate {
    estimate_volatility(closes, DEFAULT_LOOKBACK_MINUTES)
}

#[inline]
fn log_return(prev: f64, cur: f64) -> Option<f64> {
    if !prev.is_finite() || !cur.is_finite() || prev <= 0.0 || cur <= 0.0 {
        return None;
    }
    let r = (cur / prev).ln();
    r.is_finite().then_some(r)
}
