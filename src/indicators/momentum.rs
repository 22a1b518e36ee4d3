/// Wilder RSI over `period` bars.
///
/// Seeds average gain/loss with a simple mean of the first `period` changes,
/// then applies Wilder smoothing over the rest. Returns 100 when there were
/// no losses.
pub fn compute_rsi(closes: &[f64], period: usize) -> Option<f64> {
    if period == 0 || closes.len() < period + 1 {
        return None;
    }

    let pf = period as f64;
    let mut avg_gain: f64 = 0.0;
    let mut avg_loss: f64 = 0.0;

    for pair in closes[..=period].windows(2) {
        let diff = pair[1] - pair[0];
        if diff > 0.0 {
            avg_gain += diff;
        } else {
            avg_loss -= diff;
        }
    }
    avg_gain /= pf;
    avg_loss /= pf;

    for pair in closes[period..].windows(2) {
        let diff = pair[1] - pair[0];
        let gain = diff.max(0.0);
        let loss = (-diff).max(0.0);
        avg_gain = (avg_gain * (pf - 1.0) + gain) / pf;
        avg_loss = (avg_loss * (pf - 1.0) + loss) / pf;
    }

    if avg_loss == 0.0 {
        return Some(100.0);
    }
    let rs = avg_gain / avg_loss;
    let rsi = 100.0 - 100.0 / (1.0 + rs);
    rsi.is_finite().then(|| rsi.clamp(0.0, 100.0))
}

/// Simple mean of the last `period` values.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let tail = &values[values.len() - period..];
    Some(tail.iter().sum::<f64>() / period as f64)
}

/// Average per-step change across the last `points` values.
pub fn slope_last(values: &[f64], points: usize) -> Option<f64> {
    if points < 2 || values.len() < points {
        return None;
    }
    let tail = &values[values.len() - points..];
    Some((tail[points - 1] - tail[0]) / (points - 1) as f64)
}
