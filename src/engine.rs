use crate::blend::{blend_probabilities, BlendParams};
use crate::config::EstimatorConfig;
use crate::models::strike::{strike_probability, StrikeParams};
use crate::models::volatility::estimate_volatility;
use crate::scoring::technical::score_direction;
use crate::scoring::time_decay::apply_time_awareness;
use crate::state::{EstimateSource, MarketSnapshot, ProbabilityEstimate};

/// Produce the final up-probability for one market at one instant.
///
/// closes -> volatility -> strike model ─┐
/// snapshot -> heuristic score ──────────┴─> blend (or time decay if no strike estimate)
///
/// Pure and synchronous. The caller is responsible for `snapshot`, `closes`
/// and `remaining_minutes` describing the same instant.
pub fn estimate(
    snapshot: &MarketSnapshot,
    closes: &[f64],
    remaining_minutes: Option<f64>,
    config: &EstimatorConfig,
) -> ProbabilityEstimate {
    let volatility = estimate_volatility(closes, config.lookback_minutes);

    let strike_up = strike_probability(&StrikeParams {
        current_price: snapshot.reference_price(),
        price_to_beat: snapshot.price_to_beat,
        remaining_minutes,
        sigma_per_minute: volatility.sigma,
        mu_per_minute: config.mu_per_minute,
    });

    let score = score_direction(snapshot, config.use_price_to_beat_distance);

    let (up, source, blend, time_aware) = match (strike_up, remaining_minutes) {
        (Some(strike), Some(remaining)) => {
            let blend = blend_probabilities(&BlendParams {
                ta_up: Some(score.raw_up),
                strike_up: Some(strike),
                remaining_minutes: remaining,
                window_minutes: config.window_minutes,
                alpha: config.alpha,
            });
            let up = blend.map(|b| b.blended_up).unwrap_or(strike);
            (up, EstimateSource::Blended, blend, None)
        }
        _ => {
            // Unknown remaining time means nothing has elapsed that we know of
            let remaining = remaining_minutes.unwrap_or(config.window_minutes);
            let ta = apply_time_awareness(score.raw_up, remaining, config.window_minutes);
            tracing::debug!(
                reason = "no strike estimate",
                raw_up = score.raw_up,
                time_decay = ta.time_decay,
                "falling back to decayed heuristic"
            );
            (ta.adjusted_up, EstimateSource::HeuristicDecayed, None, Some(ta))
        }
    };

    let up = up.clamp(0.0, 1.0);

    tracing::debug!(
        up,
        source = %source,
        raw_up = score.raw_up,
        strike_up = ?strike_up,
        sigma = ?volatility.sigma,
        samples = volatility.n,
        "probability estimated"
    );

    ProbabilityEstimate {
        up,
        down: 1.0 - up,
        source,
        score,
        volatility,
        strike_up,
        blend,
        time_aware,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{HeikenColor, MacdSnapshot};

    fn closes() -> Vec<f64> {
        (0..90).map(|i| 100.0 + ((i as f64) * 0.7).sin() * 0.2).collect()
    }

    fn bullish_snapshot() -> MarketSnapshot {
        MarketSnapshot {
            price: Some(100.05),
            price_to_beat: Some(100.0),
            vwap: Some(99.9),
            vwap_slope: Some(0.01),
            rsi: Some(62.0),
            rsi_slope: Some(1.5),
            macd: Some(MacdSnapshot { hist: Some(0.02), hist_delta: Some(0.01), macd: Some(0.05) }),
            heiken_color: Some(HeikenColor::Green),
            heiken_count: Some(3),
            ..Default::default()
        }
    }

    #[test]
    fn test_blends_when_strike_known() {
        let cfg = EstimatorConfig { use_price_to_beat_distance: false, ..Default::default() };
        let est = estimate(&bullish_snapshot(), &closes(), Some(10.0), &cfg);
        assert_eq!(est.source, EstimateSource::Blended);
        let strike = est.strike_up.unwrap();
        assert!(est.up > strike, "bullish tilt should lift {strike} to {}", est.up);
        assert!((est.up + est.down - 1.0).abs() < 1e-12);
        assert!(est.time_aware.is_none());
        assert!(est.score.hits.iter().all(|h| h.rule != crate::state::ScoreRule::PriceToBeatDistance));
    }

    #[test]
    fn test_at_expiry_equals_strike_outcome() {
        let est = estimate(&bullish_snapshot(), &closes(), Some(0.0), &EstimatorConfig::default());
        assert_eq!(est.strike_up, Some(1.0));
        assert_eq!(est.up, 1.0);
        assert_eq!(est.blend.unwrap().w_ta, 0.0);
    }

    #[test]
    fn test_falls_back_without_strike() {
        let snap = MarketSnapshot { price_to_beat: None, ..bullish_snapshot() };
        let est = estimate(&snap, &closes(), Some(7.5), &EstimatorConfig::default());
        assert_eq!(est.source, EstimateSource::HeuristicDecayed);
        assert!(est.strike_up.is_none());
        let ta = est.time_aware.unwrap();
        assert!((ta.time_decay - 0.5).abs() < 1e-12);
        let expected = 0.5 + (est.score.raw_up - 0.5) * 0.5;
        assert!((est.up - expected).abs() < 1e-12);
    }

    #[test]
    fn test_missing_remaining_uses_undecayed_heuristic() {
        let est = estimate(&bullish_snapshot(), &closes(), None, &EstimatorConfig::default());
        assert_eq!(est.source, EstimateSource::HeuristicDecayed);
        assert!((est.up - est.score.raw_up).abs() < 1e-12);
    }

    #[test]
    fn test_short_history_uses_step_baseline() {
        let est = estimate(&bullish_snapshot(), &[100.0], Some(10.0), &EstimatorConfig::default());
        assert_eq!(est.volatility.n, 0);
        assert_eq!(est.strike_up, Some(0.75));
        assert_eq!(est.source, EstimateSource::Blended);
    }

    #[test]
    fn test_empty_snapshot_is_neutral() {
        let est = estimate(&MarketSnapshot::default(), &[], None, &EstimatorConfig::default());
        assert_eq!(est.up, 0.5);
        assert_eq!(est.down, 0.5);
    }
}
