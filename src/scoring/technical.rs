use crate::state::{DirectionalScore, HeikenColor, MarketSnapshot, RuleHit, ScoreRule, Side};
use smallvec::SmallVec;

/// Both sides start here so the ratio is always defined.
const BASELINE_SCORE: f64 = 1.0;

/// Distance-to-strike tiers: (relative distance strictly above, points).
/// Anything non-zero below the last tier earns `DISTANCE_FLOOR_POINTS`.
const DISTANCE_TIERS: [(f64, f64); 6] = [
    (0.01, 20.0),
    (0.005, 15.0),
    (0.002, 12.0),
    (0.001, 10.0),
    (0.0005, 8.0),
    (0.0002, 6.0),
];
const DISTANCE_FLOOR_POINTS: f64 = 4.0;

const VWAP_POINTS: f64 = 2.0;
const VWAP_SLOPE_POINTS: f64 = 2.0;
const RSI_POINTS: f64 = 2.0;
const RSI_UP_BAND: f64 = 55.0;
const RSI_DOWN_BAND: f64 = 45.0;
const MACD_EXPANSION_POINTS: f64 = 2.0;
const MACD_LINE_POINTS: f64 = 1.0;
const HEIKEN_POINTS: f64 = 1.0;
const HEIKEN_MIN_STREAK: u32 = 2;
const FAILED_RECLAIM_POINTS: f64 = 3.0;

type RuleFn = fn(&MarketSnapshot) -> Option<(Side, f64)>;

/// The decision table. Rules are evaluated independently and every hit is
/// additive; order only fixes the order of `DirectionalScore::hits`.
const RULES: [(ScoreRule, RuleFn); 8] = [
    (ScoreRule::PriceToBeatDistance, price_to_beat_distance),
    (ScoreRule::PriceVsVwap, price_vs_vwap),
    (ScoreRule::VwapSlope, vwap_slope),
    (ScoreRule::RsiMomentum, rsi_momentum),
    (ScoreRule::MacdExpansion, macd_expansion),
    (ScoreRule::MacdLine, macd_line),
    (ScoreRule::HeikenStreak, heiken_streak),
    (ScoreRule::FailedVwapReclaim, failed_vwap_reclaim),
];

/// Score a snapshot into up/down points and a raw up-probability.
///
/// Missing inputs skip their rule; they never count as a neutral reading.
/// Set `use_price_to_beat_distance = false` when the strike model is also in
/// play, so distance-to-strike is not counted twice.
pub fn score_direction(snapshot: &MarketSnapshot, use_price_to_beat_distance: bool) -> DirectionalScore {
    let mut up = BASELINE_SCORE;
    let mut down = BASELINE_SCORE;
    let mut hits: SmallVec<[RuleHit; 8]> = SmallVec::new();

    for &(rule, _) in RULES.iter() {
        if rule == ScoreRule::PriceToBeatDistance && !use_price_to_beat_distance {
            continue;
        }
        if let Some(hit) = evaluate_rule(rule, snapshot) {
            match hit.side {
                Side::Up => up += hit.points,
                Side::Down => down += hit.points,
            }
            hits.push(hit);
        }
    }

    let raw_up = up / (up + down);
    tracing::trace!(up, down, raw_up, hits = hits.len(), "direction scored");

    DirectionalScore { up_score: up, down_score: down, raw_up, hits }
}

/// Evaluate a single rule of the table in isolation.
pub fn evaluate_rule(rule: ScoreRule, snapshot: &MarketSnapshot) -> Option<RuleHit> {
    let (_, f) = RULES.iter().find(|(r, _)| *r == rule)?;
    f(snapshot).map(|(side, points)| RuleHit { rule, side, points })
}

/// Points earned for a given |relative distance| to the strike.
#[inline]
pub fn distance_points(abs_distance: f64) -> f64 {
    DISTANCE_TIERS
        .iter()
        .find(|(threshold, _)| abs_distance > *threshold)
        .map(|(_, points)| *points)
        .unwrap_or(DISTANCE_FLOOR_POINTS)
}

#[inline]
fn sign_side(value: f64) -> Option<Side> {
    if value > 0.0 {
        Some(Side::Up)
    } else if value < 0.0 {
        Some(Side::Down)
    } else {
        None
    }
}

fn price_to_beat_distance(s: &MarketSnapshot) -> Option<(Side, f64)> {
    let reference = s.reference_price().filter(|p| p.is_finite())?;
    let strike = s.price_to_beat.filter(|p| p.is_finite() && *p > 0.0)?;
    let distance = (reference - strike) / strike;
    let side = sign_side(distance)?;
    Some((side, distance_points(distance.abs())))
}

fn price_vs_vwap(s: &MarketSnapshot) -> Option<(Side, f64)> {
    let side = sign_side(s.price? - s.vwap?)?;
    Some((side, VWAP_POINTS))
}

fn vwap_slope(s: &MarketSnapshot) -> Option<(Side, f64)> {
    Some((sign_side(s.vwap_slope?)?, VWAP_SLOPE_POINTS))
}

// Bands are deliberately asymmetric: momentum only, no overbought reversal.
fn rsi_momentum(s: &MarketSnapshot) -> Option<(Side, f64)> {
    let (rsi, slope) = (s.rsi?, s.rsi_slope?);
    if rsi > RSI_UP_BAND && slope > 0.0 {
        Some((Side::Up, RSI_POINTS))
    } else if rsi < RSI_DOWN_BAND && slope < 0.0 {
        Some((Side::Down, RSI_POINTS))
    } else {
        None
    }
}

fn macd_expansion(s: &MarketSnapshot) -> Option<(Side, f64)> {
    let macd = s.macd?;
    let (hist, delta) = (macd.hist?, macd.hist_delta?);
    if hist > 0.0 && delta > 0.0 {
        Some((Side::Up, MACD_EXPANSION_POINTS))
    } else if hist < 0.0 && delta < 0.0 {
        Some((Side::Down, MACD_EXPANSION_POINTS))
    } else {
        None
    }
}

fn macd_line(s: &MarketSnapshot) -> Option<(Side, f64)> {
    Some((sign_side(s.macd?.macd?)?, MACD_LINE_POINTS))
}

fn heiken_streak(s: &MarketSnapshot) -> Option<(Side, f64)> {
    if s.heiken_count? < HEIKEN_MIN_STREAK {
        return None;
    }
    let side = match s.heiken_color? {
        HeikenColor::Green => Side::Up,
        HeikenColor::Red => Side::Down,
    };
    Some((side, HEIKEN_POINTS))
}

// No mirrored "failed breakdown" bonus exists on the up side.
fn failed_vwap_reclaim(s: &MarketSnapshot) -> Option<(Side, f64)> {
    (s.failed_vwap_reclaim == Some(true)).then_some((Side::Down, FAILED_RECLAIM_POINTS))
}
