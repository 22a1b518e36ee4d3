use smallvec::SmallVec;

// ── Inputs (supplied by the indicator layer) ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeikenColor {
    Green,
    Red,
}

impl std::fmt::Display for HeikenColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Green => write!(f, "green"),
            Self::Red => write!(f, "red"),
        }
    }
}

/// MACD readings. Each field is independently optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MacdSnapshot {
    /// Histogram (MACD line minus signal line)
    pub hist: Option<f64>,
    /// Change in the histogram since the previous bar
    pub hist_delta: Option<f64>,
    /// MACD line
    pub macd: Option<f64>,
}

/// Point-in-time view of a market and its indicators.
/// `None` always means "not known", never zero.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MarketSnapshot {
    pub price: Option<f64>,
    pub price_to_beat: Option<f64>,
    /// Overrides `price` for distance-to-strike calculations
    pub current_price: Option<f64>,
    pub vwap: Option<f64>,
    pub vwap_slope: Option<f64>,
    pub rsi: Option<f64>,
    pub rsi_slope: Option<f64>,
    pub macd: Option<MacdSnapshot>,
    pub heiken_color: Option<HeikenColor>,
    pub heiken_count: Option<u32>,
    pub failed_vwap_reclaim: Option<bool>,
}

impl MarketSnapshot {
    /// Price used for strike comparisons: `current_price`, else `price`.
    #[inline]
    pub fn reference_price(&self) -> Option<f64> {
        self.current_price.or(self.price)
    }
}

// ── Volatility ──

/// Per-minute log-return statistics over the lookback window.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[repr(C)]
pub struct VolatilityEstimate {
    pub sigma: Option<f64>,
    pub mu: Option<f64>,
    /// Number of returns that survived filtering
    pub n: usize,
}

impl VolatilityEstimate {
    pub const UNKNOWN: Self = Self { sigma: None, mu: None, n: 0 };
}

// ── Directional scoring ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Up,
    Down,
}

/// Named rules of the heuristic decision table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreRule {
    PriceToBeatDistance,
    PriceVsVwap,
    VwapSlope,
    RsiMomentum,
    MacdExpansion,
    MacdLine,
    HeikenStreak,
    FailedVwapReclaim,
}

impl std::fmt::Display for ScoreRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::PriceToBeatDistance => "price_to_beat_distance",
            Self::PriceVsVwap => "price_vs_vwap",
            Self::VwapSlope => "vwap_slope",
            Self::RsiMomentum => "rsi_momentum",
            Self::MacdExpansion => "macd_expansion",
            Self::MacdLine => "macd_line",
            Self::HeikenStreak => "heiken_streak",
            Self::FailedVwapReclaim => "failed_vwap_reclaim",
        };
        f.write_str(s)
    }
}

/// One rule that fired and what it added.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RuleHit {
    pub rule: ScoreRule,
    pub side: Side,
    pub points: f64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct DirectionalScore {
    pub up_score: f64,
    pub down_score: f64,
    pub raw_up: f64,
    /// Rules that contributed, in table order
    pub hits: SmallVec<[RuleHit; 8]>,
}

// ── Blending / time awareness ──

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[repr(C)]
pub struct BlendResult {
    pub blended_up: f64,
    /// Weight on the heuristic tilt
    pub w_ta: f64,
    pub w_strike: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[repr(C)]
pub struct TimeAwareResult {
    pub time_decay: f64,
    pub adjusted_up: f64,
    pub adjusted_down: f64,
}

// ── Final output ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateSource {
    /// Heuristic tilt applied to the lognormal baseline
    Blended,
    /// Heuristic shrunk toward 0.5; no statistical estimate was available
    HeuristicDecayed,
}

impl std::fmt::Display for EstimateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blended => write!(f, "blended"),
            Self::HeuristicDecayed => write!(f, "heuristic_decayed"),
        }
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct ProbabilityEstimate {
    pub up: f64,
    pub down: f64,
    pub source: EstimateSource,
    pub score: DirectionalScore,
    pub volatility: VolatilityEstimate,
    pub strike_up: Option<f64>,
    pub blend: Option<BlendResult>,
    pub time_aware: Option<TimeAwareResult>,
}
