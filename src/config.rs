use crate::errors::{EstimatorError, EstimatorResult};

pub const DEFAULT_LOOKBACK_MINUTES: usize = 60;
pub const DEFAULT_MU_PER_MINUTE: f64 = 0.0;
pub const DEFAULT_ALPHA: f64 = 1.75;
pub const DEFAULT_WINDOW_MINUTES: f64 = 15.0;

/// Tuning knobs for a single estimate. All fields have safe defaults.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EstimatorConfig {
    /// Window of closes used for return statistics.
    pub lookback_minutes: usize,
    /// Turn off to keep distance-to-strike out of the heuristic score when the
    /// lognormal model already prices it.
    pub use_price_to_beat_distance: bool,
    /// Drift per minute. Zero is a pure random walk.
    pub mu_per_minute: f64,
    /// Maximum logit-space tilt contributed by the heuristic score.
    pub alpha: f64,
    /// Full life of the market in minutes.
    pub window_minutes: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            lookback_minutes: DEFAULT_LOOKBACK_MINUTES,
            use_price_to_beat_distance: true,
            mu_per_minute: DEFAULT_MU_PER_MINUTE,
            alpha: DEFAULT_ALPHA,
            window_minutes: DEFAULT_WINDOW_MINUTES,
        }
    }
}

impl EstimatorConfig {
    pub fn from_env() -> EstimatorResult<Self> {
        dotenvy::dotenv().ok();

        let lookback_minutes = env_var_or("LOOKBACK_MINUTES", "60")
            .parse::<usize>()
            .map_err(|e| EstimatorError::Config(format!("LOOKBACK_MINUTES: {e}")))?;

        let use_price_to_beat_distance = parse_bool(&env_var_or("USE_PRICE_TO_BEAT_DISTANCE", "true"))
            .ok_or_else(|| {
                EstimatorError::Config("USE_PRICE_TO_BEAT_DISTANCE: expected true/false".into())
            })?;

        let mu_per_minute = env_var_or("MU_PER_MINUTE", "0")
            .parse::<f64>()
            .map_err(|e| EstimatorError::Config(format!("MU_PER_MINUTE: {e}")))?;

        let alpha = env_var_or("BLEND_ALPHA", "1.75")
            .parse::<f64>()
            .map_err(|e| EstimatorError::Config(format!("BLEND_ALPHA: {e}")))?;

        let window_minutes = env_var_or("WINDOW_MINUTES", "15")
            .parse::<f64>()
            .map_err(|e| EstimatorError::Config(format!("WINDOW_MINUTES: {e}")))?;

        let cfg = Self {
            lookback_minutes,
            use_price_to_beat_distance,
            mu_per_minute,
            alpha,
            window_minutes,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> EstimatorResult<()> {
        if self.lookback_minutes < 2 {
            return Err(EstimatorError::Config(format!(
                "LOOKBACK_MINUTES must be >= 2, got {}",
                self.lookback_minutes
            )));
        }
        if !self.mu_per_minute.is_finite() {
            return Err(EstimatorError::Config("MU_PER_MINUTE must be finite".into()));
        }
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(EstimatorError::Config(format!(
                "BLEND_ALPHA must be finite and >= 0, got {}",
                self.alpha
            )));
        }
        if !self.window_minutes.is_finite() || self.window_minutes <= 0.0 {
            return Err(EstimatorError::Config(format!(
                "WINDOW_MINUTES must be > 0, got {}",
                self.window_minutes
            )));
        }
        Ok(())
    }
}

fn env_var_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
