use std::io::Read;
use updown_estimator::errors::{EstimatorError, EstimatorResult};
use updown_estimator::{engine, window, EstimatorConfig, MarketSnapshot};

/// One estimation request, as read from a file or stdin.
#[derive(Debug, serde::Deserialize)]
struct EstimateRequest {
    snapshot: MarketSnapshot,
    #[serde(default)]
    closes: Vec<f64>,
    remaining_minutes: Option<f64>,
    close_time: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> EstimatorResult<()> {
    let cfg = EstimatorConfig::from_env()?;
    tracing::debug!(?cfg, "config loaded");

    let raw = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .map_err(|e| EstimatorError::Io(format!("{path}: {e}")))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let req: EstimateRequest = serde_json::from_str(&raw)?;

    let remaining = match (req.remaining_minutes, req.close_time.as_deref()) {
        (Some(m), _) => Some(m),
        (None, Some(close)) => Some(window::remaining_minutes(close, chrono::Utc::now()).ok_or_else(
            || EstimatorError::Input(format!("unparseable close_time: {close}")),
        )?),
        (None, None) => None,
    };

    let est = engine::estimate(&req.snapshot, &req.closes, remaining, &cfg);

    tracing::info!(
        up = est.up,
        source = %est.source,
        strike_up = ?est.strike_up,
        raw_up = est.score.raw_up,
        remaining = ?remaining,
        "estimate ready"
    );

    println!("{}", serde_json::to_string_pretty(&est)?);
    Ok(())
}
