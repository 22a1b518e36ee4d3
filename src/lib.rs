//! Up-probability estimation for short-lived binary markets.
//!
//! Fuses a rule-based indicator score with a lognormal strike model in
//! log-odds space, shrinking the heuristic's influence as the market nears
//! expiry. Every entry point is a pure, synchronous function of its inputs.

pub mod blend;
pub mod config;
pub mod engine;
pub mod errors;
pub mod indicators;
pub mod models;
pub mod scoring;
pub mod state;
pub mod window;

pub use config::EstimatorConfig;
pub use engine::estimate;
pub use errors::{EstimatorError, EstimatorResult};
pub use state::{MarketSnapshot, ProbabilityEstimate};
