//! Windowed indicator helpers for callers that only have raw closes.
//! The estimator itself takes indicator values as given.

pub mod momentum;

pub use momentum::{compute_rsi, slope_last, sma};
