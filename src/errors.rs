/// Error types for the ambient surface around the estimator.
///
/// The probability core itself never fails: missing or degenerate inputs
/// surface as `None` per field. These errors only cover configuration and
/// request loading in the runner.
#[derive(Debug, thiserror::Error)]
pub enum EstimatorError {
    #[error("config error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("invalid input: {0}")]
    Input(String),
}

impl From<serde_json::Error> for EstimatorError {
    fn from(e: serde_json::Error) -> Self {
        EstimatorError::Parse(e.to_string())
    }
}

impl From<std::io::Error> for EstimatorError {
    fn from(e: std::io::Error) -> Self {
        EstimatorError::Io(e.to_string())
    }
}

pub type EstimatorResult<T> = Result<T, EstimatorError>;
