//! Error types for the chat statistics core.

/// Top-level error enum for the chat statistics core.
///
/// Only structural failures live here. Per-message anomalies (broken reply
/// offsets, missing fields) degrade that message's contribution and never
/// surface as errors.
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(feature = "python")]
impl From<StatsError> for pyo3::PyErr {
    fn from(err: StatsError) -> pyo3::PyErr {
        use pyo3::exceptions::{PyIOError, PyValueError};
        match &err {
            StatsError::MalformedInput(_) | StatsError::Config(_) | StatsError::Json(_) => {
                PyValueError::new_err(err.to_string())
            }
            StatsError::Io(_) => PyIOError::new_err(err.to_string()),
        }
    }
}

pub type StatsResult<T> = Result<T, StatsError>;
