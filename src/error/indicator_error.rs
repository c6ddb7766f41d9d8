use chrono::NaiveDate;
use thiserror::Error;

/// 指标计算错误
///
/// Warm-up gaps and a zero average loss are not errors: they surface as absent
/// values in the produced series. Only invalid parameters and structurally
/// corrupt input end up here.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum IndicatorError {
    #[error("Invalid period: {0}, must be greater than 0")]
    InvalidPeriod(usize),

    #[error("Invalid multiplier: {0}, must be finite and non-negative")]
    InvalidMultiplier(f64),

    #[error("Persisted SuperTrend preset {0} is not among the configured presets")]
    UnknownPersistedPreset(String),

    #[error("Malformed bar at index {index}: {reason}")]
    MalformedBar { index: usize, reason: String },

    #[error("Non-monotonic timestamp at index {index}: {current} does not follow {previous}")]
    NonMonotonicTimestamp {
        index: usize,
        previous: NaiveDate,
        current: NaiveDate,
    },
}

impl IndicatorError {
    pub(crate) fn malformed(index: usize, reason: impl Into<String>) -> Self {
        IndicatorError::MalformedBar {
            index,
            reason: reason.into(),
        }
    }
}
