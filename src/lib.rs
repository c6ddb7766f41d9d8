//! # Rust Quant Dashboard
//!
//! 日线技术指标计算：MA / EMA / RSI / SuperTrend，以及按标的批量计算与落库

pub mod app;
pub mod app_config;
pub mod error;
pub mod trading;

pub use error::{AppError, IndicatorError};
pub use trading::indicator::{compute_all, IndicatorBundle, IndicatorConfig};
pub use trading::model::{Bar, IndicatorSeries, Series};
