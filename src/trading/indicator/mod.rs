//! 技术指标：均线、RSI、SuperTrend 及汇总

pub mod aggregator;
pub mod config;
pub mod rsi;
pub mod statistics;
pub mod super_trend;

pub use aggregator::{compute_all, compute_series, IndicatorBundle};
pub use config::{IndicatorConfig, SuperTrendParams, DEFAULT_SUPER_TREND_PRESETS};
pub use rsi::{rsi, rsi_latest, RsiZone};
pub use statistics::{ema, rolling_mean, rolling_std, rolling_variance, sma, sma_latest};
pub use super_trend::{
    super_trend, super_trend_values, Regime, SuperTrend, SuperTrendPoint, TrendDirection,
};
