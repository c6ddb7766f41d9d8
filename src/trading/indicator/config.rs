use std::path::Path;

use serde::{Deserialize, Serialize};

use super::rsi::DEFAULT_RSI_PERIOD;
use crate::error::{self, AppError, IndicatorError};

/// SuperTrend 参数组
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct SuperTrendParams {
    pub period: usize,
    pub multiplier: f64,
}

impl SuperTrendParams {
    pub const fn new(period: usize, multiplier: f64) -> Self {
        Self { period, multiplier }
    }

    /// `supertrend_10_3`, `supertrend_10_2.5`, ...
    pub fn name(&self) -> String {
        format!("supertrend_{}_{}", self.period, self.multiplier)
    }
}

pub const DEFAULT_SUPER_TREND_PRESETS: [SuperTrendParams; 3] = [
    SuperTrendParams::new(10, 2.0),
    SuperTrendParams::new(10, 3.0),
    SuperTrendParams::new(20, 5.0),
];

/// 指标参数配置
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub rsi_period: usize,
    pub ma_periods: Vec<usize>,
    pub ema_spans: Vec<usize>,
    pub super_trend: Vec<SuperTrendParams>,
    /// Preset whose values fill the persisted `supertrend` column.
    pub persisted_super_trend: SuperTrendParams,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            rsi_period: DEFAULT_RSI_PERIOD,
            ma_periods: vec![50, 200],
            ema_spans: vec![20],
            super_trend: DEFAULT_SUPER_TREND_PRESETS.to_vec(),
            persisted_super_trend: SuperTrendParams::new(10, 3.0),
        }
    }
}

impl IndicatorConfig {
    pub fn rsi_name(&self) -> String {
        "rsi".to_string()
    }

    pub fn ma_name(period: usize) -> String {
        format!("ma{}", period)
    }

    pub fn ema_name(span: usize) -> String {
        format!("ema{}", span)
    }

    /// Every indicator name this configuration produces, in bundle order.
    pub fn names(&self) -> Vec<String> {
        let mut names = vec![self.rsi_name()];
        names.extend(self.ma_periods.iter().map(|&p| Self::ma_name(p)));
        names.extend(self.ema_spans.iter().map(|&s| Self::ema_name(s)));
        names.extend(self.super_trend.iter().map(SuperTrendParams::name));
        names
    }

    pub fn validate(&self) -> Result<(), IndicatorError> {
        let periods = std::iter::once(self.rsi_period)
            .chain(self.ma_periods.iter().copied())
            .chain(self.ema_spans.iter().copied())
            .chain(self.super_trend.iter().map(|p| p.period));
        for period in periods {
            if period == 0 {
                return Err(IndicatorError::InvalidPeriod(period));
            }
        }
        for params in &self.super_trend {
            if !params.multiplier.is_finite() || params.multiplier < 0.0 {
                return Err(IndicatorError::InvalidMultiplier(params.multiplier));
            }
        }
        // 落库的 supertrend 列必须来自已配置的参数组
        if !self.super_trend.contains(&self.persisted_super_trend) {
            return Err(IndicatorError::UnknownPersistedPreset(
                self.persisted_super_trend.name(),
            ));
        }
        Ok(())
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> error::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        let config: IndicatorConfig = serde_json::from_str(&raw)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }
}
