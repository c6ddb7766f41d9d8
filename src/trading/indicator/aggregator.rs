use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::{IndicatorConfig, SuperTrendParams};
use super::rsi::{rsi, RsiZone};
use super::statistics::{ema, sma, sma_latest};
use super::super_trend::{super_trend_values, TrendDirection};
use crate::error::IndicatorError;
use crate::trading::model::{Bar, IndicatorSeries, Series};

/// 单个标的的全部指标结果：完整序列 + 最新值快照
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct IndicatorBundle {
    pub series: BTreeMap<String, IndicatorSeries>,
    pub latest: BTreeMap<String, Option<f64>>,
}

impl IndicatorBundle {
    fn insert(&mut self, name: String, series: IndicatorSeries, latest: Option<f64>) {
        self.latest.insert(name.clone(), latest);
        self.series.insert(name, series);
    }

    pub fn series(&self, name: &str) -> Option<&IndicatorSeries> {
        self.series.get(name)
    }

    pub fn latest(&self, name: &str) -> Option<f64> {
        self.latest.get(name).copied().flatten()
    }

    /// True when no series holds any position (empty input).
    pub fn is_empty(&self) -> bool {
        self.series.values().all(IndicatorSeries::is_empty)
    }

    pub fn rsi_zone(&self) -> Option<RsiZone> {
        self.latest("rsi").map(RsiZone::classify)
    }

    /// Direction of the latest SuperTrend level for `params` against `close`.
    pub fn trend_direction(&self, params: &SuperTrendParams, close: f64) -> Option<TrendDirection> {
        self.latest(&params.name())
            .map(|level| TrendDirection::from_close(close, level))
    }
}

/// Validates `bars` and computes every configured indicator.
///
/// Structural problems in the input (`MalformedBar`, non-monotonic dates) fail
/// the whole call; short input just produces absent values.
pub fn compute_all(
    bars: &[Bar],
    config: &IndicatorConfig,
) -> Result<IndicatorBundle, IndicatorError> {
    let series = Series::new(bars.to_vec())?;
    compute_series(&series, config)
}

/// Same as [`compute_all`] for an already validated series.
pub fn compute_series(
    series: &Series,
    config: &IndicatorConfig,
) -> Result<IndicatorBundle, IndicatorError> {
    config.validate()?;

    let timestamps = series.timestamps();
    let closes = series.closes();
    let mut bundle = IndicatorBundle::default();

    let rsi_series = IndicatorSeries::from_values(&timestamps, rsi(&closes, config.rsi_period)?);
    let rsi_latest = rsi_series.latest();
    bundle.insert(config.rsi_name(), rsi_series, rsi_latest);

    for &period in &config.ma_periods {
        let values = IndicatorSeries::from_values(&timestamps, sma(&closes, period)?);
        bundle.insert(
            IndicatorConfig::ma_name(period),
            values,
            sma_latest(&closes, period)?,
        );
    }

    for &span in &config.ema_spans {
        let values = IndicatorSeries::from_values(&timestamps, ema(&closes, span)?);
        let latest = values.latest();
        bundle.insert(IndicatorConfig::ema_name(span), values, latest);
    }

    // 各参数组互相独立，每次使用新的状态
    for params in &config.super_trend {
        let values = IndicatorSeries::from_values(
            &timestamps,
            super_trend_values(series.bars(), params.period, params.multiplier)?,
        );
        let latest = values.latest();
        bundle.insert(params.name(), values, latest);
    }

    debug!(
        "computed {} indicators over {} bars",
        bundle.series.len(),
        series.len()
    );
    Ok(bundle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn rising(n: usize) -> Vec<Bar> {
        let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        (0..n)
            .map(|i| {
                let c = 100.0 + i as f64;
                Bar {
                    timestamp: start + Duration::days(i as i64),
                    open: c - 0.5,
                    high: c + 1.0,
                    low: c - 1.0,
                    close: c,
                    volume: 1_000.0,
                }
            })
            .collect()
    }

    #[test]
    fn bundle_contains_every_configured_name() {
        let config = IndicatorConfig::default();
        let bundle = compute_all(&rising(60), &config).unwrap();
        for name in config.names() {
            let series = bundle.series(&name).unwrap();
            assert_eq!(series.len(), 60, "{}", name);
            assert!(bundle.latest.contains_key(&name));
        }
        assert_eq!(bundle.latest("ma200"), None);
        // closes 110..=159 -> mean 134.5
        assert_eq!(bundle.latest("ma50"), Some(134.5));
        assert_eq!(bundle.series("ma50").unwrap().latest(), Some(134.5));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = IndicatorConfig {
            ema_spans: vec![0],
            ..IndicatorConfig::default()
        };
        assert_eq!(
            compute_all(&rising(5), &config),
            Err(IndicatorError::InvalidPeriod(0))
        );
    }

    #[test]
    fn malformed_input_is_rejected() {
        let mut bars = rising(5);
        bars[3].close = f64::NAN;
        assert!(matches!(
            compute_all(&bars, &IndicatorConfig::default()),
            Err(IndicatorError::MalformedBar { index: 3, .. })
        ));
    }

    #[test]
    fn trend_direction_uses_latest_level() {
        let config = IndicatorConfig::default();
        let bars = rising(40);
        let bundle = compute_all(&bars, &config).unwrap();
        let last_close = bars.last().unwrap().close;
        assert_eq!(
            bundle.trend_direction(&config.persisted_super_trend, last_close),
            Some(TrendDirection::Bullish)
        );
        // 单调上涨：平均亏损为0，RSI 为空
        assert_eq!(bundle.rsi_zone(), None);
    }
}
