use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Series;
use crate::trading::indicator::{IndicatorBundle, IndicatorConfig};

/// 历史数据表的一行，主键 (ticker, date)
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HistoricalRow {
    pub ticker: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub rsi: Option<f64>,
    pub ma50: Option<f64>,
    pub ma200: Option<f64>,
    pub supertrend: Option<f64>,
}

impl HistoricalRow {
    /// One row per bar. Columns whose indicator is not configured stay `None`.
    pub fn from_bundle(
        ticker: &str,
        series: &Series,
        bundle: &IndicatorBundle,
        config: &IndicatorConfig,
    ) -> Vec<HistoricalRow> {
        let rsi = bundle.series(&config.rsi_name());
        let ma50 = bundle.series(&IndicatorConfig::ma_name(50));
        let ma200 = bundle.series(&IndicatorConfig::ma_name(200));
        let supertrend = bundle.series(&config.persisted_super_trend.name());

        series
            .bars()
            .iter()
            .enumerate()
            .map(|(i, bar)| HistoricalRow {
                ticker: ticker.to_string(),
                date: bar.timestamp,
                open: bar.open,
                high: bar.high,
                low: bar.low,
                close: bar.close,
                volume: bar.volume,
                rsi: rsi.and_then(|s| s.get(i)),
                ma50: ma50.and_then(|s| s.get(i)),
                ma200: ma200.and_then(|s| s.get(i)),
                supertrend: supertrend.and_then(|s| s.get(i)),
            })
            .collect()
    }
}
