use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One position of an indicator series. `value` is `None` while the indicator
/// is still warming up or when the value is undefined at that bar.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct IndicatorPoint {
    pub timestamp: NaiveDate,
    pub value: Option<f64>,
}

/// 与源K线一一对齐的指标序列
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct IndicatorSeries {
    pub points: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    /// Zips timestamps with values; both must have the same length.
    pub fn from_values(timestamps: &[NaiveDate], values: Vec<Option<f64>>) -> Self {
        debug_assert_eq!(timestamps.len(), values.len());
        let points = timestamps
            .iter()
            .zip(values)
            .map(|(&timestamp, value)| IndicatorPoint { timestamp, value })
            .collect();
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.points.get(index).and_then(|p| p.value)
    }

    pub fn values(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// 最后一个非空值
    pub fn latest(&self) -> Option<f64> {
        self.points.iter().rev().find_map(|p| p.value)
    }

    pub fn defined_count(&self) -> usize {
        self.points.iter().filter(|p| p.value.is_some()).count()
    }
}
