use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};
use ta::Reset;

use crate::error::IndicatorError;
use crate::trading::model::Bar;

/// 趋势方向：收盘价高于 SuperTrend 为多头
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum TrendDirection {
    Bullish,
    Bearish,
}

impl TrendDirection {
    pub fn from_close(close: f64, level: f64) -> Self {
        if close > level {
            TrendDirection::Bullish
        } else {
            TrendDirection::Bearish
        }
    }
}

/// Which final band the trend line is tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Regime {
    Upper,
    Lower,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SuperTrendPoint {
    pub value: f64,
    pub upper: f64,
    pub lower: f64,
    pub regime: Regime,
    pub direction: TrendDirection,
}

#[derive(Debug, Clone, Copy)]
struct BandState {
    final_upper: f64,
    final_lower: f64,
    value: f64,
    regime: Regime,
}

impl BandState {
    fn new(final_upper: f64, final_lower: f64, regime: Regime) -> Self {
        let value = match regime {
            Regime::Upper => final_upper,
            Regime::Lower => final_lower,
        };
        Self {
            final_upper,
            final_lower,
            value,
            regime,
        }
    }
}

/// Streaming SuperTrend.
///
/// True range is the bar's `high - low` only (no previous-close term) and ATR
/// is its simple mean over `period` bars. Until `period` bars have been seen
/// `next` returns `None`; the first bar with an ATR seeds both final bands from
/// the basic bands and starts in the upper regime.
#[derive(Debug, Clone)]
pub struct SuperTrend {
    period: usize,
    multiplier: f64,
    ranges: VecDeque<f64>,
    prev_close: Option<f64>,
    state: Option<BandState>,
}

impl SuperTrend {
    pub fn new(period: usize, multiplier: f64) -> Result<Self, IndicatorError> {
        if period == 0 {
            return Err(IndicatorError::InvalidPeriod(period));
        }
        if !multiplier.is_finite() || multiplier < 0.0 {
            return Err(IndicatorError::InvalidMultiplier(multiplier));
        }
        Ok(Self {
            period,
            multiplier,
            ranges: VecDeque::with_capacity(period + 1),
            prev_close: None,
            state: None,
        })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn is_ready(&self) -> bool {
        self.state.is_some()
    }

    pub fn next(&mut self, bar: &Bar) -> Option<SuperTrendPoint> {
        self.ranges.push_back(bar.high - bar.low);
        if self.ranges.len() > self.period {
            self.ranges.pop_front();
        }
        if self.ranges.len() < self.period {
            self.prev_close = Some(bar.close);
            return None;
        }

        let atr = self.ranges.iter().sum::<f64>() / self.period as f64;
        let hl2 = bar.hl2();
        let basic_upper = hl2 + self.multiplier * atr;
        let basic_lower = hl2 - self.multiplier * atr;

        let state = match (self.state, self.prev_close) {
            (Some(prev), Some(prev_close)) => {
                let final_upper =
                    if basic_upper < prev.final_upper || prev_close > prev.final_upper {
                        basic_upper
                    } else {
                        prev.final_upper
                    };
                let final_lower =
                    if basic_lower > prev.final_lower || prev_close < prev.final_lower {
                        basic_lower
                    } else {
                        prev.final_lower
                    };
                // 上一根趋势值等于上轨即为上轨状态，上下轨重合时走上轨分支
                let regime = if prev.value == prev.final_upper {
                    if bar.close <= final_upper {
                        Regime::Upper
                    } else {
                        Regime::Lower
                    }
                } else if bar.close >= final_lower {
                    Regime::Lower
                } else {
                    Regime::Upper
                };
                BandState::new(final_upper, final_lower, regime)
            }
            // 第一根有效ATR的K线作为递推起点
            _ => BandState::new(basic_upper, basic_lower, Regime::Upper),
        };

        self.state = Some(state);
        self.prev_close = Some(bar.close);

        Some(SuperTrendPoint {
            value: state.value,
            upper: state.final_upper,
            lower: state.final_lower,
            regime: state.regime,
            direction: TrendDirection::from_close(bar.close, state.value),
        })
    }
}

impl Reset for SuperTrend {
    fn reset(&mut self) {
        self.ranges.clear();
        self.prev_close = None;
        self.state = None;
    }
}

impl fmt::Display for SuperTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SuperTrend({}, {})", self.period, self.multiplier)
    }
}

/// Runs a fresh stepper over `bars`; the result is index-aligned with the input.
pub fn super_trend(
    bars: &[Bar],
    period: usize,
    multiplier: f64,
) -> Result<Vec<Option<SuperTrendPoint>>, IndicatorError> {
    let mut indicator = SuperTrend::new(period, multiplier)?;
    Ok(bars.iter().map(|bar| indicator.next(bar)).collect())
}

pub fn super_trend_values(
    bars: &[Bar],
    period: usize,
    multiplier: f64,
) -> Result<Vec<Option<f64>>, IndicatorError> {
    Ok(super_trend(bars, period, multiplier)?
        .into_iter()
        .map(|p| p.map(|p| p.value))
        .collect())
}
