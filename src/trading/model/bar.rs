use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::IndicatorError;

/// 日线K线（OHLCV）
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Bar {
    #[serde(alias = "date")]
    pub timestamp: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    pub fn builder() -> BarBuilder {
        BarBuilder::new()
    }

    pub fn hl2(&self) -> f64 {
        (self.high + self.low) / 2.0
    }

    /// Prices must be finite and positive, volume finite and non-negative.
    /// The `low <= open,close <= high` relation is deliberately not checked.
    pub fn validate(&self, index: usize) -> Result<(), IndicatorError> {
        let prices = [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ];
        for (name, price) in prices {
            if !price.is_finite() {
                return Err(IndicatorError::malformed(
                    index,
                    format!("{} is not finite ({})", name, price),
                ));
            }
            if price <= 0.0 {
                return Err(IndicatorError::malformed(
                    index,
                    format!("{} must be positive ({})", name, price),
                ));
            }
        }
        if !self.volume.is_finite() || self.volume < 0.0 {
            return Err(IndicatorError::malformed(
                index,
                format!("volume must be finite and non-negative ({})", self.volume),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct BarBuilder {
    ts: Option<NaiveDate>,
    o: Option<f64>,
    h: Option<f64>,
    l: Option<f64>,
    c: Option<f64>,
    v: Option<f64>,
}

impl BarBuilder {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn ts(mut self, val: NaiveDate) -> Self {
        self.ts = Some(val);
        self
    }
    pub fn o(mut self, val: f64) -> Self {
        self.o = Some(val);
        self
    }
    pub fn h(mut self, val: f64) -> Self {
        self.h = Some(val);
        self
    }
    pub fn l(mut self, val: f64) -> Self {
        self.l = Some(val);
        self
    }
    pub fn c(mut self, val: f64) -> Self {
        self.c = Some(val);
        self
    }
    pub fn v(mut self, val: f64) -> Self {
        self.v = Some(val);
        self
    }

    pub fn build(self) -> Result<Bar, IndicatorError> {
        if let (Some(timestamp), Some(open), Some(high), Some(low), Some(close), Some(volume)) =
            (self.ts, self.o, self.h, self.l, self.c, self.v)
        {
            let bar = Bar {
                timestamp,
                open,
                high,
                low,
                close,
                volume,
            };
            bar.validate(0)?;
            Ok(bar)
        } else {
            Err(IndicatorError::malformed(0, "bar is incomplete"))
        }
    }
}

/// 单个标的按日期升序排列的K线序列
///
/// Construction validates every bar and requires strictly increasing dates, so
/// every indicator can assume well-formed input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    bars: Vec<Bar>,
}

impl Series {
    pub fn new(bars: Vec<Bar>) -> Result<Self, IndicatorError> {
        for (index, bar) in bars.iter().enumerate() {
            bar.validate(index)?;
        }
        for (index, pair) in bars.windows(2).enumerate() {
            if pair[1].timestamp <= pair[0].timestamp {
                return Err(IndicatorError::NonMonotonicTimestamp {
                    index: index + 1,
                    previous: pair[0].timestamp,
                    current: pair[1].timestamp,
                });
            }
        }
        Ok(Self { bars })
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn timestamps(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.timestamp).collect()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

impl TryFrom<Vec<Bar>> for Series {
    type Error = IndicatorError;

    fn try_from(bars: Vec<Bar>) -> Result<Self, Self::Error> {
        Series::new(bars)
    }
}
