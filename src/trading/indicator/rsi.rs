use serde::{Deserialize, Serialize};

use super::statistics::rolling_mean;
use crate::error::IndicatorError;

pub const DEFAULT_RSI_PERIOD: usize = 14;
pub const OVERBOUGHT_LEVEL: f64 = 70.0;
pub const OVERSOLD_LEVEL: f64 = 30.0;

/// RSI computed from simple rolling means of gains and losses (not Wilder's
/// RMA).
///
/// - the first `period` positions are absent (`period` deltas are needed);
/// - a zero average loss leaves RS undefined and the RSI absent at that bar,
///   including the flat case where gain and loss are both zero.
pub fn rsi(closes: &[f64], period: usize) -> Result<Vec<Option<f64>>, IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::InvalidPeriod(period));
    }
    let mut out = vec![None; closes.len()];
    if closes.len() <= period {
        return Ok(out);
    }

    let (gains, losses): (Vec<f64>, Vec<f64>) = closes
        .windows(2)
        .map(|w| {
            let change = w[1] - w[0];
            (change.max(0.0), (-change).max(0.0))
        })
        .unzip();

    let avg_gain = rolling_mean(&gains, period)?;
    let avg_loss = rolling_mean(&losses, period)?;

    // delta j 对应序列下标 j + 1
    for (j, (gain, loss)) in avg_gain.iter().zip(avg_loss.iter()).enumerate() {
        out[j + 1] = match (gain, loss) {
            (Some(gain), Some(loss)) => rsi_from_averages(*gain, *loss),
            _ => None,
        };
    }
    Ok(out)
}

/// Last defined RSI of the full-series computation.
pub fn rsi_latest(closes: &[f64], period: usize) -> Result<Option<f64>, IndicatorError> {
    Ok(rsi(closes, period)?.into_iter().rev().flatten().next())
}

fn rsi_from_averages(gain: f64, loss: f64) -> Option<f64> {
    if loss == 0.0 {
        return None;
    }
    let rs = gain / loss;
    let value = 100.0 - 100.0 / (1.0 + rs);
    value.is_finite().then_some(value)
}

/// RSI 区间判断
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum RsiZone {
    Overbought,
    Oversold,
    Neutral,
}

impl RsiZone {
    pub fn classify(value: f64) -> Self {
        if value > OVERBOUGHT_LEVEL {
            RsiZone::Overbought
        } else if value < OVERSOLD_LEVEL {
            RsiZone::Oversold
        } else {
            RsiZone::Neutral
        }
    }
}
