//! 序列统计：SMA / EMA / 滚动均值与方差
//!
//! All helpers return one slot per input value; `None` marks the warm-up part
//! of the window.

use ta::indicators::ExponentialMovingAverage;
use ta::Next;

use crate::error::IndicatorError;

fn check_period(period: usize) -> Result<(), IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::InvalidPeriod(period));
    }
    Ok(())
}

/// Arithmetic mean of each trailing window of `window` values.
///
/// Every window is summed from scratch so an all-zero window yields exactly
/// `0.0`, which the RSI relies on.
pub fn rolling_mean(values: &[f64], window: usize) -> Result<Vec<Option<f64>>, IndicatorError> {
    check_period(window)?;
    let mut out = vec![None; values.len()];
    for (offset, w) in values.windows(window).enumerate() {
        out[offset + window - 1] = Some(w.iter().sum::<f64>() / window as f64);
    }
    Ok(out)
}

/// Sample variance (ddof = 1) of each trailing window. A window of one value
/// has no sample variance, so `window == 1` yields an all-`None` result.
pub fn rolling_variance(
    values: &[f64],
    window: usize,
) -> Result<Vec<Option<f64>>, IndicatorError> {
    check_period(window)?;
    let mut out = vec![None; values.len()];
    if window < 2 {
        return Ok(out);
    }
    for (offset, w) in values.windows(window).enumerate() {
        let mean = w.iter().sum::<f64>() / window as f64;
        let ss = w.iter().map(|x| (x - mean).powi(2)).sum::<f64>();
        out[offset + window - 1] = Some(ss / (window - 1) as f64);
    }
    Ok(out)
}

pub fn rolling_std(values: &[f64], window: usize) -> Result<Vec<Option<f64>>, IndicatorError> {
    Ok(rolling_variance(values, window)?
        .into_iter()
        .map(|v| v.map(f64::sqrt))
        .collect())
}

/// 简单移动平均，前 `period - 1` 个位置为空
pub fn sma(closes: &[f64], period: usize) -> Result<Vec<Option<f64>>, IndicatorError> {
    rolling_mean(closes, period)
}

/// Mean of the last `period` closes of the whole series, `None` when the
/// series is shorter than `period`.
pub fn sma_latest(closes: &[f64], period: usize) -> Result<Option<f64>, IndicatorError> {
    check_period(period)?;
    if closes.len() < period {
        return Ok(None);
    }
    let tail = &closes[closes.len() - period..];
    Ok(Some(tail.iter().sum::<f64>() / period as f64))
}

/// 指数移动平均（adjust = false）
///
/// `ema[0] = closes[0]`, then `ema[i] = a * closes[i] + (1 - a) * ema[i-1]` with
/// `a = 2 / (span + 1)`. Defined from the first bar on.
pub fn ema(closes: &[f64], span: usize) -> Result<Vec<Option<f64>>, IndicatorError> {
    check_period(span)?;
    let mut indicator =
        ExponentialMovingAverage::new(span).map_err(|_| IndicatorError::InvalidPeriod(span))?;
    Ok(closes.iter().map(|&c| Some(indicator.next(c))).collect())
}
