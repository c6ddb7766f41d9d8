mod common;

use rust_quant_dashboard::trading::indicator::{
    rolling_mean, super_trend, super_trend_values, Regime, SuperTrend, TrendDirection,
};
use rust_quant_dashboard::Bar;

/// Straight array version of the band recurrence, seeded at the first bar
/// with a defined ATR.
fn reference(bars: &[Bar], period: usize, multiplier: f64) -> Vec<Option<f64>> {
    let n = bars.len();
    let tr: Vec<f64> = bars.iter().map(|b| b.high - b.low).collect();
    let atr = rolling_mean(&tr, period).unwrap();
    let mut out = vec![None; n];
    let Some(start) = atr.iter().position(Option::is_some) else {
        return out;
    };

    let mut fu = vec![0.0; n];
    let mut fl = vec![0.0; n];
    let mut trend = vec![0.0; n];
    for i in start..n {
        let hl2 = (bars[i].high + bars[i].low) / 2.0;
        let a = atr[i].unwrap();
        let bu = hl2 + multiplier * a;
        let bl = hl2 - multiplier * a;
        if i == start {
            fu[i] = bu;
            fl[i] = bl;
            trend[i] = fu[i];
        } else {
            let prev_close = bars[i - 1].close;
            fu[i] = if bu < fu[i - 1] || prev_close > fu[i - 1] {
                bu
            } else {
                fu[i - 1]
            };
            fl[i] = if bl > fl[i - 1] || prev_close < fl[i - 1] {
                bl
            } else {
                fl[i - 1]
            };
            trend[i] = if trend[i - 1] == fu[i - 1] {
                if bars[i].close <= fu[i] {
                    fu[i]
                } else {
                    fl[i]
                }
            } else if bars[i].close >= fl[i] {
                fl[i]
            } else {
                fu[i]
            };
        }
        out[i] = Some(trend[i]);
    }
    out
}

#[test]
fn test_super_trend_matches_reference() {
    for seed in [5, 17, 99] {
        let bars = common::random_walk(400, seed);
        for (period, multiplier) in [(10, 2.0), (10, 3.0), (20, 5.0)] {
            let ours = super_trend_values(&bars, period, multiplier).unwrap();
            assert_eq!(ours, reference(&bars, period, multiplier));
        }
    }
}

#[test]
fn test_super_trend_matches_reference_with_flat_bars() {
    // 每7根一根 high == low 的K线，上下轨会重合
    for seed in 0..20 {
        let mut bars = common::random_walk(200, seed);
        for bar in bars.iter_mut().step_by(7) {
            bar.high = bar.close;
            bar.low = bar.close;
            bar.open = bar.close;
        }
        for (period, multiplier) in [(1, 2.0), (3, 0.0), (10, 3.0)] {
            let ours = super_trend_values(&bars, period, multiplier).unwrap();
            assert_eq!(ours, reference(&bars, period, multiplier));
        }
    }
}

#[test]
fn test_super_trend_value_is_one_of_the_bands() {
    let bars = common::random_walk(500, 123);
    let points = super_trend(&bars, 10, 3.0).unwrap();
    assert!(points[..9].iter().all(Option::is_none));
    for p in points.iter().flatten() {
        assert!(p.value == p.upper || p.value == p.lower);
        match p.regime {
            Regime::Upper => assert_eq!(p.value, p.upper),
            Regime::Lower => assert_eq!(p.value, p.lower),
        }
    }
}

#[test]
fn test_super_trend_short_series_is_absent() {
    let bars = common::bars_from_closes(&[10.0, 11.0, 12.0, 11.5, 12.5], 0.5);
    let values = super_trend_values(&bars, 10, 2.0).unwrap();
    assert_eq!(values, vec![None; 5]);
}

#[test]
fn test_super_trend_rising_series_stays_bullish() {
    // 强势上涨：每根K线涨幅远大于 multiplier * ATR
    let closes: Vec<f64> = (0..120).map(|i| 100.0 + 5.0 * i as f64).collect();
    let bars = common::bars_from_closes(&closes, 0.5);
    let points = super_trend(&bars, 10, 3.0).unwrap();
    for p in points[10..].iter() {
        let p = p.unwrap();
        assert_eq!(p.regime, Regime::Lower);
        assert_eq!(p.direction, TrendDirection::Bullish);
    }
}

#[test]
fn test_super_trend_gentle_rise_never_flips_back() {
    // 缓慢上涨：从初始的上轨状态切换到下轨后不再翻转
    let closes: Vec<f64> = (0..200).map(|i| 100.0 + i as f64).collect();
    let bars = common::bars_from_closes(&closes, 1.0);
    let regimes: Vec<Regime> = super_trend(&bars, 10, 3.0)
        .unwrap()
        .into_iter()
        .flatten()
        .map(|p| p.regime)
        .collect();
    let first_lower = regimes.iter().position(|r| *r == Regime::Lower).unwrap();
    assert!(regimes[first_lower..].iter().all(|r| *r == Regime::Lower));
    assert!(regimes[..first_lower].iter().all(|r| *r == Regime::Upper));
}

#[test]
fn test_super_trend_presets_are_independent() {
    let bars = common::random_walk(300, 8);
    let alone = super_trend_values(&bars, 20, 5.0).unwrap();
    // 与其它参数组交替运行，不共享状态
    let mut a = SuperTrend::new(10, 2.0).unwrap();
    let mut b = SuperTrend::new(20, 5.0).unwrap();
    let interleaved: Vec<Option<f64>> = bars
        .iter()
        .map(|bar| {
            a.next(bar);
            b.next(bar).map(|p| p.value)
        })
        .collect();
    assert_eq!(alone, interleaved);
}
