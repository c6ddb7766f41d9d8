mod common;

use approx::assert_relative_eq;
use rust_quant_dashboard::trading::indicator::{ema, sma, sma_latest};

#[test]
fn test_sma_defined_count() {
    let closes: Vec<f64> = common::random_walk(120, 7).iter().map(|b| b.close).collect();
    for period in [1, 2, 14, 50, 119, 120, 121, 200] {
        let values = sma(&closes, period).unwrap();
        assert_eq!(values.len(), closes.len());
        let defined = values.iter().filter(|v| v.is_some()).count();
        assert_eq!(defined, (closes.len() + 1).saturating_sub(period), "period {}", period);
        // 有值的位置都在尾部
        if let Some(first) = values.iter().position(Option::is_some) {
            assert_eq!(first, period - 1);
        }
    }
}

#[test]
fn test_sma_latest_matches_series_tail() {
    let closes: Vec<f64> = common::random_walk(260, 11).iter().map(|b| b.close).collect();
    for period in [50, 200] {
        let series_last = sma(&closes, period).unwrap().last().copied().flatten().unwrap();
        let scalar = sma_latest(&closes, period).unwrap().unwrap();
        assert_relative_eq!(series_last, scalar, epsilon = 1e-9);
    }
    assert_eq!(sma_latest(&closes[..10], 50).unwrap(), None);
}

#[test]
fn test_ema_defined_everywhere() {
    let closes: Vec<f64> = common::random_walk(300, 3).iter().map(|b| b.close).collect();
    let values = ema(&closes, 20).unwrap();
    assert!(values.iter().all(Option::is_some));
    assert_eq!(values[0], Some(closes[0]));
    // EMA 落在收盘价区间内
    let min = closes.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = closes.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    assert!(values.iter().flatten().all(|v| *v >= min - 1e-9 && *v <= max + 1e-9));
}
