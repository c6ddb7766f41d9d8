#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use rust_quant_dashboard::Bar;

pub fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 2).unwrap()
}

/// Bars with the given closes, `high = close + spread`, `low = close - spread`.
pub fn bars_from_closes(closes: &[f64], spread: f64) -> Vec<Bar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| Bar {
            timestamp: start_date() + Duration::days(i as i64),
            open: c,
            high: c + spread,
            low: c - spread,
            close: c,
            volume: 10_000.0,
        })
        .collect()
}

/// Deterministic random walk, always strictly positive.
pub fn random_walk(n: usize, seed: u64) -> Vec<Bar> {
    let mut state = seed;
    let mut next = move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((state >> 11) as f64) / ((1u64 << 53) as f64)
    };
    let mut close = 100.0;
    (0..n)
        .map(|i| {
            let open = close;
            close = (close * (1.0 + (next() - 0.5) * 0.04)).max(1.0);
            let high = open.max(close) * (1.0 + next() * 0.01);
            let low = open.min(close) * (1.0 - next() * 0.01);
            Bar {
                timestamp: start_date() + Duration::days(i as i64),
                open,
                high,
                low,
                close,
                volume: 1_000.0 + next() * 1_000.0,
            }
        })
        .collect()
}
