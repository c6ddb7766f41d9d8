use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use chrono::Utc;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{error, info, warn};

use super::historical_store::HistoricalStore;
use super::history_source::HistorySource;
use crate::app_config::shutdown::ShutdownSignal;
use crate::trading::cache::LivePriceCacheProvider;
use crate::trading::indicator::{compute_series, IndicatorConfig};
use crate::trading::model::{HistoricalRow, Series};
use crate::trading::utils::format_ticker;

/// 批处理结果汇总
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    pub total: usize,
    pub succeeded: usize,
    pub skipped_empty: usize,
    pub cancelled: usize,
    pub rows_written: usize,
    /// `(ticker, reason)` for every ticker whose computation failed.
    pub failed: Vec<(String, String)>,
}

#[derive(Debug)]
enum TickerOutcome {
    Saved(usize),
    Empty,
    Failed(String),
    Cancelled,
}

/// 指标批处理任务：拉取历史K线 -> 计算指标 -> upsert 存储
pub struct IndicatorJob {
    config: Arc<IndicatorConfig>,
    concurrency: usize,
    delay: Duration,
    price_cache: Option<Arc<dyn LivePriceCacheProvider>>,
}

impl IndicatorJob {
    pub fn new(config: IndicatorConfig) -> Self {
        Self {
            config: Arc::new(config),
            concurrency: 1,
            delay: Duration::ZERO,
            price_cache: None,
        }
    }

    /// Number of tickers processed at the same time (at least 1).
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Pause after each ticker, to be gentle with upstream price APIs.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Seeds `cache` with the last close of every ticker that was saved.
    pub fn with_price_cache(mut self, cache: Arc<dyn LivePriceCacheProvider>) -> Self {
        self.price_cache = Some(cache);
        self
    }

    /// Processes every ticker. A failing ticker is logged and recorded in the
    /// report without stopping the others; once `shutdown` is triggered no new
    /// ticker is started.
    pub async fn run(
        &self,
        tickers: &[String],
        source: Arc<dyn HistorySource>,
        store: Arc<dyn HistoricalStore>,
        shutdown: &ShutdownSignal,
    ) -> BatchReport {
        info!("🚀 开始指标批处理，共 {} 个标的", tickers.len());

        let outcomes: Vec<(String, TickerOutcome)> = stream::iter(tickers.iter().cloned())
            .map(|ticker| {
                let source = Arc::clone(&source);
                let store = Arc::clone(&store);
                async move {
                    if shutdown.is_triggered() {
                        return (ticker, TickerOutcome::Cancelled);
                    }
                    let outcome = match self.process_ticker(&ticker, source, store).await {
                        Ok(Some(rows)) => TickerOutcome::Saved(rows),
                        Ok(None) => TickerOutcome::Empty,
                        Err(e) => TickerOutcome::Failed(format!("{:#}", e)),
                    };
                    if !self.delay.is_zero() {
                        tokio::time::sleep(self.delay).await;
                    }
                    (ticker, outcome)
                }
            })
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        let mut report = BatchReport {
            total: tickers.len(),
            ..BatchReport::default()
        };
        for (ticker, outcome) in outcomes {
            match outcome {
                TickerOutcome::Saved(rows) => {
                    report.succeeded += 1;
                    report.rows_written += rows;
                }
                TickerOutcome::Empty => report.skipped_empty += 1,
                TickerOutcome::Cancelled => report.cancelled += 1,
                TickerOutcome::Failed(reason) => {
                    error!("处理 {} 失败: {}", ticker, reason);
                    report.failed.push((ticker, reason));
                }
            }
        }
        report.failed.sort();

        info!(
            "✅ 批处理完成: 成功 {}/{}，空数据 {}，失败 {}，取消 {}",
            report.succeeded,
            report.total,
            report.skipped_empty,
            report.failed.len(),
            report.cancelled
        );
        report
    }

    /// `Ok(None)` when the source has no bars for the ticker.
    async fn process_ticker(
        &self,
        ticker: &str,
        source: Arc<dyn HistorySource>,
        store: Arc<dyn HistoricalStore>,
    ) -> anyhow::Result<Option<usize>> {
        let symbol = format_ticker(ticker);
        info!("Processing {} ({})", ticker, symbol);

        let bars = source.load(&symbol).await?;
        if bars.is_empty() {
            warn!("No data found for {}", ticker);
            return Ok(None);
        }

        let config = Arc::clone(&self.config);
        let owned_ticker = ticker.to_string();
        // 计算为纯CPU任务，放到阻塞线程池
        let rows = tokio::task::spawn_blocking(move || -> anyhow::Result<Vec<HistoricalRow>> {
            let series = Series::new(bars)?;
            let bundle = compute_series(&series, &config)?;
            Ok(HistoricalRow::from_bundle(&owned_ticker, &series, &bundle, &config))
        })
        .await
        .map_err(|e| anyhow!("indicator task aborted: {}", e))??;

        let last_close = rows.last().map(|row| row.close);
        let written = store.upsert(ticker, rows).await?;
        if let (Some(cache), Some(close)) = (&self.price_cache, last_close) {
            cache.set(ticker, close, Utc::now());
        }
        info!("{} 保存 {} 行", ticker, written);
        Ok(Some(written))
    }
}
