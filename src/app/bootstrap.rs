use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use clap::Parser;
use tracing::{info, warn};

use crate::app_config::shutdown::ShutdownSignal;
use crate::trading::indicator::IndicatorConfig;
use crate::trading::task::{
    BatchReport, IndicatorJob, JsonFileHistoricalStore, JsonFileHistorySource,
};
use crate::trading::utils::collect_tickers;

/// 指标批处理命令行参数
#[derive(Debug, Clone, Parser)]
#[command(name = "rust_quant_dashboard", about = "Compute daily indicators for a ticker list")]
pub struct BatchArgs {
    /// Directory holding `<symbol>.json` daily bar histories
    #[arg(long, env = "HISTORY_DIR", default_value = "data/history")]
    pub history_dir: PathBuf,

    /// Directory receiving `<ticker>.json` enriched rows
    #[arg(long, env = "OUTPUT_DIR", default_value = "data/historical_data")]
    pub output_dir: PathBuf,

    /// Watchlist tickers, comma separated
    #[arg(long, env = "WATCHLIST", value_delimiter = ',')]
    pub tickers: Vec<String>,

    /// Portfolio tickers, comma separated
    #[arg(long, env = "PORTFOLIO", value_delimiter = ',')]
    pub portfolio: Vec<String>,

    /// Optional JSON file overriding indicator parameters
    #[arg(long, env = "INDICATOR_CONFIG")]
    pub config: Option<PathBuf>,

    #[arg(long, env = "BATCH_CONCURRENCY", default_value_t = 4)]
    pub concurrency: usize,

    /// Pause after each ticker, in milliseconds
    #[arg(long, env = "BATCH_DELAY_MS", default_value_t = 0)]
    pub delay_ms: u64,
}

/// 运行一次批处理
pub async fn run_batch(args: BatchArgs, shutdown: &ShutdownSignal) -> anyhow::Result<BatchReport> {
    let config = match &args.config {
        Some(path) => IndicatorConfig::from_json_file(path)?,
        None => IndicatorConfig::default(),
    };

    let tickers = collect_tickers(
        args.tickers.iter().map(String::as_str),
        args.portfolio.iter().map(String::as_str),
    );
    if tickers.is_empty() {
        warn!("No tickers found. Add stocks to Watchlist or Portfolio first.");
        return Err(anyhow!("no tickers configured"));
    }
    info!("Found {} unique tickers.", tickers.len());

    let source = Arc::new(JsonFileHistorySource::new(&args.history_dir));
    let store = Arc::new(JsonFileHistoricalStore::new(&args.output_dir));
    let job = IndicatorJob::new(config)
        .with_concurrency(args.concurrency)
        .with_delay(Duration::from_millis(args.delay_ms));

    Ok(job.run(&tickers, source, store, shutdown).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_tickers() {
        let args = BatchArgs::try_parse_from([
            "rust_quant_dashboard",
            "--tickers",
            "infy,tcs",
            "--portfolio",
            "ITC",
            "--concurrency",
            "2",
        ])
        .unwrap();
        assert_eq!(args.tickers, vec!["infy", "tcs"]);
        assert_eq!(args.portfolio, vec!["ITC"]);
        assert_eq!(args.concurrency, 2);
    }

    #[tokio::test]
    async fn empty_ticker_list_is_an_error() {
        let args = BatchArgs::try_parse_from(["rust_quant_dashboard"]).unwrap();
        let args = BatchArgs {
            tickers: Vec::new(),
            portfolio: Vec::new(),
            ..args
        };
        assert!(run_batch(args, &ShutdownSignal::new()).await.is_err());
    }
}
