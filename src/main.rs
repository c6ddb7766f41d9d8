use clap::Parser;
use dotenv::dotenv;
use tracing::{info, warn};

use rust_quant_dashboard::app::bootstrap::{run_batch, BatchArgs};
use rust_quant_dashboard::app_config::log::setup_logging;
use rust_quant_dashboard::app_config::shutdown::ShutdownSignal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    // 设置日志
    let _log_guards = setup_logging()?;

    let args = BatchArgs::parse();
    let shutdown = ShutdownSignal::new();
    // 捕捉Ctrl+C信号，剩余标的不再处理
    shutdown.listen_ctrl_c();

    let report = run_batch(args, &shutdown).await?;
    if report.cancelled > 0 {
        warn!("{} tickers skipped after shutdown", report.cancelled);
    }
    info!(
        "Batch Job Completed. Uploaded {}/{} tickers.",
        report.succeeded, report.total
    );
    Ok(())
}
