use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, FmtSubscriber, Layer, Registry};

use crate::app_config::env::env_or_default;

/// Keeps the non-blocking file writers flushing; drop it only at exit.
pub struct LogGuards {
    _guards: Vec<WorkerGuard>,
}

// 设置日志
//
// APP_ENV=LOCAL 输出到控制台，其余环境写入 log_files/ 下按天滚动的 info/error 文件
pub fn setup_logging() -> anyhow::Result<LogGuards> {
    let app_env = env_or_default("APP_ENV", "LOCAL");

    if app_env == "LOCAL" {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_ansi(true)
            .with_target(false)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_level(true)
            .with_writer(std::io::stdout)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
        return Ok(LogGuards { _guards: Vec::new() });
    }

    let log_dir = env_or_default("LOG_DIR", "log_files");
    let info_file = RollingFileAppender::new(Rotation::DAILY, &log_dir, "info.log");
    let error_file = RollingFileAppender::new(Rotation::DAILY, &log_dir, "error.log");

    let (info_non_blocking, info_guard) = tracing_appender::non_blocking(info_file);
    let (error_non_blocking, error_guard) = tracing_appender::non_blocking(error_file);

    let subscriber = Registry::default()
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .with_level(true)
                .with_writer(info_non_blocking)
                .with_filter(EnvFilter::new("info")),
        )
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .with_level(true)
                .with_writer(error_non_blocking)
                .with_filter(EnvFilter::new("error")),
        );

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(LogGuards {
        _guards: vec![info_guard, error_guard],
    })
}
