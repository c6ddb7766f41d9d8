use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{error, info};

/// 批处理的协作式取消标志
///
/// Cloning shares the flag. Jobs poll [`ShutdownSignal::is_triggered`] between
/// units of work; nothing is interrupted mid-computation.
#[derive(Debug, Clone, Default)]
pub struct ShutdownSignal {
    flag: Arc<AtomicBool>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        if !self.flag.swap(true, Ordering::AcqRel) {
            info!("收到关闭信号，停止处理剩余任务");
        }
    }

    pub fn is_triggered(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    /// Triggers the signal on Ctrl+C.
    pub fn listen_ctrl_c(&self) {
        let signal = self.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => signal.trigger(),
                Err(e) => error!("监听 Ctrl+C 失败: {}", e),
            }
        });
    }
}
