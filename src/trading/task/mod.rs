//! 批处理任务：历史数据来源、存储与指标计算

pub mod historical_store;
pub mod history_source;
pub mod indicator_job;

pub use historical_store::{HistoricalStore, InMemoryHistoricalStore, JsonFileHistoricalStore};
pub use history_source::{HistorySource, InMemoryHistorySource, JsonFileHistorySource};
pub use indicator_job::{BatchReport, IndicatorJob};
