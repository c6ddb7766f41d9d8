//! 统一错误类型定义

pub mod app_error;
pub mod indicator_error;

pub use app_error::{AppError, Result};
pub use indicator_error::IndicatorError;
