use thiserror::Error;

use super::IndicatorError;

pub type Result<T> = std::result::Result<T, AppError>;

/// 应用错误
#[derive(Error, Debug)]
pub enum AppError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    /// 指标计算错误
    #[error("指标错误: {0}")]
    Indicator(#[from] IndicatorError),
}
