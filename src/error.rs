//! 服务层错误分类
//!
//! 三类错误对应不同的 HTTP 状态与降级策略：
//! - Validation: 请求参数非法，整个请求以 400 终止
//! - Provider: 数据源调用失败，只写入对应股票的 error 字段，不影响同批其他股票
//! - Configuration: 缺少必要配置（如 API Key）

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// 请求参数校验失败
    #[error("{0}")]
    Validation(String),

    /// 行情/新闻数据源调用失败
    #[error("{0}")]
    Provider(String),

    /// 缺少必要配置
    #[error("{0}")]
    Configuration(String),
}

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}
