//! API 响应模型
//!
//! 响应结构与前端约定保持一致：
//! - POST /insights 成功返回 { results: [...] }
//! - 校验失败/内部错误返回 { error: "..." }
//! - GET /symbols 返回 { symbols: [...] }，失败时附带 error 字段

use serde::{Deserialize, Serialize};

use super::StockInsight;

/// POST /insights 成功响应
#[derive(Debug, Serialize, Deserialize)]
pub struct InsightsResponse {
    /// 每只去重后的股票一条记录，保持输入的首次出现顺序
    pub results: Vec<StockInsight>,
}

/// 通用错误响应
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// 错误信息
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// GET /symbols 响应
#[derive(Debug, Serialize, Deserialize)]
pub struct SymbolsResponse {
    /// 可用于自动补全的股票代码列表（大写）
    pub symbols: Vec<String>,
    /// 参考文件读取失败时的错误信息
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
