//! 股票洞察数据模型
//!
//! 定义聚合结果相关的数据结构，对外 JSON 字段统一使用 camelCase

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 市场标签
///
/// 由股票代码后缀推导（.NS → NSE，.BSE/.BO → BSE），
/// 仅用于展示和数据源分支选择，不做权威校验
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Market {
    /// 印度国家证券交易所
    Nse,
    /// 孟买证券交易所
    Bse,
    /// 美股
    Us,
    /// 无法识别的后缀
    Unknown,
}

/// 单条新闻
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    /// 标题
    pub title: String,
    /// 来源媒体
    pub source: String,
    /// 发布时间（UTC）
    pub published_at: DateTime<Utc>,
    /// 原文链接（部分来源不提供）
    pub url: Option<String>,
}

/// 大宗交易记录
///
/// 基线实现中数据源为空桩，该结构保留给后续接入真实数据源
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeal {
    /// 交易日期
    pub date: String,
    /// 买方
    pub buyer: String,
    /// 卖方
    pub seller: String,
    /// 成交数量
    pub quantity: u64,
    /// 成交价格
    pub price: f64,
    /// 交易所
    pub exchange: String,
}

/// 单只股票的聚合结果
///
/// error 有值时价格字段均为 null；新闻和大宗交易各自独立获取，
/// 即使价格获取失败也保留已取到的内容
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockInsight {
    /// 规范化后的股票代码（保留交易所后缀）
    pub symbol: String,
    /// 市场标签
    pub market: Market,
    /// 当前价格（最近交易日收盘价）
    pub current_price: Option<f64>,
    /// 52周最高价
    pub high52: Option<f64>,
    /// 52周最低价
    pub low52: Option<f64>,
    /// 相对52周最高价的涨跌幅（百分比，满精度）
    pub pct_from_high: Option<f64>,
    /// 相对52周最低价的涨跌幅（百分比，满精度）
    pub pct_from_low: Option<f64>,
    /// 最新新闻，最多 3 条，按发布时间倒序
    pub latest_news: Vec<NewsItem>,
    /// 大宗交易记录
    pub bulk_deals: Vec<BulkDeal>,
    /// 价格数据获取失败时的错误信息
    pub error: Option<String>,
}
