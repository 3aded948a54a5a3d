//! 洞察聚合服务
//!
//! 对每只股票并发发起行情、新闻、大宗交易三路获取，合并为一条
//! 聚合记录并计算相对52周高低点的涨跌幅。批量请求对所有股票
//! 并发展开，单只股票的数据源失败不影响同批其他股票。

use futures::future::join_all;

use crate::models::StockInsight;
use crate::services::provider::ProviderClient;
use crate::services::{bulk_deal_service, symbol_service};

/// 构建单只股票的聚合记录
///
/// 三路子查询互相独立，并发执行后在此合并。行情失败时错误信息
/// 写入 error 字段、价格字段置空，新闻和大宗交易保留各自结果
pub async fn build_stock_insight(provider: &ProviderClient, symbol: &str) -> StockInsight {
    let (price, news, deals) = tokio::join!(
        provider.fetch_price_and_range(symbol),
        provider.fetch_news_for_symbol(symbol),
        bulk_deal_service::fetch_bulk_deals_for_symbol(symbol),
    );

    let market = symbol_service::classify_market(symbol);

    match price {
        Ok(range) => StockInsight {
            symbol: symbol.to_string(),
            market,
            current_price: Some(range.current_price),
            high52: Some(range.high52),
            low52: Some(range.low52),
            pct_from_high: pct_change(range.current_price, range.high52),
            pct_from_low: pct_change(range.current_price, range.low52),
            latest_news: news,
            bulk_deals: deals,
            error: None,
        },
        Err(e) => {
            log::warn!("[{}] 获取价格区间失败: {}", symbol, e);
            StockInsight {
                symbol: symbol.to_string(),
                market,
                current_price: None,
                high52: None,
                low52: None,
                pct_from_high: None,
                pct_from_low: None,
                latest_news: news,
                bulk_deals: deals,
                error: Some(e.to_string()),
            }
        }
    }
}

/// 并发构建整批股票的聚合记录，保持输入顺序
pub async fn build_stock_insights(
    provider: &ProviderClient,
    symbols: &[String],
) -> Vec<StockInsight> {
    join_all(symbols.iter().map(|s| build_stock_insight(provider, s))).await
}

/// 相对参考价的涨跌幅（百分比，满精度）
///
/// 参考价为零或任一输入非有限时无定义，返回 None
pub fn pct_change(current: f64, reference: f64) -> Option<f64> {
    if !current.is_finite() || !reference.is_finite() || reference == 0.0 {
        return None;
    }
    Some((current - reference) / reference * 100.0)
}

// ==================== 测试模块 ====================
