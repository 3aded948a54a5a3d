//! 大宗交易数据服务
//!
//! 基线实现为空桩：交易所的大宗/批量成交数据暂无可用数据源，
//! 接口形状保留为扩展点。接入真实数据源后，失败应与新闻一样
//! 吞掉并降级为空列表，价格数据始终是主要输出。

use crate::models::BulkDeal;

/// 获取单只股票的大宗交易记录
pub async fn fetch_bulk_deals_for_symbol(symbol: &str) -> Vec<BulkDeal> {
    log::debug!("[{}] 大宗交易数据源未接入，返回空列表", symbol);
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 测试空桩始终返回空列表
    #[tokio::test]
    async fn test_bulk_deals_stub_empty() {
        println!("\n========== 测试大宗交易空桩 ==========");
        let deals = fetch_bulk_deals_for_symbol("RELIANCE.NS").await;
        println!("  返回条数: {}", deals.len());
        assert!(deals.is_empty());
        println!("✅ 大宗交易空桩测试通过！");
    }
}
