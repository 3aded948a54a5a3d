//! 外部数据源客户端模块
//!
//! 对接 Alpha Vantage 的行情与新闻接口

pub mod alphavantage;

// 重新导出常用类型，保持对外接口一致
pub use alphavantage::{PriceRange, ProviderClient};
