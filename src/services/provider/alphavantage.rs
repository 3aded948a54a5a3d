//! Alpha Vantage 数据源客户端
//!
//! 提供两类独立的查询，均为幂等的只读调用：
//! - 日K线（TIME_SERIES_DAILY）：取近一年K线计算当前价和52周高低点
//! - 新闻舆情（NEWS_SENTIMENT）：取最新3条新闻
//!
//! 行情失败视为该股票级别的失败，错误信息写入结果记录；
//! 新闻失败只记录日志并降级为空列表，不阻塞价格数据

use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use reqwest::Client;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::ServiceError;
use crate::models::NewsItem;
use crate::services::symbol_service;

// 52周区间的回看天数
const LOOKBACK_DAYS: i64 = 365;
// 返回给前端的新闻条数上限
const MAX_NEWS_ITEMS: usize = 3;
// 新闻接口单次拉取条数
const NEWS_FETCH_LIMIT: &str = "50";
// 新闻发布时间格式，如 20260805T123000
const NEWS_TIME_FORMAT: &str = "%Y%m%dT%H%M%S";

/// 单只股票的价格区间数据
#[derive(Debug, Clone, Copy)]
pub struct PriceRange {
    /// 当前价格（最近交易日收盘价）
    pub current_price: f64,
    /// 52周最高价
    pub high52: f64,
    /// 52周最低价
    pub low52: f64,
}

/// 数据源客户端
///
/// 启动时构造一次，凭证和超时在构造时注入，请求间复用连接池
#[derive(Debug, Clone)]
pub struct ProviderClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl ProviderClient {
    /// 按配置构造客户端
    pub fn new(config: &ApiConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()?;

        let key = config.provider_api_key.trim();
        let api_key = if key.is_empty() {
            None
        } else {
            Some(key.to_string())
        };

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn api_key(&self) -> Result<&str, ServiceError> {
        match &self.api_key {
            Some(key) => Ok(key),
            None => Err(ServiceError::configuration(
                "未配置 ALPHAVANTAGE_API_KEY，无法调用行情数据源，\
                 请设置环境变量或在 config.json 的 api.provider_api_key 中填写",
            )),
        }
    }

    /// 获取单只股票的当前价和52周高低点
    ///
    /// 拉取近一年日K线：最近收盘价为当前价，区间内日最高价的最大值
    /// 为52周最高，日最低价的最小值为52周最低
    pub async fn fetch_price_and_range(&self, symbol: &str) -> Result<PriceRange, ServiceError> {
        let api_key = self.api_key()?;
        let provider_symbol = symbol_service::provider_symbol(symbol);
        let url = format!("{}/query", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("function", "TIME_SERIES_DAILY"),
                ("symbol", provider_symbol.as_str()),
                ("outputsize", "full"),
                ("apikey", api_key),
            ])
            .send()
            .await
            .map_err(|e| ServiceError::provider(format!("请求行情数据失败: {}", e)))?;

        if !response.status().is_success() {
            return Err(ServiceError::provider(format!(
                "行情接口返回状态 {}",
                response.status()
            )));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| ServiceError::provider(format!("解析行情响应失败: {}", e)))?;

        parse_daily_series(&payload, symbol, Utc::now().date_naive())
    }

    /// 获取单只股票的最新新闻
    ///
    /// 任何失败（含未配置凭证）都降级为空列表，新闻缺失不影响价格数据
    pub async fn fetch_news_for_symbol(&self, symbol: &str) -> Vec<NewsItem> {
        match self.try_fetch_news(symbol).await {
            Ok(items) => items,
            Err(e) => {
                log::warn!("[{}] 获取新闻失败，降级为空列表: {}", symbol, e);
                Vec::new()
            }
        }
    }

    async fn try_fetch_news(&self, symbol: &str) -> Result<Vec<NewsItem>, ServiceError> {
        let api_key = self.api_key()?;
        // 新闻接口按裸代码查询，不带交易所后缀
        let ticker = symbol_service::base_symbol(symbol);
        let url = format!("{}/query", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("function", "NEWS_SENTIMENT"),
                ("tickers", ticker),
                ("sort", "LATEST"),
                ("limit", NEWS_FETCH_LIMIT),
                ("apikey", api_key),
            ])
            .send()
            .await
            .map_err(|e| ServiceError::provider(format!("请求新闻数据失败: {}", e)))?;

        if !response.status().is_success() {
            return Err(ServiceError::provider(format!(
                "新闻接口返回状态 {}",
                response.status()
            )));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| ServiceError::provider(format!("解析新闻响应失败: {}", e)))?;

        Ok(select_latest_news(parse_news_feed(&payload)))
    }
}

/// 解析日K线响应，计算价格区间
///
/// 只统计 today 往前一年内的K线；提供方的错误载荷
/// （Error Message / Note / Information）转为数据源错误
pub(crate) fn parse_daily_series(
    payload: &Value,
    symbol: &str,
    today: NaiveDate,
) -> Result<PriceRange, ServiceError> {
    if let Some(msg) = payload.get("Error Message").and_then(|v| v.as_str()) {
        return Err(ServiceError::provider(format!(
            "数据源无法识别代码 {}: {}",
            symbol, msg
        )));
    }
    if let Some(note) = payload
        .get("Note")
        .or_else(|| payload.get("Information"))
        .and_then(|v| v.as_str())
    {
        return Err(ServiceError::provider(format!("数据源限流: {}", note)));
    }

    let series = payload
        .get("Time Series (Daily)")
        .and_then(|v| v.as_object())
        .ok_or_else(|| {
            ServiceError::provider(format!("代码 {} 的行情响应格式异常", symbol))
        })?;

    let cutoff = today - chrono::Duration::days(LOOKBACK_DAYS);
    let mut latest_close: Option<(NaiveDate, f64)> = None;
    let mut high52: Option<f64> = None;
    let mut low52: Option<f64> = None;

    for (date_str, candle) in series {
        let date = match NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
            Ok(d) => d,
            Err(_) => continue,
        };
        if date < cutoff || date > today {
            continue;
        }

        if let Some(close) = candle_field(candle, "4. close") {
            if latest_close.map_or(true, |(latest, _)| date > latest) {
                latest_close = Some((date, close));
            }
        }
        if let Some(high) = candle_field(candle, "2. high") {
            high52 = Some(high52.map_or(high, |h| f64::max(h, high)));
        }
        if let Some(low) = candle_field(candle, "3. low") {
            low52 = Some(low52.map_or(low, |l| f64::min(l, low)));
        }
    }

    match (latest_close, high52, low52) {
        (Some((_, current_price)), Some(high52), Some(low52)) => Ok(PriceRange {
            current_price,
            high52,
            low52,
        }),
        _ => Err(ServiceError::provider(format!(
            "代码 {} 近一年无有效K线数据",
            symbol
        ))),
    }
}

/// 读取K线字段（数据源以字符串形式返回数值）
fn candle_field(candle: &Value, key: &str) -> Option<f64> {
    candle
        .get(key)
        .and_then(|v| v.as_str())
        .and_then(|s| s.parse::<f64>().ok())
}

/// 将新闻响应的 feed 数组映射为内部新闻条目
///
/// 标题或发布时间缺失的条目直接跳过
pub(crate) fn parse_news_feed(payload: &Value) -> Vec<NewsItem> {
    let mut items = Vec::new();

    if let Some(feed) = payload.get("feed").and_then(|v| v.as_array()) {
        for entry in feed {
            let title = entry.get("title").and_then(|v| v.as_str()).unwrap_or("");
            if title.is_empty() {
                continue;
            }

            let published_at = match entry
                .get("time_published")
                .and_then(|v| v.as_str())
                .and_then(parse_news_time)
            {
                Some(t) => t,
                None => continue,
            };

            items.push(NewsItem {
                title: title.to_string(),
                source: entry
                    .get("source")
                    .and_then(|v| v.as_str())
                    .unwrap_or("")
                    .to_string(),
                published_at,
                url: entry.get("url").and_then(|v| v.as_str()).map(str::to_string),
            });
        }
    }

    items
}

/// 按发布时间倒序取最新的若干条
pub(crate) fn select_latest_news(mut items: Vec<NewsItem>) -> Vec<NewsItem> {
    items.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    items.truncate(MAX_NEWS_ITEMS);
    items
}

/// 解析新闻发布时间（UTC）
fn parse_news_time(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, NEWS_TIME_FORMAT)
        .ok()
        .map(|dt| Utc.from_utc_datetime(&dt))
}

// ==================== 测试模块 ====================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// 测试解析日K线并计算价格区间
    #[test]
    fn test_parse_daily_series() {
        println!("\n========== 测试日K线解析 ==========");
        let today = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        let payload = json!({
            "Meta Data": { "2. Symbol": "RELIANCE.NS" },
            "Time Series (Daily)": {
                "2026-08-05": {
                    "1. open": "2800.00", "2. high": "2850.00",
                    "3. low": "2790.00", "4. close": "2830.50", "5. volume": "1200000"
                },
                "2026-05-11": {
                    "1. open": "2980.00", "2. high": "3050.00",
                    "3. low": "2940.00", "4. close": "3010.00", "5. volume": "900000"
                },
                "2025-09-01": {
                    "1. open": "2150.00", "2. high": "2200.00",
                    "3. low": "2100.00", "4. close": "2180.00", "5. volume": "1500000"
                },
                // 超出一年回看窗口，应被忽略
                "2024-01-02": {
                    "1. open": "5000.00", "2. high": "9999.00",
                    "3. low": "1.00", "4. close": "5000.00", "5. volume": "100"
                }
            }
        });

        let range = parse_daily_series(&payload, "RELIANCE.NS", today).unwrap();
        println!("  当前价: {}", range.current_price);
        println!("  52周最高: {}", range.high52);
        println!("  52周最低: {}", range.low52);

        assert_eq!(range.current_price, 2830.50);
        assert_eq!(range.high52, 3050.00);
        assert_eq!(range.low52, 2100.00);
        println!("✅ 日K线解析测试通过！");
    }

    /// 测试数据源错误载荷
    #[test]
    fn test_parse_daily_series_error_payload() {
        println!("\n========== 测试数据源错误载荷 ==========");
        let today = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();

        let bad_symbol = json!({ "Error Message": "Invalid API call" });
        let err = parse_daily_series(&bad_symbol, "NOSUCH", today).unwrap_err();
        println!("  无效代码: {}", err);
        assert!(matches!(err, ServiceError::Provider(_)));

        let rate_limited = json!({ "Note": "API call frequency exceeded" });
        let err = parse_daily_series(&rate_limited, "TCS.NS", today).unwrap_err();
        println!("  限流: {}", err);
        assert!(matches!(err, ServiceError::Provider(_)));

        let bad_shape = json!({ "unexpected": true });
        let err = parse_daily_series(&bad_shape, "TCS.NS", today).unwrap_err();
        println!("  格式异常: {}", err);
        assert!(matches!(err, ServiceError::Provider(_)));
        println!("✅ 错误载荷测试通过！");
    }

    /// 测试一年窗口内无数据
    #[test]
    fn test_parse_daily_series_empty_window() {
        println!("\n========== 测试一年窗口内无数据 ==========");
        let today = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        let payload = json!({
            "Time Series (Daily)": {
                "2023-01-02": {
                    "1. open": "100.00", "2. high": "110.00",
                    "3. low": "90.00", "4. close": "105.00", "5. volume": "100"
                }
            }
        });

        let result = parse_daily_series(&payload, "OLD.NS", today);
        assert!(result.is_err());
        println!("  错误信息: {}", result.unwrap_err());
        println!("✅ 空窗口测试通过！");
    }

    /// 测试新闻 feed 映射
    #[test]
    fn test_parse_news_feed() {
        println!("\n========== 测试新闻 feed 映射 ==========");
        let payload = json!({
            "items": "4",
            "feed": [
                {
                    "title": "Quarterly results beat estimates",
                    "source": "Mint",
                    "time_published": "20260804T063000",
                    "url": "https://example.com/a"
                },
                {
                    "title": "New refinery capacity announced",
                    "source": "Reuters",
                    "time_published": "20260805T120000"
                    // 无 url，映射为 null
                },
                {
                    "title": "",
                    "source": "Spam",
                    "time_published": "20260805T130000"
                },
                {
                    "title": "Bad timestamp entry",
                    "source": "Somewhere",
                    "time_published": "not-a-time"
                }
            ]
        });

        let items = parse_news_feed(&payload);
        for item in &items {
            println!("  [{}] {} ({})", item.published_at, item.title, item.source);
        }

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Quarterly results beat estimates");
        assert_eq!(items[0].url.as_deref(), Some("https://example.com/a"));
        assert_eq!(items[1].source, "Reuters");
        assert!(items[1].url.is_none());
        println!("✅ 新闻 feed 映射测试通过！");
    }

    /// 测试最新新闻筛选：倒序排序并截断到3条
    #[test]
    fn test_select_latest_news() {
        println!("\n========== 测试最新新闻筛选 ==========");
        let item = |title: &str, time: &str| NewsItem {
            title: title.to_string(),
            source: "Test".to_string(),
            published_at: parse_news_time(time).unwrap(),
            url: None,
        };

        let items = vec![
            item("three", "20260803T090000"),
            item("one", "20260805T090000"),
            item("five", "20260801T090000"),
            item("two", "20260804T090000"),
            item("four", "20260802T090000"),
        ];

        let latest = select_latest_news(items);
        let titles: Vec<&str> = latest.iter().map(|i| i.title.as_str()).collect();
        println!("  筛选结果: {:?}", titles);

        assert_eq!(titles, vec!["one", "two", "three"]);
        assert!(latest[0].published_at > latest[1].published_at);
        assert!(latest[1].published_at > latest[2].published_at);
        println!("✅ 最新新闻筛选测试通过！");
    }

    /// 测试新闻发布时间解析
    #[test]
    fn test_parse_news_time() {
        println!("\n========== 测试新闻发布时间解析 ==========");
        let parsed = parse_news_time("20260805T123000").unwrap();
        println!("  解析结果: {}", parsed);
        assert_eq!(parsed.to_rfc3339(), "2026-08-05T12:30:00+00:00");
        assert!(parse_news_time("2026-08-05 12:30").is_none());
        println!("✅ 发布时间解析测试通过！");
    }
}
