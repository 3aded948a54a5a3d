//! 请求参数模型

use serde::Deserialize;

/// symbols 字段兼容两种写法：逗号分隔的字符串，或字符串数组
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SymbolsInput {
    Single(String),
    Multiple(Vec<String>),
}

/// POST /insights 请求体
#[derive(Debug, Deserialize)]
pub struct InsightsRequest {
    /// 股票代码列表，缺省视为空输入
    #[serde(default)]
    pub symbols: Option<SymbolsInput>,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 测试 symbols 字段的两种写法
    #[test]
    fn test_symbols_input_both_forms() {
        println!("\n========== 测试请求体兼容两种 symbols 写法 ==========");

        let single: InsightsRequest =
            serde_json::from_str(r#"{"symbols": "TCS.NS, INFY.NS"}"#).unwrap();
        match single.symbols {
            Some(SymbolsInput::Single(s)) => {
                println!("  字符串写法: {}", s);
                assert_eq!(s, "TCS.NS, INFY.NS");
            }
            other => panic!("期望字符串写法，实际为 {:?}", other),
        }

        let multiple: InsightsRequest =
            serde_json::from_str(r#"{"symbols": ["TCS.NS", "INFY.NS"]}"#).unwrap();
        match multiple.symbols {
            Some(SymbolsInput::Multiple(list)) => {
                println!("  数组写法: {:?}", list);
                assert_eq!(list.len(), 2);
            }
            other => panic!("期望数组写法，实际为 {:?}", other),
        }
        println!("✅ 请求体解析测试通过！");
    }

    /// 测试缺省 symbols 字段
    #[test]
    fn test_symbols_input_missing() {
        println!("\n========== 测试缺省 symbols 字段 ==========");
        let request: InsightsRequest = serde_json::from_str("{}").unwrap();
        assert!(request.symbols.is_none());
        println!("✅ 缺省字段测试通过！");
    }
}
