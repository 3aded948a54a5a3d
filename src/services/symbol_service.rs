//! 股票代码规范化服务
//!
//! 提供用户输入的清洗、市场分类和自动补全参考列表
//!
//! ## 主要功能
//! - 代码规范化：去空白、转大写、按首次出现顺序去重
//! - 市场分类：按交易所后缀推导 NSE/BSE/US/UNKNOWN
//! - 后缀处理：展示/新闻查询用裸代码，行情查询按数据源约定改写
//! - 参考列表：读取内置代码文件供前端自动补全

use std::fs;
use std::path::Path;

use crate::error::ServiceError;
use crate::models::{Market, SymbolsInput};

// NSE 后缀
const SUFFIX_NSE: &str = ".NS";
// BSE 后缀（.BSE 为 Alpha Vantage 约定，.BO 为 Yahoo 约定）
const SUFFIX_BSE: &str = ".BSE";
const SUFFIX_BO: &str = ".BO";

/// 规范化用户输入的股票代码
///
/// 兼容逗号分隔字符串和字符串数组两种写法，数组元素内的逗号同样展开。
/// 清洗后为空时返回校验错误，终止整个请求。
///
/// # 参数
/// - input: 请求体中的 symbols 字段，缺省视为空输入
pub fn normalize_symbols(input: Option<&SymbolsInput>) -> Result<Vec<String>, ServiceError> {
    let tokens: Vec<&str> = match input {
        None => Vec::new(),
        Some(SymbolsInput::Single(s)) => s.split(',').collect(),
        Some(SymbolsInput::Multiple(list)) => {
            list.iter().flat_map(|s| s.split(',')).collect()
        }
    };

    let mut symbols: Vec<String> = Vec::new();
    for token in tokens {
        let symbol = token.trim().to_uppercase();
        if symbol.is_empty() || symbols.contains(&symbol) {
            continue;
        }
        symbols.push(symbol);
    }

    if symbols.is_empty() {
        return Err(ServiceError::validation("No symbols provided"));
    }

    Ok(symbols)
}

/// 按后缀推导市场标签
///
/// 仅为展示提示，不校验代码是否真实存在；
/// 无后缀的裸代码默认归为美股
pub fn classify_market(symbol: &str) -> Market {
    if symbol.ends_with(SUFFIX_NSE) {
        Market::Nse
    } else if symbol.ends_with(SUFFIX_BSE) || symbol.ends_with(SUFFIX_BO) {
        Market::Bse
    } else if symbol.contains('.') {
        Market::Unknown
    } else {
        Market::Us
    }
}

/// 去掉已识别的交易所后缀
///
/// 新闻接口按裸代码查询，展示时同样使用裸代码
pub fn base_symbol(symbol: &str) -> &str {
    for suffix in [SUFFIX_NSE, SUFFIX_BSE, SUFFIX_BO] {
        if let Some(stripped) = symbol.strip_suffix(suffix) {
            return stripped;
        }
    }
    symbol
}

/// 按行情数据源的后缀约定改写代码
///
/// Alpha Vantage 用 .BSE 标识孟买交易所，用户习惯的 .BO 写法需要改写；
/// 其余代码原样透传
pub fn provider_symbol(symbol: &str) -> String {
    match symbol.strip_suffix(SUFFIX_BO) {
        Some(base) => format!("{}{}", base, SUFFIX_BSE),
        None => symbol.to_string(),
    }
}

/// 读取自动补全参考列表
///
/// 文件格式：首行为表头，之后每行一个代码
pub fn load_symbol_list<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(parse_symbol_lines(&content))
}

/// 解析参考文件内容：跳过表头，去空白，转大写
pub fn parse_symbol_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .skip(1)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_uppercase)
        .collect()
}

// ==================== 测试模块 ====================
