//! 股票洞察后端服务
//!
//! 接收一批股票代码，聚合外部数据源返回每只股票的当前价、
//! 52周高低点及偏离幅度、最新新闻和大宗交易记录（预留）
//! 数据来源：Alpha Vantage

mod config;   // 配置加载
mod error;    // 错误分类
mod handlers; // HTTP 请求处理器
mod models;   // 数据模型定义
mod services; // 业务逻辑服务

use std::path::PathBuf;

use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use crate::config::AppConfig;
use crate::services::provider::ProviderClient;

/// 跨请求共享的应用状态
///
/// 数据源凭证和超时在启动时注入客户端，请求处理期间只读
pub struct AppState {
    pub provider: ProviderClient,
    pub symbols_file: PathBuf,
}

/// 应用程序入口
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 初始化日志系统，默认日志级别为 info
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::load();

    if config.api.provider_api_key.trim().is_empty() {
        log::warn!("未设置 ALPHAVANTAGE_API_KEY，行情调用将返回配置错误");
    }

    let provider = ProviderClient::new(&config.api)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    let state = web::Data::new(AppState {
        provider,
        symbols_file: PathBuf::from(&config.data.symbols_file),
    });

    log::info!("启动股票洞察后端服务，监听 {}", config.bind_addr());

    let bind_addr = config.bind_addr();
    let workers = config.server.workers;

    // 创建并启动 HTTP 服务器
    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default()) // 添加请求日志中间件
            .app_data(state.clone())
            .configure(handlers::config) // 配置路由
    })
    .bind(bind_addr)?;

    if workers > 0 {
        server = server.workers(workers);
    }

    server.run().await
}
