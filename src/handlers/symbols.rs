use actix_web::{web, HttpResponse, Result};

use crate::models::SymbolsResponse;
use crate::services::symbol_service;
use crate::AppState;

/// 自动补全用的股票代码列表
///
/// 每次请求重新读取参考文件，文件不可读时返回 500 和空列表
pub async fn list_symbols(state: web::Data<AppState>) -> Result<HttpResponse> {
    match symbol_service::load_symbol_list(&state.symbols_file) {
        Ok(symbols) => Ok(HttpResponse::Ok().json(SymbolsResponse {
            symbols,
            error: None,
        })),
        Err(e) => {
            log::error!(
                "读取代码参考文件 {} 失败: {}",
                state.symbols_file.display(),
                e
            );
            Ok(HttpResponse::InternalServerError().json(SymbolsResponse {
                symbols: Vec::new(),
                error: Some("Failed to load symbol list".to_string()),
            }))
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/symbols", web::get().to(list_symbols));
}

// ==================== 测试模块 ====================
