use actix_web::{web, HttpResponse, Result};

use crate::error::ServiceError;
use crate::models::{ErrorResponse, InsightsRequest, InsightsResponse};
use crate::services::{insight_service, symbol_service};
use crate::AppState;

/// 批量获取股票聚合数据
///
/// 请求体手动解析：格式非法按约定返回 500 通用错误，
/// 具体原因只记录在服务端日志，不回传给客户端
pub async fn get_stock_insights(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse> {
    let request: InsightsRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            log::error!("解析 /insights 请求体失败: {}", e);
            return Ok(HttpResponse::InternalServerError()
                .json(ErrorResponse::new("Internal server error")));
        }
    };

    let symbols = match symbol_service::normalize_symbols(request.symbols.as_ref()) {
        Ok(symbols) => symbols,
        Err(e @ ServiceError::Validation(_)) => {
            return Ok(HttpResponse::BadRequest().json(ErrorResponse::new(e.to_string())));
        }
        Err(e) => {
            log::error!("规范化股票代码失败: {}", e);
            return Ok(HttpResponse::InternalServerError()
                .json(ErrorResponse::new("Internal server error")));
        }
    };

    log::info!("聚合 {} 只股票: {:?}", symbols.len(), symbols);
    let results = insight_service::build_stock_insights(&state.provider, &symbols).await;

    Ok(HttpResponse::Ok().json(InsightsResponse { results }))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/insights", web::post().to(get_stock_insights));
}

// ==================== 测试模块 ====================
