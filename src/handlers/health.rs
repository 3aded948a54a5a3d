use actix_web::{web, HttpResponse, Result};
use chrono::Utc;
use chrono_tz::Asia::Kolkata;
use serde_json::json;

/// 健康检查，时间戳按印度标准时间（IST）返回
pub async fn health_check() -> Result<HttpResponse> {
    let response = json!({
        "status": "ok",
        "timestamp": Utc::now().with_timezone(&Kolkata).to_rfc3339(),
    });
    Ok(HttpResponse::Ok().json(response))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}
