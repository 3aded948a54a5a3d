pub mod health;
pub mod insights;
pub mod symbols;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::config)
        .configure(insights::config)
        .configure(symbols::config);
}
