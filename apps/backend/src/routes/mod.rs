use actix_web::web;

use crate::error::AppError;
use crate::errors::ErrorCode;

pub mod health;
pub mod realtime;
pub mod series;

/// Register every route; shared by `main.rs` and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Malformed JSON bodies answer with a problem body like every other error.
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::bad_request(ErrorCode::BadRequest, err.to_string()).into()
    }));

    // Health check: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Series: /api/series/**
    cfg.service(web::scope("/api/series").configure(series::configure_routes));

    // Realtime: /ws
    cfg.service(web::scope("/ws").configure(realtime::configure_routes));
}
