use actix_web::{web, HttpResponse};
use sea_orm::ConnectionTrait;
use tracing::warn;

use crate::error::AppError;
use crate::state::app_state::AppState;

/// Liveness probe; a failing store ping is logged but does not fail it.
async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = app_state.db();
    let ping = db
        .execute_unprepared("SELECT 1")
        .await;
    if let Err(e) = ping {
        warn!(error = %e, "health check database ping failed");
    }
    Ok(HttpResponse::Ok().body("ok"))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(health));
}
