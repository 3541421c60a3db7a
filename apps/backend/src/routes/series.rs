use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::services::series::CreateSeriesRequest;
use crate::state::app_state::AppState;

async fn create_series(
    body: web::Json<CreateSeriesRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let created = app_state
        .series()
        .create_series(app_state.db(), body.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(created))
}

async fn get_series(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let series_id = path.into_inner();
    let detail = app_state
        .series()
        .get_series_detail(app_state.db(), &series_id)
        .await?;
    Ok(HttpResponse::Ok().json(detail))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create_series))
        .route("/{series_id}", web::get().to(get_series));
}
