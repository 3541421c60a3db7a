use actix_web::{web, App, HttpServer};
use draft_backend::config::db::db_kind_from_env;
use draft_backend::config::draft::DraftConfig;
use draft_backend::config::server::ServerConfig;
use draft_backend::infra::state::build_state;
use draft_backend::middleware::cors::cors_middleware;
use draft_backend::middleware::request_trace::RequestTrace;
use draft_backend::middleware::trace_span::TraceSpan;
use draft_backend::routes;
use tracing::info;

mod telemetry;

fn exit_with(message: impl std::fmt::Display) -> ! {
    eprintln!("❌ {message}");
    std::process::exit(1);
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker env_file, or `set -a; . ./.env; set +a` locally).
    let server = ServerConfig::from_env().unwrap_or_else(|e| exit_with(e));
    let draft_config = DraftConfig::from_env().unwrap_or_else(|e| exit_with(e));
    let db_kind = db_kind_from_env().unwrap_or_else(|e| exit_with(e));

    let app_state = match build_state()
        .with_db(db_kind)
        .with_draft_config(draft_config)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => exit_with(format!("Failed to build application state: {e}")),
    };

    info!(
        host = %server.host,
        port = server.port,
        db_kind = %db_kind,
        turn_seconds = app_state.draft_config().turn_seconds,
        "draft backend starting"
    );

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((server.host.as_str(), server.port))?
    .run()
    .await
}
