use actix_web::{web, App, HttpServer};
use bluff_backend::config::db::DbKind;
use bluff_backend::config::engine::EngineConfig;
use bluff_backend::infra::state::build_state;
use bluff_backend::middleware::RequestTrace;
use bluff_backend::routes;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = match std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
    {
        Ok(port) => port,
        Err(_) => {
            error!("BACKEND_PORT must be a valid port number");
            std::process::exit(1);
        }
    };

    let (db_kind, engine) = match DbKind::from_env().and_then(|kind| {
        let engine = EngineConfig::from_env()?;
        Ok((kind, engine))
    }) {
        Ok(pair) => pair,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let app_state = match build_state()
        .with_db(db_kind)
        .with_engine(engine)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    info!(
        %host,
        port,
        ?db_kind,
        answer_seconds = engine.answer_seconds,
        vote_seconds = engine.vote_seconds,
        force_advance = ?engine.force_advance,
        "starting bluff backend"
    );

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
