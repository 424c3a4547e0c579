use actix_web::{web, HttpResponse};
use migration::count_applied_migrations;
use sea_orm::{ConnectionTrait, Statement};
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::db::require_db;
use crate::error::AppError;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    app_version: &'static str,
    db: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    db_error: Option<String>,
    migrations_applied: Option<usize>,
    time: String,
}

async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let time = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    let (db, db_error, migrations_applied) = match require_db(&app_state) {
        Ok(conn) => {
            let probe = conn
                .query_one(Statement::from_string(
                    conn.get_database_backend(),
                    "SELECT 1".to_string(),
                ))
                .await;
            match probe {
                Ok(_) => ("ok", None, count_applied_migrations(conn).await.ok()),
                Err(e) => ("error", Some(format!("DB query failed: {e}")), None),
            }
        }
        Err(e) => ("error", Some(e.to_string()), None),
    };

    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        app_version: env!("CARGO_PKG_VERSION"),
        db,
        db_error,
        migrations_applied,
        time,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}
