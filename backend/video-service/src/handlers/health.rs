/// Liveness and database readiness probe
use actix_web::{get, web, HttpResponse};
use crate::SERVICE_NAME;
use sqlx::PgPool;

async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    let mut conn = db_pool::acquire_with_metrics(pool, SERVICE_NAME).await?;
    sqlx::query("SELECT 1").execute(&mut *conn).await?;
    Ok(())
}

/// GET /health
#[get("/health")]
async fn health(pool: web::Data<PgPool>) -> HttpResponse {
    match ping(&pool).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": SERVICE_NAME,
            "version": env!("CARGO_PKG_VERSION"),
        })),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "status": "unhealthy",
                "error": "database unavailable",
                "service": SERVICE_NAME,
            }))
        }
    }
}
