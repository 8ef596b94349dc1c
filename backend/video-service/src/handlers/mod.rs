/// HTTP request handlers
///
/// One module per resource group. Each handler validates its input, calls a
/// single repository function and answers `200 OK` with the JSON result;
/// failures propagate as [`crate::error::AppError`].
use crate::validation;
use actix_web::web;

pub mod comments;
pub mod health;
pub mod users;
pub mod videos;

/// Register extractor configs, probes and every resource scope
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(validation::json_config())
        .app_data(validation::path_config())
        .app_data(validation::query_config())
        .service(health::health)
        .route("/metrics", web::get().to(crate::metrics::serve_metrics))
        .service(web::scope("/users").configure(users::configure))
        .service(web::scope("/videos").configure(videos::configure))
        .service(web::scope("/comments").configure(comments::configure));
}
