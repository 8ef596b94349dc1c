/// Video Service Library
///
/// REST backend for users, the videos they publish and the comments left on
/// those videos.
///
/// # Modules
///
/// - `handlers`: HTTP endpoints grouped by resource
/// - `validation`: per-route input schemas and extractor configuration
/// - `db`: repository functions, one statement each
/// - `models`: rows and their relation-carrying detail views
/// - `seed`: synthetic data generation for the `seed` binary
/// - `error`: error categories and their HTTP mapping
/// - `config`: configuration management
/// - `metrics`: Prometheus endpoint
/// - `telemetry`: tracing subscriber setup
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod seed;
pub mod telemetry;
pub mod validation;

pub use config::Config;
pub use error::{AppError, Result};

/// Name used for metric labels and health responses
pub const SERVICE_NAME: &str = "video-service";
