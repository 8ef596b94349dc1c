use actix_cors::Cors;
use actix_web::middleware::{Logger, NormalizePath, TrailingSlash};
use actix_web::{web, App, HttpServer};
use db_pool::{create_pool, DbConfig};
use std::io;
use video_service::{db, handlers, telemetry, Config, SERVICE_NAME};

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut terminate =
            signal(SignalKind::terminate()).expect("Failed to install SIGTERM handler");

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = terminate.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    }
}

fn build_cors(config: &Config) -> Cors {
    let mut cors = Cors::default();
    for origin in config.cors.origins() {
        if origin == "*" {
            cors = cors.allow_any_origin();
        } else {
            cors = cors.allowed_origin(origin);
        }
    }
    cors.allow_any_method().allow_any_header().max_age(3600)
}

/// Video Service
///
/// REST API over users, videos and comments backed by PostgreSQL.
///
/// # Routes
///
/// - `/users/*` - Find, create, update, delete users
/// - `/videos/*` - Find, search, create, update, count views, delete videos
/// - `/comments/*` - Find, create, update, delete comments and reply trees
/// - `/health`, `/metrics` - Probes and Prometheus metrics
#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {:#}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting {} v{}", SERVICE_NAME, env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    let mut db_cfg = DbConfig::from_env(SERVICE_NAME);
    if db_cfg.database_url.is_empty() {
        db_cfg.database_url = config.database.url.clone();
    }

    db_cfg.log_config();
    let db_pool = match create_pool(db_cfg).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Database pool creation failed: {:#}", e);
            eprintln!("ERROR: Failed to create database pool: {}", e);
            std::process::exit(1);
        }
    };

    if config.database.run_migrations {
        db::run_migrations(&db_pool).await.map_err(|e| {
            io::Error::new(
                io::ErrorKind::Other,
                format!("Failed to run database migrations: {e}"),
            )
        })?;
        tracing::info!("Database migrations applied");
    }

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    let pool_data = web::Data::new(db_pool.clone());
    let http_config = config.clone();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(pool_data.clone())
            .wrap(NormalizePath::new(TrailingSlash::Trim))
            .wrap(build_cors(&http_config))
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(handlers::configure)
    })
    .bind(&bind_address)?
    .shutdown_timeout(30)
    .disable_signals()
    .run();

    let server_handle = server.handle();
    tokio::spawn(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, stopping HTTP server");
        server_handle.stop(true).await;
    });

    let result = server.await;

    db_pool.close().await;
    tracing::info!("{} stopped", SERVICE_NAME);

    result
}
