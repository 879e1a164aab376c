use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Result;
use axum::{
    Extension, Router,
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::get,
};
use tokio::net::TcpListener;
use tourish::{
    domain::value_objects::storage::DESCRIPTION_CONTAINERS,
    infra::{
        db::postgres::postgres_connection::PgPoolSquad,
        storages::s3_blob_storage::{BlobStorageConfig, S3BlobStorage},
    },
};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

use crate::{
    auth::JwtSecret,
    axum_http::{default_routers, routers},
    config::config_model::DotEnvyConfig,
};

pub async fn start(config: Arc<DotEnvyConfig>, db_pool: Arc<PgPoolSquad>) -> Result<()> {
    let blob_storage = S3BlobStorage::connect(&BlobStorageConfig::new(
        config.blob_storage.endpoint.clone(),
        config.blob_storage.region.clone(),
        config.blob_storage.access_key_id.clone(),
        config.blob_storage.secret_access_key.clone(),
    ))
    .await?;

    for container in DESCRIPTION_CONTAINERS {
        blob_storage.ensure_container(container).await?;
    }
    info!("Blob containers are ready");

    let api = Router::new()
        .merge(routers::tourish_plans::routes(
            Arc::clone(&db_pool),
            Arc::new(blob_storage),
            config.listing.default_page_size,
        ))
        .merge(routers::interests::routes(Arc::clone(&db_pool)))
        .merge(routers::ratings::routes(Arc::clone(&db_pool)))
        .route("/health-check", get(default_routers::health_check));

    let app = Router::new()
        .fallback(default_routers::not_found)
        .nest("/api/v1", api)
        .layer(Extension(JwtSecret::new(&config.auth.jwt_secret)))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.backend_server.timeout,
        )))
        .layer(RequestBodyLimitLayer::new(
            (config.backend_server.body_limit * 1024 * 1024).try_into()?,
        ))
        .layer(
            CorsLayer::new()
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PATCH,
                    Method::PUT,
                    Method::DELETE,
                ])
                .allow_headers([AUTHORIZATION, CONTENT_TYPE])
                .allow_origin(Any),
        )
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.backend_server.port));
    let listener = TcpListener::bind(addr).await?;

    info!("Server is running on port {}", config.backend_server.port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = ?err, "Failed to install CTRL+C signal handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = ?err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received ctrl+C signal"),
        _ = terminate => info!("Received terminate signal"),
    }
}
