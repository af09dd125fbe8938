use anyhow::Context;
use dotenvy::dotenv;
use tracing::{info, warn};
use vape::logging::{init_tracing, shutdown_tracer};
use vape::metrics::{init_metrics, metrics_app};
use vape::router::init_router;
use vape::state::init_app_state;
use vape_config::ServerConfig;
use vape_db::{init_db_pool, run_migrations};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let server_config = ServerConfig::from_env();

    if let Some(handle) = init_metrics() {
        let metrics_address = server_config.metrics_address.clone();
        tokio::spawn(async move {
            match tokio::net::TcpListener::bind(&metrics_address).await {
                Ok(listener) => {
                    info!("📈 Metrics available at http://{}/metrics", metrics_address);
                    if let Err(e) = axum::serve(listener, metrics_app(handle)).await {
                        warn!(error = %e, "Metrics server stopped");
                    }
                }
                Err(e) => warn!(error = %e, address = %metrics_address, "Cannot bind metrics server"),
            }
        });
    }

    let pool = init_db_pool().await?;
    run_migrations(&pool).await?;

    let state = init_app_state(pool);
    let app = init_router(state);

    let listener = tokio::net::TcpListener::bind(&server_config.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", server_config.bind_address))?;

    info!("🚀 Server running on http://{}", server_config.bind_address);
    info!("📚 Swagger UI available at http://{}/swagger-ui", server_config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    shutdown_tracer().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}
