use hydra_chess::config::Config;
use hydra_chess::{build_router_with_timeouts, db};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hydra_chess=debug".into()),
        )
        .init();

    let config = Config::from_env();

    let pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");

    db::run_migrations(&pool).await.expect("Failed to run migrations");

    let (app, _state) = build_router_with_timeouts(
        pool,
        config.worker_channel_capacity,
        config.first_move_timeout_secs,
        config.disconnect_timeout_secs,
    )
    .await;

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting hydra-chess on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind");

    axum::serve(listener, app).await.expect("Server error");
}
