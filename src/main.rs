use std::net::SocketAddr;

use synapse_api::{
    auth::rate_limit::spawn_cleanup_worker, config::Config, router, session::spawn_session_reaper,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "synapse_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Config::from_env()?;
    let addr = config.listen_addr();

    let state = AppState::new(config);
    state.store.ensure_data_dir().await?;
    tracing::info!(data_dir = %state.store.data_dir().display(), "Data directory ready");

    // Purges expired login rate limit windows every 5 min
    spawn_cleanup_worker(state.rate_limiter.clone());
    // Evicts sessions whose token expired without a logout
    spawn_session_reaper(state.sessions.clone());

    let app = router(state);

    tracing::info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    // Client IP is needed for login rate limiting
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
