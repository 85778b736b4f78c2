use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tubely_server::{
    AppState, Config,
    db::{PgVideoStore, db_migrate},
    routes::create_router,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::load()?;
    let addr = config.server_addr()?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;
    db_migrate(&pool).await?;

    let state = AppState::new(config, Arc::new(PgVideoStore::new(pool)));
    state.assets.ensure_root().await?;
    info!(assets_root = %state.assets.root().display(), "assets directory ready");

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
