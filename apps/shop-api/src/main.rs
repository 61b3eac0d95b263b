use axum_helpers::{JwtAuth, cors_from_env, server::create_production_app};
use core_config::tracing::{init_tracing, install_color_eyre};
use realtime::Broadcaster;
use shop_api::{
    api::{self, MongoRepositories},
    config::Config,
    state::AppState,
};
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to MongoDB at {}", config.mongodb.redacted_url());

    let mongo_client =
        database::mongodb::connect_from_config_with_retry(&config.mongodb, None).await?;
    let db = mongo_client.database(config.mongodb.database());

    info!(
        "Successfully connected to MongoDB database: {}",
        config.mongodb.database()
    );

    let repositories = MongoRepositories::mongo(&db);
    repositories.init_indexes().await?;

    if let Some(seed) = &config.admin {
        repositories.user_service().seed_admin(seed).await?;
    }

    let cors = cors_from_env(&config.environment)?;
    let state = AppState {
        auth: JwtAuth::new(&config.jwt),
        broadcaster: Broadcaster::default(),
        config,
        mongo_client,
        db,
    };

    let app = repositories
        .app(&state.auth, &state.broadcaster, state.config.app, cors)
        .merge(api::health::router(state.mongo_client.clone()));

    info!("Starting Shop API with graceful shutdown (30s timeout)");

    let mongo_client = state.mongo_client.clone();

    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing MongoDB connections");
            mongo_client.shutdown().await;
            info!("MongoDB connection closed successfully");
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Shop API shutdown complete");
    Ok(())
}
