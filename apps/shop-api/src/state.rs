//! Process-wide state built once at startup

use axum_helpers::JwtAuth;
use mongodb::{Client, Database};
use realtime::Broadcaster;

/// Shared application state.
///
/// Everything here is cheap to clone: the MongoDB client shares one
/// connection pool, the broadcaster one channel.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub mongo_client: Client,
    pub db: Database,
    pub auth: JwtAuth,
    pub broadcaster: Broadcaster,
}
