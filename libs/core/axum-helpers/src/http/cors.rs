use axum::http::{HeaderValue, Method, header};
use core_config::{ConfigError, Environment};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

pub const CORS_ORIGIN_VAR: &str = "CORS_ALLOWED_ORIGIN";

/// Creates a CORS layer for a fixed list of origins.
///
/// - Methods: GET, POST, PUT, PATCH, DELETE, OPTIONS
/// - Headers: Content-Type, Authorization, Accept
/// - Credentials allowed, 1 hour max age
pub fn create_cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}

/// Creates a permissive CORS layer for development.
///
/// Allows any origin - **DO NOT USE IN PRODUCTION**.
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}

/// Builds the CORS layer from `CORS_ALLOWED_ORIGIN` (comma-separated).
///
/// The variable is required in production. Development falls back to the
/// permissive layer when it is unset.
pub fn cors_from_env(environment: &Environment) -> Result<CorsLayer, ConfigError> {
    match std::env::var(CORS_ORIGIN_VAR) {
        Ok(raw) => {
            let origins = parse_origins(&raw)?;
            tracing::info!(origins = %raw, "CORS configured");
            Ok(create_cors_layer(origins))
        }
        Err(_) if environment.is_production() => {
            Err(ConfigError::MissingEnvVar(CORS_ORIGIN_VAR.to_string()))
        }
        Err(_) => {
            tracing::warn!("{} not set, allowing any origin", CORS_ORIGIN_VAR);
            Ok(create_permissive_cors_layer())
        }
    }
}

fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>, ConfigError> {
    let origins = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(HeaderValue::from_str)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ConfigError::invalid(CORS_ORIGIN_VAR, e.to_string()))?;

    if origins.is_empty() {
        return Err(ConfigError::invalid(CORS_ORIGIN_VAR, "cannot be empty"));
    }

    Ok(origins)
}
