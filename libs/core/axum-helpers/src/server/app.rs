use super::shutdown::{run_cleanup, shutdown_signal};
use crate::errors::handlers::{method_not_allowed, not_found, panic_response};
use crate::http::security::security_headers;
use axum::{Router, middleware};
use core_config::server::ServerConfig;
use std::io;
use std::time::Duration;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Versioned prefix every REST route is nested under.
pub const API_PREFIX: &str = "/api/v1";

/// Creates a configured Axum router with common middleware and documentation.
///
/// This function sets up:
/// - Swagger UI at `/swagger-ui`, OpenAPI document at `/api-docs/openapi.json`
/// - API routes nested under [`API_PREFIX`]
/// - 404 / 405 fallbacks answering with the error envelope
/// - Tracing, security headers, CORS, compression
/// - Panic catching: a panicking handler becomes a 500 envelope and the server keeps serving
///
/// Domain routers apply their own state before being passed in. Routes that
/// live outside the prefix (`/`, `/health`, `/ws`) are merged by the app
/// afterwards.
pub fn create_router<T>(apis: Router, cors: CorsLayer) -> Router
where
    T: OpenApi + 'static,
{
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .nest(API_PREFIX, apis)
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(cors)
        // gzip, br, deflate, zstd based on Accept-Encoding
        .layer(CompressionLayer::new())
        .layer(CatchPanicLayer::custom(panic_response))
}

/// Serves `router` until SIGINT/SIGTERM, lets in-flight requests finish,
/// then runs `cleanup` (closing the database client, etc.) bounded by
/// `shutdown_timeout`.
///
/// ```ignore
/// let cleanup = async move { client.shutdown().await };
/// create_production_app(router, &config, Duration::from_secs(30), cleanup).await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let served = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Server stopped with an error"));

    run_cleanup(cleanup, shutdown_timeout).await;
    served
}
