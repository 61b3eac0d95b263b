//! Cross-cutting HTTP layers: CORS from the environment and a fixed set of
//! security response headers. Both are applied by
//! [`create_router`](crate::server::create_router).

pub mod cors;
pub mod security;

pub use cors::{cors_from_env, create_cors_layer, create_permissive_cors_layer};
pub use security::security_headers;
