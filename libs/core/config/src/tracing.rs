use crate::Environment;
use tracing_subscriber::{EnvFilter, prelude::*};

/// Filter used when `RUST_LOG` is unset
pub fn default_filter(environment: &Environment) -> &'static str {
    if environment.is_production() {
        "info,tower_http=info,mongodb=warn"
    } else {
        "debug,tower_http=debug,mongodb=info,hyper=info"
    }
}

/// Install color-eyre for `main`'s error reports. Repeated calls are ignored.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Initialize the global subscriber.
///
/// Production logs are flattened JSON lines, development logs are pretty
/// printed. Both carry an `ErrorLayer` so eyre reports include span traces.
/// `RUST_LOG` overrides [`default_filter`]. Calling this twice is harmless,
/// the second call only logs at debug.
pub fn init_tracing(environment: &Environment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(environment)));

    let registry = tracing_subscriber::registry()
        .with(tracing_error::ErrorLayer::default())
        .with(filter);

    let result = if environment.is_production() {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
            .try_init()
    };

    match result {
        Ok(()) => ::tracing::info!(?environment, "Tracing initialized"),
        Err(_) => ::tracing::debug!("Tracing already initialized"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_is_quieter() {
        assert!(default_filter(&Environment::Production).starts_with("info"));
        assert!(default_filter(&Environment::Development).starts_with("debug"));
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init_tracing(&Environment::Production);
        init_tracing(&Environment::Development);
    }
}
