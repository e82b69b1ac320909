pub mod api; // REST client for the hospital backend
pub mod config;
pub mod context;
pub mod controllers; // Page event handlers
pub mod models;
pub mod sequencer;
pub mod session; // Role/token state machine
pub mod ui;
pub mod views;

#[cfg(test)]
pub(crate) mod test_support;

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. `RUST_LOG` wins over the default
/// filter. Calling this twice is harmless.
pub fn init_tracing() {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("{} portal client v{}", config::APP_NAME, config::APP_VERSION);
    }
}
