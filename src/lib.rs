//! Symtrack core: day-bucketed symptom logging, trend aggregation, and PDF
//! export for a local-first personal symptom tracker. The UI shell embeds
//! this crate and owns rendering, navigation, and the share sheet.

pub mod config;
pub mod db;
pub mod export;
pub mod journal;
pub mod models;
pub mod trends;

use tracing_subscriber::EnvFilter;

/// Initializes tracing for the embedding shell. Call once at startup.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
}
