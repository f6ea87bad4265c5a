//! Registration flow and admin back-office client for a charity running
//! event.
//!
//! The flow runs form → draft store → summary → registration API →
//! confirmation; data moves forward only, except the summary's "edit"
//! transition back into the form, which loses nothing. Each stage gets the
//! draft store and API client injected; nothing here is ambient global
//! state.

pub mod client;
pub mod config;
pub mod confirmation;
pub mod draft;
pub mod error;
pub mod finance;
pub mod form;
pub mod options;
pub mod pricing;
pub mod session;
pub mod store;
pub mod summary;
pub mod validation;

// Load env from a simple, standardized location resolution.
// This uses dotenvy::dotenv().ok() which loads .env if present and silently ignores if missing.
pub fn load_env() {
    let _ = dotenvy::dotenv();
}

/// Installs the env-filtered tracing subscriber for binaries and tests.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pace_registration=info".into()),
        )
        .try_init();
}
