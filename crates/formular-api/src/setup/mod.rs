//! Application setup and initialization
//!
//! All startup logic lives here instead of main.rs so the pieces stay
//! individually testable.

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use crate::state::AppState;
use anyhow::Result;
use formular_core::Config;
use formular_db::{OnboardingRepository, SubsidiaryRepository};
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_telemetry(&config);

    tracing::info!(
        environment = config.environment(),
        template_dir = config.template_dir(),
        "Configuration loaded"
    );

    let pool = database::setup_database(&config).await?;
    let storage = storage::setup_storage(&config).await?;

    let state = Arc::new(AppState {
        onboarding: OnboardingRepository::new(pool.clone()),
        subsidiaries: SubsidiaryRepository::new(pool.clone()),
        config,
        pool,
        storage,
    });

    let router = routes::setup_routes(&state.config, state.clone())?;

    Ok((state, router))
}
