//! Application state shared across handlers.

use formular_core::Config;
use formular_db::{OnboardingRepository, SubsidiaryRepository};
use formular_storage::Storage;
use sqlx::PgPool;
use std::sync::Arc;

pub struct AppState {
    pub config: Config,
    pub pool: PgPool,
    pub storage: Arc<dyn Storage>,
    pub onboarding: OnboardingRepository,
    pub subsidiaries: SubsidiaryRepository,
}
