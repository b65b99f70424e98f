//! Onboarding progress read and update endpoints.

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use formular_core::models::OnboardingProgress;
use formular_core::AppError;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/subsidiaries/{id}/onboarding",
    tag = "onboarding",
    params(("id" = Uuid, Path, description = "Subsidiary id")),
    responses(
        (status = 200, description = "Progress record", body = OnboardingProgress),
        (status = 404, description = "No progress recorded", body = ErrorResponse)
    )
)]
pub async fn get_onboarding(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<OnboardingProgress>, HttpAppError> {
    let progress = state.onboarding.get(id).await?.ok_or_else(|| {
        AppError::NotFound(format!("no onboarding progress for subsidiary {}", id))
    })?;
    Ok(Json(progress))
}

/// Step advance and/or a section merge; at least one must be present.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOnboardingRequest {
    #[serde(default)]
    pub current_step: Option<i32>,
    /// Section of the form data to merge into, e.g. "documents".
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub data: Option<JsonValue>,
}

#[utoipa::path(
    put,
    path = "/api/subsidiaries/{id}/onboarding",
    tag = "onboarding",
    params(("id" = Uuid, Path, description = "Subsidiary id")),
    request_body = UpdateOnboardingRequest,
    responses(
        (status = 200, description = "Updated progress record", body = OnboardingProgress),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Subsidiary not found", body = ErrorResponse)
    )
)]
pub async fn update_onboarding(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateOnboardingRequest>,
) -> Result<Json<OnboardingProgress>, HttpAppError> {
    state
        .subsidiaries
        .get_subsidiary(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("subsidiary {} not found", id)))?;

    let mut progress = None;

    if let Some(step) = request.current_step {
        if step < 0 {
            return Err(HttpAppError(AppError::InvalidInput(
                "currentStep must be non-negative".to_string(),
            )));
        }
        progress = Some(state.onboarding.upsert_step(id, step).await?);
    }

    match (&request.section, &request.data) {
        (Some(section), Some(data)) => {
            progress = Some(state.onboarding.merge_form_data(id, section, data).await?);
        }
        (Some(_), None) | (None, Some(_)) => {
            return Err(HttpAppError(AppError::InvalidInput(
                "section and data must be provided together".to_string(),
            )));
        }
        (None, None) => {}
    }

    let progress = progress.ok_or_else(|| {
        AppError::InvalidInput("nothing to update: provide currentStep or section+data".to_string())
    })?;

    Ok(Json(progress))
}
