//! Document requirement checklist endpoint.

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use formular_core::legal_form::resolve_document_type;
use formular_core::{required_document_slots, AppError, LegalForm, WizardAnswers};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequirementsQuery {
    #[serde(default)]
    pub listed_on_exchange: Option<bool>,
    #[serde(default)]
    pub has_corporate_representative: Option<bool>,
    #[serde(default)]
    pub prefers_register_extract: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSlotResponse {
    pub key: String,
    pub label: String,
    pub required: bool,
    pub conditional: bool,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRequirementsResponse {
    /// Legal form as entered at registration.
    pub legal_form: String,
    /// Resolved document type key, e.g. "GMBH_CO_KG".
    pub document_type: String,
    /// German name of the Dokumentationsbogen variant.
    pub document_name: String,
    /// True when the legal form was not recognized and the generic
    /// juristische-Person checklist applies.
    pub fallback: bool,
    pub slots: Vec<DocumentSlotResponse>,
}

#[utoipa::path(
    get,
    path = "/api/subsidiaries/{id}/document-requirements",
    tag = "documents",
    params(
        ("id" = Uuid, Path, description = "Subsidiary id"),
        ("listedOnExchange" = Option<bool>, Query, description = "AG: listed on a stock exchange"),
        ("hasCorporateRepresentative" = Option<bool>, Query, description = "KG/OHG: a corporate entity is personally liable partner"),
        ("prefersRegisterExtract" = Option<bool>, Query, description = "Verein: register extract instead of articles plus minutes")
    ),
    responses(
        (status = 200, description = "Requirement checklist", body = DocumentRequirementsResponse),
        (status = 404, description = "Subsidiary not found", body = ErrorResponse)
    )
)]
pub async fn get_document_requirements(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Query(query): Query<RequirementsQuery>,
) -> Result<Json<DocumentRequirementsResponse>, HttpAppError> {
    let subsidiary = state
        .subsidiaries
        .get_subsidiary(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("subsidiary {} not found", id)))?;

    let legal_form = LegalForm::parse(&subsidiary.legal_form);
    let fallback = matches!(legal_form, LegalForm::Other(_));
    let document_type = resolve_document_type(&subsidiary.legal_form);

    let answers = WizardAnswers {
        listed_on_exchange: query.listed_on_exchange,
        has_corporate_representative: query.has_corporate_representative,
        prefers_register_extract: query.prefers_register_extract,
    };

    let slots = required_document_slots(document_type, &answers)
        .into_iter()
        .map(|slot| DocumentSlotResponse {
            key: slot.key.to_string(),
            label: slot.label.to_string(),
            required: slot.required,
            conditional: slot.condition.is_some(),
        })
        .collect();

    Ok(Json(DocumentRequirementsResponse {
        legal_form: subsidiary.legal_form,
        document_type: document_type.key().to_string(),
        document_name: document_type.document_name().to_string(),
        fallback,
        slots,
    }))
}
