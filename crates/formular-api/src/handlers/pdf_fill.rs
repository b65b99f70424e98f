//! Server-side PDF form fill.
//!
//! Compiles the subsidiary's field set, maps it onto the requested template,
//! fills the AcroForm and stores the artifact under `generated_forms`. The
//! client only ever receives a signed download URL plus the durable storage
//! key.

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{extract::State, Json};
use chrono::Utc;
use formular_core::legal_form::{resolve_document_type, DocumentType};
use formular_core::models::{Company, DocumentCategory};
use formular_core::AppError;
use formular_forms::{
    bestellformular_template, compile_form_data, dokumentationsbogen_template, fill_pdf_form,
    map_bestellformular, map_dokumentationsbogen, DocumentsStepData, FillOptions,
};
use formular_storage::keys::{document_key, sanitize_file_name};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FormType {
    Bestellformular,
    Dokumentationsbogen,
}

impl FormType {
    fn as_str(&self) -> &'static str {
        match self {
            FormType::Bestellformular => "bestellformular",
            FormType::Dokumentationsbogen => "dokumentationsbogen",
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FillFormRequest {
    pub form_type: FormType,
    pub subsidiary_id: Uuid,
    /// Override the resolved document type (stable key, e.g. "GMBH_CO_KG").
    #[serde(default)]
    pub document_type: Option<String>,
    /// Override the template path, relative to the template directory.
    #[serde(default)]
    pub template_path: Option<String>,
    /// Documents-step values; when absent, read from the stored progress.
    #[serde(default)]
    pub form_data: Option<DocumentsStepData>,
    /// Fail instead of skipping mapped fields the template does not have.
    #[serde(default)]
    pub strict: bool,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FillFormResponse {
    /// Short-lived signed download URL.
    pub download_url: String,
    /// Durable storage key of the generated PDF.
    pub file_path: String,
    pub filename: String,
}

/// Resolve a template path against the configured template directory,
/// rejecting anything that could escape it.
fn resolve_template_path(template_dir: &str, relative: &str) -> Result<PathBuf, AppError> {
    if relative.contains("..") || relative.starts_with('/') {
        return Err(AppError::InvalidInput(
            "template path contains invalid components".to_string(),
        ));
    }
    // Table paths carry the default directory as prefix; strip it so a
    // custom TEMPLATE_DIR relocates them.
    let stripped = relative.strip_prefix("templates/").unwrap_or(relative);
    Ok(PathBuf::from(template_dir).join(stripped))
}

#[utoipa::path(
    post,
    path = "/api/pdf/fill",
    tag = "pdf",
    request_body = FillFormRequest,
    responses(
        (status = 200, description = "Form filled and stored", body = FillFormResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Subsidiary not found", body = ErrorResponse),
        (status = 422, description = "Template could not be filled", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn fill_form(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FillFormRequest>,
) -> Result<Json<FillFormResponse>, HttpAppError> {
    let subsidiary = state
        .subsidiaries
        .get_subsidiary(request.subsidiary_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("subsidiary {} not found", request.subsidiary_id))
        })?;

    // Contact and company fetch failures degrade to defaults; the form is
    // still generated, just with blanks where the data would have gone.
    let contacts = match state.subsidiaries.list_contacts(subsidiary.id).await {
        Ok(contacts) => contacts,
        Err(e) => {
            tracing::warn!(error = %e, subsidiary_id = %subsidiary.id, "contact fetch failed, continuing without contacts");
            Vec::new()
        }
    };
    let company = match state.subsidiaries.get_company(subsidiary.company_id).await {
        Ok(Some(company)) => company,
        Ok(None) => Company {
            id: subsidiary.company_id,
            name: String::new(),
        },
        Err(e) => {
            tracing::warn!(error = %e, company_id = %subsidiary.company_id, "company fetch failed, falling back to subsidiary name");
            Company {
                id: subsidiary.company_id,
                name: String::new(),
            }
        }
    };

    let documents_step = match request.form_data {
        Some(data) => data,
        None => match state.onboarding.get(subsidiary.id).await? {
            Some(progress) => {
                serde_json::from_value(progress.section("documents").clone()).unwrap_or_default()
            }
            None => DocumentsStepData::default(),
        },
    };

    let compiled = compile_form_data(&subsidiary, &company, &contacts, &documents_step);

    let document_type = match &request.document_type {
        Some(raw) => DocumentType::from_str(raw)
            .map_err(|_| AppError::InvalidInput(format!("unknown document type: {}", raw)))?,
        None => resolve_document_type(&subsidiary.legal_form),
    };

    let (fields, template_rel, base_name) = match request.form_type {
        FormType::Bestellformular => (
            map_bestellformular(&compiled),
            bestellformular_template(),
            "UPgivve_Bestellformular".to_string(),
        ),
        FormType::Dokumentationsbogen => (
            map_dokumentationsbogen(&compiled, document_type),
            dokumentationsbogen_template(document_type),
            sanitize_file_name(document_type.document_name()),
        ),
    };
    let template_rel = request.template_path.as_deref().unwrap_or(template_rel);
    let template_path = resolve_template_path(state.config.template_dir(), template_rel)?;

    let template = tokio::fs::read(&template_path).await.map_err(|e| {
        AppError::Template(format!(
            "failed to load template {}: {}",
            template_path.display(),
            e
        ))
    })?;

    let options = if request.strict {
        FillOptions::strict()
    } else {
        FillOptions::default()
    };
    let filled = fill_pdf_form(&template, &fields, &options)?;

    let now = Utc::now();
    let filename = format!("{}_{}.pdf", base_name, now.format("%Y%m%d"));
    let key = document_key(
        subsidiary.id,
        DocumentCategory::GeneratedForms,
        document_type.key(),
        &filename,
        now,
    );

    state
        .storage
        .upload(&key, "application/pdf", filled)
        .await?;
    let download_url = state
        .storage
        .signed_url(
            &key,
            Duration::from_secs(state.config.signed_url_expiry_secs()),
        )
        .await?;

    let mut record = serde_json::Map::new();
    record.insert(
        request.form_type.as_str().to_string(),
        json!({
            "filePath": key,
            "filename": filename,
            "generatedAt": now,
        }),
    );
    let record = serde_json::Value::Object(record);
    state
        .onboarding
        .merge_form_data(subsidiary.id, "orderForms", &record)
        .await?;

    tracing::info!(
        subsidiary_id = %subsidiary.id,
        form_type = request.form_type.as_str(),
        document_type = document_type.key(),
        key = %key,
        "form generated"
    );

    Ok(Json(FillFormResponse {
        download_url,
        file_path: key,
        filename,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_template_path_strips_default_prefix() {
        let path = resolve_template_path("/srv/templates", "templates/Form.pdf").unwrap();
        assert_eq!(path, PathBuf::from("/srv/templates/Form.pdf"));
    }

    #[test]
    fn test_resolve_template_path_rejects_traversal() {
        assert!(resolve_template_path("templates", "../secret.pdf").is_err());
        assert!(resolve_template_path("templates", "/etc/passwd").is_err());
    }

    #[test]
    fn test_form_type_wire_names() {
        let ty: FormType = serde_json::from_str("\"bestellformular\"").unwrap();
        assert_eq!(ty, FormType::Bestellformular);
        let ty: FormType = serde_json::from_str("\"dokumentationsbogen\"").unwrap();
        assert_eq!(ty, FormType::Dokumentationsbogen);
    }
}
