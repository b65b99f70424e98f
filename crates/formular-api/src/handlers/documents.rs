//! Subsidiary document upload, signed-URL and delete endpoints.
//!
//! Uploads land in object storage under the deterministic document key and
//! their metadata is merged into the `documents` section of the onboarding
//! progress record, keyed by document type (slot key). Signed URLs are
//! generated on demand and never stored.

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use chrono::Utc;
use formular_core::models::{DocumentCategory, UploadedDocument};
use formular_core::AppError;
use formular_storage::keys::document_key;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use utoipa::ToSchema;
use uuid::Uuid;

struct UploadParts {
    file_name: String,
    content_type: String,
    data: Vec<u8>,
    category: Option<String>,
    document_type: Option<String>,
}

async fn read_multipart(
    mut multipart: Multipart,
    max_size: usize,
) -> Result<UploadParts, HttpAppError> {
    let mut parts = UploadParts {
        file_name: String::new(),
        content_type: "application/octet-stream".to_string(),
        data: Vec::new(),
        category: None,
        document_type: None,
    };
    let mut has_file = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("invalid multipart body: {}", e)))?
    {
        match field.name().unwrap_or_default() {
            "file" => {
                parts.file_name = field.file_name().unwrap_or("upload").to_string();
                if let Some(ct) = field.content_type() {
                    parts.content_type = ct.to_string();
                }
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::InvalidInput(format!("failed to read file: {}", e)))?;
                if data.len() > max_size {
                    return Err(HttpAppError(AppError::PayloadTooLarge(format!(
                        "{} bytes exceeds max {} bytes",
                        data.len(),
                        max_size
                    ))));
                }
                parts.data = data.to_vec();
                has_file = true;
            }
            "category" => {
                let text = field.text().await.map_err(|e| {
                    AppError::InvalidInput(format!("failed to read category: {}", e))
                })?;
                parts.category = Some(text);
            }
            "documentType" => {
                let text = field.text().await.map_err(|e| {
                    AppError::InvalidInput(format!("failed to read documentType: {}", e))
                })?;
                parts.document_type = Some(text);
            }
            _ => {}
        }
    }

    if !has_file {
        return Err(HttpAppError(AppError::InvalidInput(
            "multipart field 'file' is required".to_string(),
        )));
    }
    Ok(parts)
}

#[utoipa::path(
    post,
    path = "/api/subsidiaries/{id}/documents",
    tag = "documents",
    params(("id" = Uuid, Path, description = "Subsidiary id")),
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Document uploaded", body = UploadedDocument),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Subsidiary not found", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn upload_document(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<UploadedDocument>, HttpAppError> {
    state
        .subsidiaries
        .get_subsidiary(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("subsidiary {} not found", id)))?;

    let parts = read_multipart(multipart, state.config.max_upload_size_bytes()).await?;

    let category = parts
        .category
        .as_deref()
        .map(DocumentCategory::from_str)
        .transpose()
        .map_err(AppError::InvalidInput)?
        .unwrap_or(DocumentCategory::AdditionalDocuments);
    let document_type = parts
        .document_type
        .clone()
        .unwrap_or_else(|| "unspecified".to_string());

    let now = Utc::now();
    let key = document_key(id, category, &document_type, &parts.file_name, now);
    let file_size = parts.data.len() as i64;

    state
        .storage
        .upload(&key, &parts.content_type, parts.data)
        .await?;
    let signed_url = state
        .storage
        .signed_url(
            &key,
            Duration::from_secs(state.config.signed_url_expiry_secs()),
        )
        .await?;

    let document = UploadedDocument {
        file_name: parts.file_name,
        file_path: key,
        file_type: parts.content_type,
        file_size,
        signed_url,
        uploaded_at: now,
    };

    // Persist metadata keyed by document type; the signed URL is dropped
    // from the stored copy.
    let mut stored = serde_json::to_value(&document).unwrap_or(JsonValue::Null);
    if let Some(obj) = stored.as_object_mut() {
        obj.remove("signedUrl");
    }
    let mut record = serde_json::Map::new();
    record.insert(document_type, stored);
    state
        .onboarding
        .merge_form_data(id, "documents", &JsonValue::Object(record))
        .await?;

    tracing::info!(
        subsidiary_id = %id,
        category = %category,
        key = %document.file_path,
        size_bytes = file_size,
        "document uploaded"
    );

    Ok(Json(document))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DocumentUrlQuery {
    /// Storage key previously returned as filePath.
    pub path: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentUrlResponse {
    pub url: String,
    /// Seconds until the URL expires.
    pub expires_in: u64,
}

#[utoipa::path(
    get,
    path = "/api/subsidiaries/{id}/documents/url",
    tag = "documents",
    params(
        ("id" = Uuid, Path, description = "Subsidiary id"),
        ("path" = String, Query, description = "Storage key to re-sign")
    ),
    responses(
        (status = 200, description = "Signed URL generated", body = DocumentUrlResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Document not found", body = ErrorResponse)
    )
)]
pub async fn get_document_url(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Query(query): Query<DocumentUrlQuery>,
) -> Result<Json<DocumentUrlResponse>, HttpAppError> {
    require_subsidiary_key(id, &query.path)?;

    if !state.storage.exists(&query.path).await? {
        return Err(HttpAppError(AppError::NotFound(query.path)));
    }

    let expires_in = state.config.signed_url_expiry_secs();
    let url = state
        .storage
        .signed_url(&query.path, Duration::from_secs(expires_in))
        .await?;

    Ok(Json(DocumentUrlResponse { url, expires_in }))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteDocumentRequest {
    /// Storage key previously returned as filePath.
    pub path: String,
    /// When set, the matching metadata entry is pruned from the progress
    /// record's `documents` section.
    #[serde(default)]
    pub document_type: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteDocumentResponse {
    pub deleted: bool,
}

#[utoipa::path(
    delete,
    path = "/api/subsidiaries/{id}/documents",
    tag = "documents",
    params(("id" = Uuid, Path, description = "Subsidiary id")),
    request_body = DeleteDocumentRequest,
    responses(
        (status = 200, description = "Document deleted", body = DeleteDocumentResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Document not found", body = ErrorResponse)
    )
)]
pub async fn delete_document(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<DeleteDocumentRequest>,
) -> Result<Json<DeleteDocumentResponse>, HttpAppError> {
    require_subsidiary_key(id, &request.path)?;

    state.storage.delete(&request.path).await?;

    if let Some(document_type) = &request.document_type {
        if let Some(progress) = state.onboarding.get(id).await? {
            let mut section = progress.section("documents").clone();
            if let Some(obj) = section.as_object_mut() {
                if obj.remove(document_type).is_some() {
                    state
                        .onboarding
                        .replace_section(id, "documents", &section)
                        .await?;
                }
            }
        }
    }

    tracing::info!(subsidiary_id = %id, key = %request.path, "document deleted");

    Ok(Json(DeleteDocumentResponse { deleted: true }))
}

/// Keys are subsidiary-scoped by construction; reject any key that does not
/// belong to the addressed subsidiary.
fn require_subsidiary_key(id: Uuid, key: &str) -> Result<(), HttpAppError> {
    if key.starts_with(&format!("{}/", id)) {
        Ok(())
    } else {
        Err(HttpAppError(AppError::InvalidInput(
            "path does not belong to this subsidiary".to_string(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_subsidiary_key_scoping() {
        let id = Uuid::new_v4();
        assert!(require_subsidiary_key(id, &format!("{}/logos/x/1_a.png", id)).is_ok());
        assert!(require_subsidiary_key(id, "other/logos/x/1_a.png").is_err());
        assert!(require_subsidiary_key(id, &format!("{}", id)).is_err());
    }
}
