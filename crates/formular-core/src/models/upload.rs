//! Uploaded document metadata.
//!
//! Uploads live in object storage under a deterministic, timestamp-qualified
//! key; the key is the only durable pointer. Signed URLs are short-lived
//! derived credentials, regenerated on demand and never treated as the
//! source of truth.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Upload category, the second segment of the storage key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DocumentCategory {
    LegalFormDocuments,
    SignedForms,
    IdentificationDocuments,
    AdditionalDocuments,
    Logos,
    DesignFiles,
    /// Server-generated filled PDFs (Bestellformular, Dokumentationsbogen).
    GeneratedForms,
}

impl DocumentCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentCategory::LegalFormDocuments => "legal_form_documents",
            DocumentCategory::SignedForms => "signed_forms",
            DocumentCategory::IdentificationDocuments => "identification_documents",
            DocumentCategory::AdditionalDocuments => "additional_documents",
            DocumentCategory::Logos => "logos",
            DocumentCategory::DesignFiles => "design_files",
            DocumentCategory::GeneratedForms => "generated_forms",
        }
    }
}

impl FromStr for DocumentCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "legal_form_documents" => Ok(DocumentCategory::LegalFormDocuments),
            "signed_forms" => Ok(DocumentCategory::SignedForms),
            "identification_documents" => Ok(DocumentCategory::IdentificationDocuments),
            "additional_documents" => Ok(DocumentCategory::AdditionalDocuments),
            "logos" => Ok(DocumentCategory::Logos),
            "design_files" => Ok(DocumentCategory::DesignFiles),
            "generated_forms" => Ok(DocumentCategory::GeneratedForms),
            other => Err(format!("unknown document category: {}", other)),
        }
    }
}

impl fmt::Display for DocumentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata for one uploaded document, as persisted in the onboarding form
/// data and returned from the upload endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadedDocument {
    pub file_name: String,
    /// Storage key; the only durable pointer to the file.
    pub file_path: String,
    pub file_type: String,
    pub file_size: i64,
    /// Short-lived download URL; regenerate instead of persisting.
    pub signed_url: String,
    pub uploaded_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_roundtrip() {
        for cat in [
            DocumentCategory::LegalFormDocuments,
            DocumentCategory::SignedForms,
            DocumentCategory::IdentificationDocuments,
            DocumentCategory::AdditionalDocuments,
            DocumentCategory::Logos,
            DocumentCategory::DesignFiles,
            DocumentCategory::GeneratedForms,
        ] {
            assert_eq!(cat.as_str().parse::<DocumentCategory>().unwrap(), cat);
        }
    }

    #[test]
    fn test_uploaded_document_wire_format() {
        let doc = UploadedDocument {
            file_name: "handelsregister.pdf".to_string(),
            file_path: "abc/legal_form_documents/handelsregisterauszug/1700000000_handelsregister.pdf".to_string(),
            file_type: "application/pdf".to_string(),
            file_size: 52_000,
            signed_url: "https://example.com/signed".to_string(),
            uploaded_at: Utc::now(),
        };
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json.get("fileName").is_some());
        assert!(json.get("filePath").is_some());
        assert!(json.get("signedUrl").is_some());
    }
}
