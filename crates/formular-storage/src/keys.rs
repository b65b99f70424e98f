//! Shared key generation for storage backends.
//!
//! Key format: `{subsidiary_id}/{category}/{document_type}/{timestamp}_{file_name}`
//! with the file name sanitized and the timestamp in Unix milliseconds. Two
//! uploads of the same file never collide and keys sort chronologically
//! within a folder.

use chrono::{DateTime, Utc};
use formular_core::models::DocumentCategory;
use uuid::Uuid;

/// Strip anything from a client-supplied file name that could influence the
/// key structure. Path separators are removed outright; remaining characters
/// outside `[A-Za-z0-9._-]` become underscores.
pub fn sanitize_file_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name)
        .trim();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_matches('.').to_string();
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}

/// Generate the storage key for a subsidiary document.
pub fn document_key(
    subsidiary_id: Uuid,
    category: DocumentCategory,
    document_type: &str,
    file_name: &str,
    uploaded_at: DateTime<Utc>,
) -> String {
    format!(
        "{}/{}/{}/{}_{}",
        subsidiary_id,
        category,
        sanitize_file_name(document_type),
        uploaded_at.timestamp_millis(),
        sanitize_file_name(file_name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_sanitize_keeps_safe_characters() {
        assert_eq!(
            sanitize_file_name("Handelsregister_2024.pdf"),
            "Handelsregister_2024.pdf"
        );
    }

    #[test]
    fn test_sanitize_replaces_unsafe_characters() {
        assert_eq!(sanitize_file_name("Satzung (neu).pdf"), "Satzung__neu_.pdf");
        assert_eq!(sanitize_file_name("Gebührenordnung.pdf"), "Geb_hrenordnung.pdf");
    }

    #[test]
    fn test_sanitize_strips_path_components() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\Users\\x\\doc.pdf"), "doc.pdf");
    }

    #[test]
    fn test_sanitize_empty_falls_back() {
        assert_eq!(sanitize_file_name(""), "file");
        assert_eq!(sanitize_file_name("..."), "file");
    }

    #[test]
    fn test_document_key_layout() {
        let id = Uuid::nil();
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let key = document_key(
            id,
            DocumentCategory::LegalFormDocuments,
            "GMBH",
            "Handelsregister.pdf",
            at,
        );
        assert_eq!(
            key,
            format!(
                "00000000-0000-0000-0000-000000000000/legal_form_documents/GMBH/{}_Handelsregister.pdf",
                at.timestamp_millis()
            )
        );
    }
}
