//! Shared constants.

/// Default object storage bucket for all document uploads.
pub const DEFAULT_BUCKET: &str = "givve_documents";

/// Default lifetime of signed download URLs in seconds.
///
/// Signed URLs are derived credentials and are never persisted; only the
/// storage key is durable. Callers re-request a URL whenever they need one.
pub const SIGNED_URL_EXPIRY_SECS: u64 = 3600;

/// Default directory holding the PDF form templates.
pub const DEFAULT_TEMPLATE_DIR: &str = "templates";

/// Default maximum accepted upload size in bytes (20 MiB).
pub const DEFAULT_MAX_UPLOAD_SIZE: usize = 20 * 1024 * 1024;
