//! Rules for marriage document files: accepted formats, stored names,
//! content types and download-name validation.

use crate::error::CoreError;

/// Maximum accepted upload size (10 MiB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Accepted document extensions (lowercase, without the dot).
pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "jpg", "jpeg", "png", "doc", "docx"];

/// Name used when an upload carries no usable file name.
const FALLBACK_FILE_NAME: &str = "document";

/// Lowercase extension of `file_name`, or an empty string if it has none.
pub fn extension_of(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => ext.to_lowercase(),
        _ => String::new(),
    }
}

/// Validate that `file_name` has one of the [`SUPPORTED_EXTENSIONS`].
pub fn validate_extension(file_name: &str) -> Result<(), CoreError> {
    let ext = extension_of(file_name);
    if SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unsupported document format '.{ext}'. Supported: .pdf, .jpg, .jpeg, .png, .doc, .docx"
        )))
    }
}

/// MIME type served for a stored document, inferred from its extension.
pub fn content_type_for(file_name: &str) -> &'static str {
    match extension_of(file_name).as_str() {
        "pdf" => "application/pdf",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}

/// Reduce an uploaded file name to ASCII alphanumerics, `.`, `-` and `_`.
///
/// Any directory part is discarded first. Spaces become underscores; other
/// characters are dropped. Runs of `.` collapse to one, so the result always
/// passes [`validate_download_name`].
pub fn sanitize_file_name(original: &str) -> String {
    let base = original
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default();

    let mut cleaned = String::with_capacity(base.len());
    for c in base.chars() {
        let c = match c {
            ' ' => '_',
            c if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') => c,
            _ => continue,
        };
        if c == '.' && cleaned.ends_with('.') {
            continue;
        }
        cleaned.push(c);
    }

    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        FALLBACK_FILE_NAME.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Name under which an upload is written to disk: `{unix_millis}_{sanitized}`.
pub fn stored_file_name(unix_millis: i64, original: &str) -> String {
    format!("{unix_millis}_{}", sanitize_file_name(original))
}

/// Validate a file name requested for download.
///
/// Rejects anything that could escape the upload directory.
pub fn validate_download_name(name: &str) -> Result<(), CoreError> {
    let invalid = name.is_empty()
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0')
        || name.contains("..");
    if invalid {
        Err(CoreError::Validation("Invalid file path".into()))
    } else {
        Ok(())
    }
}

/// Relative URL from which a stored document can be downloaded.
pub fn download_url(stored_name: &str) -> String {
    format!("/api/v1/marriage-documents/download/{stored_name}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
