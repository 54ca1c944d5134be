//! Handlers for the `/marriage-documents` resource.
//!
//! Uploaded files are written to the configured upload directory under a
//! `{unix_millis}_{sanitized name}` stored name; the row keeps the original
//! name, the stored name and the size.

use std::path::Path as FsPath;

use axum::body::Body;
use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use axum::Json;
use ccb_core::documents::{
    content_type_for, stored_file_name, validate_download_name, validate_extension,
    MAX_UPLOAD_BYTES,
};
use ccb_core::error::CoreError;
use ccb_core::roles::Capability;
use ccb_core::types::DbId;
use ccb_db::models::marriage_document::{
    CreateMarriageDocument, MarriageDocumentWithUrl, UpdateMarriageDocument,
};
use ccb_db::repositories::{MarriageDocumentRepo, MarriageRepo};
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;

use super::marriages::load_marriage;
use super::require_changes;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireRegisterViewer, RequireRegistrar};
use crate::state::AppState;

/// Request body limit for the upload route: the file plus form overhead.
pub const UPLOAD_BODY_LIMIT: usize = MAX_UPLOAD_BYTES + 64 * 1024;

/// Stored-name clashes tolerated before an upload gives up.
const MAX_NAME_ATTEMPTS: i64 = 16;

fn document_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "MarriageDocument",
        id,
    })
}

/// Remove a stored document file. Failures are logged, never returned.
pub(crate) async fn remove_stored_file(upload_dir: &FsPath, stored_name: &str) {
    let path = upload_dir.join(stored_name);
    match tokio::fs::remove_file(&path).await {
        Ok(()) => tracing::info!(file = %stored_name, "Document file removed"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(file = %stored_name, "Document file already missing");
        }
        Err(e) => {
            tracing::error!(file = %stored_name, error = %e, "Failed to remove document file");
        }
    }
}

/// Write `data` to a stored name no other upload holds and return that name.
///
/// The file is created with `create_new`, so an existing file is never
/// replaced; on a clash the timestamp moves forward one millisecond.
pub(crate) async fn write_new_file(
    upload_dir: &FsPath,
    unix_millis: i64,
    original_name: &str,
    data: &[u8],
) -> std::io::Result<String> {
    let mut millis = unix_millis;
    loop {
        let stored_name = stored_file_name(millis, original_name);
        let path = upload_dir.join(&stored_name);
        let opened = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await;
        let mut file = match opened {
            Ok(file) => file,
            Err(e)
                if e.kind() == std::io::ErrorKind::AlreadyExists
                    && millis - unix_millis < MAX_NAME_ATTEMPTS =>
            {
                millis += 1;
                continue;
            }
            Err(e) => return Err(e),
        };

        let written = match file.write_all(data).await {
            Ok(()) => file.flush().await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            remove_stored_file(upload_dir, &stored_name).await;
            return Err(e);
        }
        return Ok(stored_name);
    }
}

/// POST /api/v1/marriage-documents
///
/// Accepts a multipart form with a required `file` field, a required
/// `marriage_id` field and an optional `document_type` field.
pub async fn upload(
    State(state): State<AppState>,
    RequireRegistrar(registrar): RequireRegistrar,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<MarriageDocumentWithUrl>)> {
    let mut file_data: Option<(String, Vec<u8>)> = None;
    let mut marriage_id: Option<DbId> = None;
    let mut document_type: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                file_data = Some((file_name, data.to_vec()));
            }
            "marriage_id" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                let id = text.trim().parse::<DbId>().map_err(|_| {
                    AppError::BadRequest("marriage_id must be a numeric id".into())
                })?;
                marriage_id = Some(id);
            }
            "document_type" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                let text = text.trim();
                if !text.is_empty() {
                    document_type = Some(text.to_string());
                }
            }
            _ => {}
        }
    }

    let (original_name, data) =
        file_data.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;
    let marriage_id = marriage_id
        .ok_or_else(|| AppError::BadRequest("Missing required 'marriage_id' field".into()))?;

    validate_extension(&original_name)?;
    if data.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty".into()));
    }
    if data.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::Core(CoreError::Validation(
            "File exceeds the 10 MiB upload limit".into(),
        )));
    }

    if !MarriageRepo::exists(&state.pool, marriage_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Marriage",
            id: marriage_id,
        }));
    }

    let upload_dir = &state.config.upload_dir;
    tokio::fs::create_dir_all(upload_dir)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    let stored_name = write_new_file(
        upload_dir,
        chrono::Utc::now().timestamp_millis(),
        &original_name,
        &data,
    )
    .await
    .map_err(|e| AppError::InternalError(e.to_string()))?;

    let input = CreateMarriageDocument {
        marriage_id,
        document_type,
        file_name: original_name,
        file_path: stored_name.clone(),
        file_size: data.len() as i64,
    };
    let document = match MarriageDocumentRepo::create(&state.pool, &input).await {
        Ok(document) => document,
        Err(e) => {
            // The file was created by this request, so no other row refers to it.
            remove_stored_file(upload_dir, &stored_name).await;
            return Err(e.into());
        }
    };

    tracing::info!(
        document_id = document.id,
        marriage_id,
        file = %document.file_path,
        size = document.file_size,
        uploaded_by = registrar.user_id,
        "Marriage document stored"
    );
    Ok((StatusCode::CREATED, Json(document.into())))
}

/// GET /api/v1/marriage-documents
pub async fn list(
    State(state): State<AppState>,
    _viewer: RequireRegisterViewer,
) -> AppResult<Json<Vec<MarriageDocumentWithUrl>>> {
    let documents = MarriageDocumentRepo::list(&state.pool).await?;
    Ok(Json(documents.into_iter().map(Into::into).collect()))
}

/// GET /api/v1/marriage-documents/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<MarriageDocumentWithUrl>> {
    let document = MarriageDocumentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| document_not_found(id))?;
    if !auth.can(Capability::ViewRegisters) {
        let marriage = load_marriage(&state.pool, document.marriage_id).await?;
        auth.ensure_owner_or(marriage.user_id, Capability::ViewRegisters)?;
    }
    Ok(Json(document.into()))
}

/// GET /api/v1/marriage-documents/marriage/{marriage_id}
pub async fn list_by_marriage(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(marriage_id): Path<DbId>,
) -> AppResult<Json<Vec<MarriageDocumentWithUrl>>> {
    let marriage = load_marriage(&state.pool, marriage_id).await?;
    auth.ensure_owner_or(marriage.user_id, Capability::ViewRegisters)?;
    let documents = MarriageDocumentRepo::list_by_marriage(&state.pool, marriage_id).await?;
    Ok(Json(documents.into_iter().map(Into::into).collect()))
}

/// GET /api/v1/marriage-documents/download/{filename}
///
/// Streams a stored document as an attachment.
pub async fn download(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(filename): Path<String>,
) -> AppResult<Response> {
    validate_download_name(&filename)?;

    let document = MarriageDocumentRepo::find_by_file_path(&state.pool, &filename)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Document '{filename}' not found")))?;
    if !auth.can(Capability::ViewRegisters) {
        let marriage = load_marriage(&state.pool, document.marriage_id).await?;
        auth.ensure_owner_or(marriage.user_id, Capability::ViewRegisters)?;
    }

    let path = state.config.upload_dir.join(&filename);
    let file = match tokio::fs::File::open(&path).await {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(document_id = document.id, file = %filename, "Stored file is missing");
            return Err(AppError::NotFound(format!("Document '{filename}' not found")));
        }
        Err(e) => return Err(AppError::InternalError(e.to_string())),
    };
    let file_size = file
        .metadata()
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?
        .len();

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type_for(&filename))
        .header(header::CONTENT_LENGTH, file_size.to_string())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        )
        .body(Body::from_stream(ReaderStream::new(file)))
        .map_err(|e| AppError::InternalError(e.to_string()))
}

/// PUT|PATCH /api/v1/marriage-documents/{id}
///
/// Updates metadata only; the stored file is never replaced.
pub async fn update(
    State(state): State<AppState>,
    _registrar: RequireRegistrar,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMarriageDocument>,
) -> AppResult<Json<MarriageDocumentWithUrl>> {
    require_changes(&input)?;
    let document = MarriageDocumentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| document_not_found(id))?;
    Ok(Json(document.into()))
}

/// DELETE /api/v1/marriage-documents/{id}
///
/// Deletes the row, then the stored file.
pub async fn delete(
    State(state): State<AppState>,
    _registrar: RequireRegistrar,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let document = MarriageDocumentRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| document_not_found(id))?;
    remove_stored_file(&state.config.upload_dir, &document.file_path).await;
    Ok(StatusCode::NO_CONTENT)
}
