//! Axum route handlers for the Resume API.
//!
//! All routes require an authenticated user and only ever touch that user's
//! resumes; someone else's id answers 404.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::resume::{ResumeInput, SavedResume};
use crate::resumes::import::{draft_from_text, extract_pdf_text, ImportResponse};
use crate::resumes::render::render_resume_to_md;
use crate::resumes::validation::validate_resume_input;
use crate::state::AppState;

const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Markdown,
    Pdf,
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub format: ExportFormat,
}

fn ensure_valid(input: &ResumeInput) -> Result<(), AppError> {
    let report = validate_resume_input(input);
    if !report.passed {
        return Err(AppError::UnprocessableEntity(
            serde_json::to_string(&report).unwrap_or_default(),
        ));
    }
    Ok(())
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Resume {id} not found"))
}

/// POST /api/v1/resumes
pub async fn handle_create_resume(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<ResumeInput>,
) -> Result<(StatusCode, Json<SavedResume>), AppError> {
    ensure_valid(&input)?;
    let saved = state.resumes.create(&user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

/// GET /api/v1/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<SavedResume>>, AppError> {
    Ok(Json(state.resumes.list(&user.user_id).await?))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<SavedResume>, AppError> {
    let resume = state
        .resumes
        .get(&user.user_id, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(resume))
}

/// PUT /api/v1/resumes/:id
pub async fn handle_update_resume(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(input): Json<ResumeInput>,
) -> Result<Json<SavedResume>, AppError> {
    ensure_valid(&input)?;
    let resume = state
        .resumes
        .update(&user.user_id, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(resume))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.resumes.delete(&user.user_id, id).await? {
        return Err(not_found(id));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/resumes/:id/export?format=markdown|pdf
///
/// Markdown only. PDF rendering happens in the browser.
pub async fn handle_export_resume(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, AppError> {
    let resume = state
        .resumes
        .get(&user.user_id, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    if query.format == ExportFormat::Pdf {
        return Err(AppError::NotImplemented(
            "PDF export is not available; use format=markdown".to_string(),
        ));
    }

    let body = render_resume_to_md(&resume);
    let disposition = format!("attachment; filename=\"{}.md\"", file_stem(&resume.title));
    Ok((
        [
            (header::CONTENT_TYPE, "text/markdown; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

/// POST /api/v1/resumes/import
///
/// Accepts a multipart upload with a `file` field holding a PDF and returns
/// its text plus a pre-filled draft. Nothing is persisted.
pub async fn handle_import_resume(
    _user: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<ImportResponse>, AppError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some(UPLOAD_FIELD) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
            upload = Some(bytes);
            break;
        }
    }

    let bytes = upload
        .filter(|b| !b.is_empty())
        .ok_or_else(|| AppError::Validation(format!("A non-empty '{UPLOAD_FIELD}' field is required")))?;

    let raw_text = extract_pdf_text(bytes).await?;
    let draft = draft_from_text(&raw_text);
    info!("Imported resume text ({} chars)", raw_text.len());

    Ok(Json(ImportResponse { raw_text, draft }))
}

/// Title reduced to a safe download name.
fn file_stem(title: &str) -> String {
    let stem: String = title
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
        .collect();
    let stem = stem.trim_matches('-');
    if stem.is_empty() {
        "resume".to_string()
    } else {
        stem.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("My Resume (2024)"), "My-Resume--2024");
        assert_eq!(file_stem("   "), "resume");
        assert_eq!(file_stem("\"quoted\""), "quoted");
    }
}
