//! Axum route handlers for resume uploads and stored results.

use std::io::Write;
use std::path::Path;

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::matching::extractor::SkillSet;
use crate::matching::pipeline::MatchingReport;
use crate::matching::results::{list_extractions, store_extraction};
use crate::models::extraction::ExtractedSkillsRow;
use crate::state::AppState;

/// Upload extensions accepted by both upload routes.
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "pdf"];

const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct ExtractSkillsResponse {
    pub status: &'static str,
    pub skills: SkillSet,
    pub extracted_text: String,
}

/// Lower-cased extension of `filename` if it is an allowed upload type.
fn allowed_extension(filename: &str) -> Option<String> {
    let ext = Path::new(filename).extension()?.to_str()?.to_ascii_lowercase();
    ALLOWED_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

/// Validates the multipart `file` field and stages it in `upload_dir`.
/// The returned temp file is deleted when dropped.
async fn receive_upload(
    mut multipart: Multipart,
    upload_dir: &str,
) -> Result<NamedTempFile, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        if filename.is_empty() {
            return Err(AppError::Validation("No selected file".to_string()));
        }
        let ext = allowed_extension(&filename)
            .ok_or_else(|| AppError::Validation("File type not allowed".to_string()))?;

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        if bytes.is_empty() {
            return Err(AppError::Validation("Uploaded file is empty".to_string()));
        }

        let mut staged = tempfile::Builder::new()
            .prefix("upload_")
            .suffix(&format!(".{ext}"))
            .tempfile_in(upload_dir)
            .map_err(|e| AppError::Internal(e.into()))?;
        staged
            .write_all(&bytes)
            .map_err(|e| AppError::Internal(e.into()))?;

        info!("Staged upload '{filename}' ({} bytes)", bytes.len());
        return Ok(staged);
    }

    Err(AppError::Validation("No file part".to_string()))
}

/// POST /api/v1/extract-skills
///
/// OCR + skill extraction only. The result is recorded best-effort.
pub async fn handle_extract_skills(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ExtractSkillsResponse>, AppError> {
    let upload = receive_upload(multipart, &state.config.upload_dir).await?;
    let report = state.pipeline.extract_skills(upload.path()).await?;

    let stored = store_extraction(&state.db, &report.skills.to_vec(), &report.extracted_text).await;
    if let Err(e) = stored {
        warn!("Failed to store extraction result: {e}");
    }

    Ok(Json(ExtractSkillsResponse {
        status: "success",
        skills: report.skills,
        extracted_text: report.extracted_text,
    }))
}

/// POST /api/v1/match
///
/// Full pipeline: skills plus ranked job offers.
pub async fn handle_match(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<MatchingReport>, AppError> {
    let upload = receive_upload(multipart, &state.config.upload_dir).await?;
    let report = state.pipeline.process_resume(upload.path()).await?;
    Ok(Json(report))
}

/// GET /api/v1/results
pub async fn handle_list_results(
    State(state): State<AppState>,
) -> Result<Json<Vec<ExtractedSkillsRow>>, AppError> {
    Ok(Json(list_extractions(&state.db).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_extension_case_insensitive() {
        assert_eq!(allowed_extension("cv.PNG").as_deref(), Some("png"));
        assert_eq!(allowed_extension("scan.final.jpeg").as_deref(), Some("jpeg"));
        assert_eq!(allowed_extension("resume.pdf").as_deref(), Some("pdf"));
    }

    #[test]
    fn test_disallowed_or_missing_extension() {
        assert_eq!(allowed_extension("resume.docx"), None);
        assert_eq!(allowed_extension("resume"), None);
        assert_eq!(allowed_extension(".png"), None);
    }
}
