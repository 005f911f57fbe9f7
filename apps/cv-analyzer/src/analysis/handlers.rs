//! Axum route handlers for the Analysis API.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::analysis::matcher::{analyze, AnalysisResult};
use crate::analysis::report::{render_report, AnalysisReport};
use crate::analysis::skills::RequiredSkillSet;
use crate::errors::AppError;
use crate::extraction::TextExtractor;
use crate::nlp::Annotator;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeTextRequest {
    pub cv_text: String,
    pub skills: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub analysis_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub result: AnalysisResult,
    pub report: AnalysisReport,
}

impl AnalysisResponse {
    fn new(result: AnalysisResult) -> Self {
        let report = render_report(&result);
        Self {
            analysis_id: Uuid::new_v4(),
            analyzed_at: Utc::now(),
            result,
            report,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// Multipart form: `file` (PDF bytes) and `skills` (comma-separated).
/// Omitting `skills` entirely falls back to the configured default list.
pub async fn handle_analyze_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResponse>, AppError> {
    let mut file: Option<Bytes> = None;
    let mut skills_text: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                file = Some(field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read uploaded file: {e}"))
                })?);
            }
            Some("skills") => {
                skills_text = Some(field.text().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read skills field: {e}"))
                })?);
            }
            other => debug!("Ignoring multipart field {other:?}"),
        }
    }

    let file = file
        .filter(|bytes| !bytes.is_empty())
        .ok_or_else(|| AppError::InputMissing("Please upload a CV (PDF format only)".to_string()))?;
    let skills_text = skills_text.unwrap_or_else(|| state.config.default_skills.clone());
    let skills = parse_skill_input(&skills_text)?;

    info!(bytes = file.len(), skills = skills.len(), "Analyzing uploaded CV");

    let extractor = Arc::clone(&state.extractor);
    let annotator = Arc::clone(&state.annotator);
    let result = tokio::task::spawn_blocking(move || {
        analyze_upload(extractor.as_ref(), annotator.as_ref(), &file, &skills)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Analysis task failed: {e}")))??;

    Ok(Json(AnalysisResponse::new(result)))
}

/// POST /api/v1/analyze/text
///
/// Same analysis over text that was already extracted. Empty `cv_text` is
/// allowed and simply matches nothing.
pub async fn handle_analyze_text(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeTextRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let skills = parse_skill_input(&request.skills)?;

    info!(chars = request.cv_text.len(), skills = skills.len(), "Analyzing CV text");

    let annotator = Arc::clone(&state.annotator);
    let result = tokio::task::spawn_blocking(move || {
        let document = annotator.annotate(&request.cv_text);
        analyze(&document, &skills)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Analysis task failed: {e}")))?;

    Ok(Json(AnalysisResponse::new(result)))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Blank input is a missing-input error; input that is only separators is an
/// empty skill set.
fn parse_skill_input(input: &str) -> Result<RequiredSkillSet, AppError> {
    if input.trim().is_empty() {
        return Err(AppError::InputMissing(
            "Please enter required skills (comma-separated)".to_string(),
        ));
    }
    Ok(RequiredSkillSet::parse(input)?)
}

/// Extract → annotate → match. Blocking.
fn analyze_upload(
    extractor: &dyn TextExtractor,
    annotator: &dyn Annotator,
    bytes: &[u8],
    skills: &RequiredSkillSet,
) -> Result<AnalysisResult, AppError> {
    let text = extractor.extract(bytes)?;
    let document = annotator.annotate(&text);
    if document.is_empty() {
        info!("No text extracted from CV; every skill will be reported missing");
    }
    Ok(analyze(&document, skills))
}
