// src/handlers/instructor.rs

use axum::{
    Json,
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    assessment::{
        aggregator::{AggregateReport, ReportWarning, aggregate},
        export::{Table, difficulty_table, student_table, topic_table},
    },
    error::AppError,
    state::AppState,
    utils::jwt::{INSTRUCTOR_ROLE, sign_jwt},
};

#[derive(Debug, Deserialize)]
pub struct InstructorLoginRequest {
    pub secret: String,
}

/// Exchanges the shared instructor secret for a bearer token.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<InstructorLoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.authenticator.verify(&payload.secret).await?;

    let token = sign_jwt(
        INSTRUCTOR_ROLE,
        INSTRUCTOR_ROLE,
        &state.config.jwt_secret,
        state.config.jwt_expiration,
    )?;

    Ok(Json(json!({
        "token": token,
        "type": "Bearer",
        "expires_in": state.config.jwt_expiration,
    })))
}

/// Reads every stored attempt and folds it into a fresh report.
///
/// An unreadable store yields an empty report with warnings, never an error.
async fn build_report(state: &AppState) -> AggregateReport {
    let listing = state.store.list_all().await;
    let mut report = aggregate(&listing.records, &state.bank, &state.policy);

    // Store problems come first, then per-record scoring problems.
    let mut warnings: Vec<ReportWarning> = listing
        .warnings
        .into_iter()
        .map(|message| ReportWarning {
            source: "store".to_string(),
            message,
        })
        .collect();
    warnings.append(&mut report.warnings);
    report.warnings = warnings;

    tracing::info!(
        attempts = report.overall.count,
        warnings = report.warnings.len(),
        "Built instructor report"
    );
    report
}

/// Dashboard data: overall, per-topic, per-difficulty and per-student views.
pub async fn get_report(State(state): State<AppState>) -> impl IntoResponse {
    Json(build_report(&state).await)
}

/// Downloads one of the report tables as CSV.
///
/// `file` is `students.csv`, `topics.csv` or `difficulties.csv`.
pub async fn export_csv(
    State(state): State<AppState>,
    Path(file): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let build: fn(&AggregateReport) -> Table = match file.as_str() {
        "students.csv" => student_table,
        "topics.csv" => topic_table,
        "difficulties.csv" => difficulty_table,
        _ => return Err(AppError::NotFound(format!("No export named '{}'", file))),
    };

    let report = build_report(&state).await;
    let body = build(&report).to_csv()?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file),
            ),
        ],
        body,
    ))
}
