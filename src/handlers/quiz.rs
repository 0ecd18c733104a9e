// src/handlers/quiz.rs

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    assessment::{
        bank::{OptionKey, QuestionBank, QuestionId},
        scorer::{PerformanceBand, ScoreResult, score},
        session::Progress,
    },
    error::AppError,
    models::response_record::{Identity, ResponseRecord},
    state::AppState,
};

/// Returns the question bank without its answer key.
pub async fn list_questions(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "total_questions": state.bank.len(),
        "pass_threshold": state.policy.pass_count,
        "questions": state.bank.public_questions(),
    }))
}

/// Opens an attempt for a respondent.
///
/// All identity fields are required and validated before any question is shown.
pub async fn start_session(
    State(state): State<AppState>,
    Json(payload): Json<Identity>,
) -> Result<impl IntoResponse, AppError> {
    let identity = payload.normalized();
    if let Err(validation_errors) = identity.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let session_id = state.sessions.start(identity).await;
    let open_sessions = state.sessions.len().await;
    tracing::info!(
        %session_id,
        open_sessions,
        "Assessment started"
    );

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "session_id": session_id,
            "total_questions": state.bank.len(),
        })),
    ))
}

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub started_at: DateTime<Utc>,
    pub answers: BTreeMap<QuestionId, OptionKey>,
    pub progress: Progress,
}

/// Shows who is taking the attempt and what has been answered so far.
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.sessions.get(session_id).await?;
    let progress = session.progress(&state.bank);

    Ok(Json(SessionView {
        session_id,
        name: session.identity.name,
        email: session.identity.email,
        phone: session.identity.phone,
        started_at: session.started_at,
        answers: session.answers,
        progress,
    }))
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub answer: String,
}

/// Records or changes the answer to a single question.
pub async fn record_answer(
    State(state): State<AppState>,
    Path((session_id, question_id)): Path<(Uuid, QuestionId)>,
    Json(payload): Json<AnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let answer = OptionKey::parse(&payload.answer).ok_or_else(|| {
        AppError::BadRequest(format!("'{}' is not one of a, b, c, d", payload.answer))
    })?;

    let progress = state
        .sessions
        .record_answer(session_id, question_id, answer, &state.bank)
        .await?;

    Ok(Json(progress))
}

/// Per-question feedback shown on the results page.
#[derive(Debug, Serialize)]
pub struct ReviewItem {
    pub question_id: QuestionId,
    pub topic: String,
    pub your_answer: Option<OptionKey>,
    pub your_answer_text: Option<String>,
    pub correct_answer: OptionKey,
    pub correct_answer_text: String,
    pub is_correct: bool,
}

#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub score: usize,
    pub total_questions: usize,
    pub percentage: f64,
    pub passed: bool,
    pub band: PerformanceBand,
    pub message: &'static str,
    pub review: Vec<ReviewItem>,
    /// Whether the attempt reached the store. The score is valid either way.
    pub saved: bool,
    pub file_name: Option<String>,
    pub save_error: Option<String>,
}

fn band_message(band: PerformanceBand) -> &'static str {
    match band {
        PerformanceBand::Excellent => {
            "Excellent performance. You're ready for advanced AI applications in audit and taxation work."
        }
        PerformanceBand::Satisfactory => {
            "Satisfactory performance. Review the incorrect answers before applying AI in client work."
        }
        PerformanceBand::BelowPassing => {
            "Below passing score. Review the session material and the incorrect answers."
        }
    }
}

fn review_items(result: &ScoreResult, bank: &QuestionBank) -> Vec<ReviewItem> {
    bank.iter()
        .zip(&result.review)
        .map(|(question, review)| ReviewItem {
            question_id: question.id,
            topic: question.topic.clone(),
            your_answer: review.selected,
            your_answer_text: review.selected.map(|k| question.option(k).to_string()),
            correct_answer: question.correct,
            correct_answer_text: question.option(question.correct).to_string(),
            is_correct: review.is_correct,
        })
        .collect()
}

/// Submits a completed attempt.
///
/// * Rejects the submission (422) while any question is unanswered.
/// * Scores the answers and appends the attempt to the store.
/// * A failed save is reported in the body; the score is still returned.
pub async fn submit_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let session = state
        .sessions
        .take_for_submit(session_id, &state.bank)
        .await?;

    let record = ResponseRecord::new(&session.identity, &session.answers, Utc::now());
    let result = score(&record.responses, &state.bank, &state.policy);
    tracing::info!(
        %session_id,
        email = %record.email,
        score = result.score,
        passed = result.passed,
        "Assessment submitted"
    );

    let (saved, file_name, save_error) = match state.store.append(&record).await {
        Ok(handle) => (true, Some(handle.file_name), None),
        Err(e) => {
            tracing::warn!(%session_id, email = %record.email, "Results not saved: {}", e);
            (false, None, Some(format!("Results could not be saved: {}", e)))
        }
    };

    Ok(Json(SubmissionResponse {
        score: result.score,
        total_questions: result.total_questions,
        percentage: result.percentage,
        passed: result.passed,
        band: result.band,
        message: band_message(result.band),
        review: review_items(&result, &state.bank),
        saved,
        file_name,
        save_error,
    }))
}
