//! Practice endpoints

use axum::{
    extract::{Query, State},
    Extension, Json,
};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedLearner;
use crate::services::practice;
use crate::AppState;

/// GET /api/practice/next?lesson_id=
pub async fn next(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedLearner>,
    Query(query): Query<NextQuestionQuery>,
) -> Result<Json<NextQuestionResponse>> {
    let response = practice::next_question(&state, auth.learner_id, &query.lesson_id).await?;
    Ok(Json(response))
}

/// POST /api/practice/check
pub async fn check(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedLearner>,
    Json(payload): Json<CheckAnswerRequest>,
) -> Result<Json<CheckAnswerResponse>> {
    let response = practice::submit_answer(&state, auth.learner_id, payload).await?;
    Ok(Json(response))
}

/// POST /api/practice/reset
pub async fn reset(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedLearner>,
    Json(payload): Json<ResetPracticeRequest>,
) -> Result<Json<ResetPracticeResponse>> {
    if state.catalog.lesson(&payload.lesson_id).is_none() {
        return Err(ApiError::NotFound(format!("Lesson {}", payload.lesson_id)));
    }

    let cleared = state
        .db
        .clear_used_questions(auth.learner_id, &payload.lesson_id)
        .await?;

    Ok(Json(ResetPracticeResponse { cleared }))
}
