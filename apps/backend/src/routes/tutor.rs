//! Homework tutor endpoint

use axum::{extract::State, Extension, Json};
use practice_core::tutor::tutor_messages;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedLearner;
use crate::services::practice::find_question;
use crate::AppState;

/// Longest student message accepted, in characters.
const MAX_MESSAGE_CHARS: usize = 4000;

/// POST /api/tutor/ask
pub async fn ask(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedLearner>,
    Json(payload): Json<TutorAskRequest>,
) -> Result<Json<TutorAskResponse>> {
    let llm = state
        .llm
        .clone()
        .ok_or_else(|| ApiError::Unavailable("tutor is not configured".to_string()))?;

    let message = payload.message.trim();
    if message.is_empty() {
        return Err(ApiError::BadRequest("message must not be empty".to_string()));
    }
    if message.chars().count() > MAX_MESSAGE_CHARS {
        return Err(ApiError::BadRequest(format!(
            "message is longer than {MAX_MESSAGE_CHARS} characters"
        )));
    }

    let lesson = match payload.lesson_id.as_deref() {
        Some(id) => Some(
            state
                .catalog
                .lesson(id)
                .ok_or_else(|| ApiError::NotFound(format!("Lesson {id}")))?,
        ),
        None => None,
    };

    let question = match (lesson, payload.question_id.as_deref()) {
        (Some(lesson), Some(question_id)) => Some(find_question(&state, &lesson.id, question_id).await?),
        (None, Some(_)) => {
            return Err(ApiError::BadRequest(
                "question_id requires lesson_id".to_string(),
            ))
        }
        _ => None,
    };

    let messages = tutor_messages(lesson, question.as_ref(), &payload.history, message);
    tracing::debug!(
        "Tutor request from learner {} with {} messages",
        auth.learner_id,
        messages.len()
    );

    let reply = llm.tutor_reply(&messages).await.map_err(|e| {
        tracing::warn!("Tutor request failed: {:#}", e);
        ApiError::Upstream("tutor is temporarily unavailable".to_string())
    })?;

    Ok(Json(TutorAskResponse { reply }))
}
