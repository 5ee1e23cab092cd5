//! Lesson browsing endpoints (public)

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// GET /api/lessons
pub async fn list(State(state): State<AppState>) -> Result<Json<LessonListResponse>> {
    let lessons = state
        .catalog
        .lessons()
        .iter()
        .map(|lesson| LessonSummary {
            question_count: state.catalog.bank(&lesson.id, state.config.bank_size).len(),
            lesson: lesson.clone(),
        })
        .collect();

    Ok(Json(LessonListResponse { lessons }))
}

/// GET /api/lessons/:lesson_id
pub async fn get(
    State(state): State<AppState>,
    Path(lesson_id): Path<String>,
) -> Result<Json<LessonSummary>> {
    let lesson = state
        .catalog
        .lesson(&lesson_id)
        .ok_or_else(|| ApiError::NotFound(format!("Lesson {lesson_id}")))?;

    Ok(Json(LessonSummary {
        question_count: state.catalog.bank(&lesson_id, state.config.bank_size).len(),
        lesson: lesson.clone(),
    }))
}

/// GET /api/lessons/:lesson_id/questions
/// The lesson's bank with answers stripped.
pub async fn questions(
    State(state): State<AppState>,
    Path(lesson_id): Path<String>,
) -> Result<Json<LessonQuestionsResponse>> {
    if state.catalog.lesson(&lesson_id).is_none() {
        return Err(ApiError::NotFound(format!("Lesson {lesson_id}")));
    }

    let questions = state
        .catalog
        .bank(&lesson_id, state.config.bank_size)
        .iter()
        .map(PublicQuestion::from)
        .collect();

    Ok(Json(LessonQuestionsResponse {
        lesson_id,
        questions,
    }))
}
