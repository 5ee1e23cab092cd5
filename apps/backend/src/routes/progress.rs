//! Progress endpoints

use axum::{
    extract::{Path, State},
    Extension, Json,
};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedLearner;
use crate::AppState;

/// GET /api/progress
pub async fn get_all(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedLearner>,
) -> Result<Json<ProgressResponse>> {
    let progress: Vec<LessonProgress> = state
        .db
        .get_all_progress(auth.learner_id)
        .await?
        .iter()
        .map(DbLessonProgress::to_core)
        .collect();

    let summary = ProgressSummary::from_lessons(&progress, state.catalog.lessons().len());

    Ok(Json(ProgressResponse {
        summary,
        lessons: progress.into_iter().map(LessonProgressView::from).collect(),
    }))
}

/// GET /api/progress/:lesson_id
pub async fn get_lesson(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedLearner>,
    Path(lesson_id): Path<String>,
) -> Result<Json<LessonProgressView>> {
    if state.catalog.lesson(&lesson_id).is_none() {
        return Err(ApiError::NotFound(format!("Lesson {lesson_id}")));
    }

    let progress = state
        .db
        .get_lesson_progress(auth.learner_id, &lesson_id)
        .await?
        .map(|p| p.to_core())
        .unwrap_or_else(|| LessonProgress::new(lesson_id));

    Ok(Json(progress.into()))
}
