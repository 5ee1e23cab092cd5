//! Learner registration and status endpoints

use axum::{extract::State, Extension, Json};

use crate::error::{ApiError, Result};
use crate::models::{LearnerRegisterRequest, LearnerRegisterResponse, LearnerStatusResponse};
use crate::routes::auth::AuthenticatedLearner;
use crate::AppState;

/// POST /api/learner/register
/// Creates a learner and returns the token. The body is optional.
/// Only the token hash is stored, so the token cannot be shown again.
pub async fn register(
    State(state): State<AppState>,
    payload: Option<Json<LearnerRegisterRequest>>,
) -> Result<Json<LearnerRegisterResponse>> {
    let name = payload
        .and_then(|Json(p)| p.name)
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());
    let (learner, token) = state.db.create_learner(name.as_deref()).await?;

    tracing::info!("Registered new learner: {}", learner.id);

    Ok(Json(LearnerRegisterResponse {
        learner_id: learner.id,
        token,
    }))
}

/// GET /api/learner/status
pub async fn status(
    Extension(auth): Extension<AuthenticatedLearner>,
    State(state): State<AppState>,
) -> Result<Json<LearnerStatusResponse>> {
    let learner = state
        .db
        .get_learner(auth.learner_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Learner not found".to_string()))?;

    Ok(Json(LearnerStatusResponse {
        learner_id: learner.id,
        name: learner.name,
        last_seen_at: learner.last_seen_at,
    }))
}
