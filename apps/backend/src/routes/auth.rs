//! Authentication middleware

use axum::{
    body::Body,
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::AppState;

/// Authenticated learner info stored in request extensions
#[derive(Clone, Debug)]
pub struct AuthenticatedLearner {
    pub learner_id: Uuid,
}

/// Auth middleware - resolves the learner from the Bearer token
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("Invalid Authorization format".to_string()))?;

    let learner = state
        .db
        .get_learner_by_token(token)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid learner token".to_string()))?;

    state.db.update_last_seen(learner.id).await?;

    request.extensions_mut().insert(AuthenticatedLearner {
        learner_id: learner.id,
    });

    Ok(next.run(request).await)
}
