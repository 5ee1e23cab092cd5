//! Tutor API tests.
//!
//! These tests require a running PostgreSQL database.
//! Set DATABASE_URL environment variable before running.

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;

use common::fixtures::{self, LESSON_ID};
use common::TestContext;

/// Test the tutor reports unavailable when no model is configured.
#[tokio::test]
#[ignore = "requires database"]
async fn test_tutor_unavailable_without_model() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let (learner_id, token) = ctx.create_test_learner(None).await;

    let response = server
        .post("/api/tutor/ask")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .json(&fixtures::tutor_request(Some(LESSON_ID), "How do I carry the one?"))
        .await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "unavailable");

    ctx.cleanup_learner(learner_id).await;
}
