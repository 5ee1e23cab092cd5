//! Test fixtures and factory functions for request bodies.

use serde_json::json;

/// A built-in lesson every catalog has.
pub const LESSON_ID: &str = "addition-easy";

/// Create a learner register request body.
pub fn learner_register_request(name: Option<&str>) -> serde_json::Value {
    match name {
        Some(n) => json!({ "name": n }),
        None => json!({}),
    }
}

/// Create a check answer request body.
pub fn check_answer_request(lesson_id: &str, question_id: &str, answer: &str) -> serde_json::Value {
    json!({
        "lesson_id": lesson_id,
        "question_id": question_id,
        "answer": answer,
        "time_taken_ms": 1500
    })
}

/// Create a reset practice request body.
pub fn reset_request(lesson_id: &str) -> serde_json::Value {
    json!({ "lesson_id": lesson_id })
}

/// Create a tutor request body.
pub fn tutor_request(lesson_id: Option<&str>, message: &str) -> serde_json::Value {
    json!({
        "lesson_id": lesson_id,
        "message": message,
        "history": []
    })
}
