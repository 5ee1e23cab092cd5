//! Practice flow: question rotation, AI fallback and answer checking.

use chrono::Utc;
use practice_core::{
    check_answer, ExhaustionPolicy, Lesson, Question, QuestionSource, Selection,
    UsedQuestions,
};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// Recent AI prompts sent back to the model so it does not repeat itself.
const RECENT_AI_PROMPTS: i64 = 20;

/// Marker in the ids of model-generated questions.
const AI_ID_MARKER: &str = ":ai:";

/// Serve the next practice question for a learner.
pub async fn next_question(
    state: &AppState,
    learner_id: Uuid,
    lesson_id: &str,
) -> Result<NextQuestionResponse> {
    let lesson = state
        .catalog
        .lesson(lesson_id)
        .ok_or_else(|| ApiError::NotFound(format!("Lesson {lesson_id}")))?;

    let bank = state.catalog.bank(lesson_id, state.config.bank_size);
    let used_ids = state.db.get_used_question_ids(learner_id, lesson_id).await?;
    let mut used = UsedQuestions::from_ids(lesson_id, used_ids);

    let (question, recycled) = match used.next_question(&bank, lesson_id, state.config.exhaustion_policy) {
        Selection::Fresh(q) => {
            state.db.mark_question_used(learner_id, lesson_id, &q.id).await?;
            (q.clone(), false)
        }
        Selection::Recycled(q) => {
            state.db.restart_rotation(learner_id, lesson_id, &q.id).await?;
            tracing::debug!("Learner {} restarted lesson {}", learner_id, lesson_id);
            (q.clone(), true)
        }
        Selection::Exhausted => match ai_question(state, learner_id, lesson, &bank).await? {
            Some(q) => {
                state.db.mark_question_used(learner_id, lesson_id, &q.id).await?;
                used.mark_used(lesson_id, q.id.clone());
                (q, false)
            }
            None => match used.next_question(&bank, lesson_id, ExhaustionPolicy::Cycle) {
                Selection::Fresh(q) | Selection::Recycled(q) => {
                    state.db.restart_rotation(learner_id, lesson_id, &q.id).await?;
                    (q.clone(), true)
                }
                Selection::Exhausted => {
                    return Err(ApiError::NotFound(format!(
                        "No questions available for lesson {lesson_id}"
                    )));
                }
            },
        },
    };

    Ok(NextQuestionResponse {
        question: PublicQuestion::from(&question),
        recycled,
        used_count: used.used_count(lesson_id),
        bank_size: bank.len(),
    })
}

/// Ask the model for a question. `None` when no model is configured or it fails.
async fn ai_question(
    state: &AppState,
    learner_id: Uuid,
    lesson: &Lesson,
    bank: &[Question],
) -> Result<Option<Question>> {
    let Some(llm) = state.llm.as_ref() else {
        return Ok(None);
    };

    let mut avoid: Vec<String> = bank.iter().map(|q| q.prompt.clone()).collect();
    avoid.extend(state.db.recent_ai_prompts(&lesson.id, RECENT_AI_PROMPTS).await?);

    let draft = match llm.generate_question(lesson, &avoid).await {
        Ok(draft) => draft,
        Err(e) => {
            tracing::warn!("AI question for lesson {} failed, cycling bank: {:#}", lesson.id, e);
            return Ok(None);
        }
    };

    let id = format!("{}{}{}", lesson.id, AI_ID_MARKER, Uuid::new_v4());
    let question = draft.into_question(id, &lesson.id, QuestionSource::Ai);

    state
        .db
        .insert_ai_question(&DbAiQuestion {
            id: question.id.clone(),
            lesson_id: question.lesson_id.clone(),
            learner_id: Some(learner_id),
            prompt: question.prompt.clone(),
            canonical_answer: question.canonical_answer.clone(),
            accepted_answers: question.accepted_answers.clone(),
            explanation: question.explanation.clone(),
            created_at: Utc::now(),
        })
        .await?;

    tracing::info!("Served AI question {} for lesson {}", question.id, lesson.id);
    Ok(Some(question))
}

/// Resolve a question id from the bank or the stored AI questions.
pub async fn find_question(state: &AppState, lesson_id: &str, question_id: &str) -> Result<Question> {
    let not_found = || ApiError::NotFound(format!("Question {question_id}"));

    if question_id.contains(AI_ID_MARKER) {
        let stored = state.db.get_ai_question(question_id).await?.ok_or_else(not_found)?;
        if stored.lesson_id != lesson_id {
            return Err(not_found());
        }
        return Ok(stored.to_question());
    }

    state
        .catalog
        .find_question(lesson_id, question_id, state.config.bank_size)
        .ok_or_else(not_found)
}

/// Check an answer, log the attempt and update lesson progress.
pub async fn submit_answer(
    state: &AppState,
    learner_id: Uuid,
    request: CheckAnswerRequest,
) -> Result<CheckAnswerResponse> {
    if request.answer.trim().is_empty() {
        return Err(ApiError::BadRequest("answer must not be empty".to_string()));
    }

    let question = find_question(state, &request.lesson_id, &request.question_id).await?;
    let result = check_answer(
        &question,
        &request.answer,
        state.config.matching_mode,
        state.config.fuzzy_threshold,
    );

    let progress = state
        .db
        .record_attempt(&DbAttempt {
            id: Uuid::new_v4(),
            learner_id,
            lesson_id: request.lesson_id,
            question_id: question.id.clone(),
            submitted_answer: request.answer,
            is_correct: result.is_correct,
            similarity: result.similarity,
            time_taken_ms: request.time_taken_ms,
            created_at: Utc::now(),
        })
        .await?
        .to_core();

    Ok(CheckAnswerResponse {
        is_correct: result.is_correct,
        similarity: result.similarity,
        canonical_answer: question.canonical_answer,
        explanation: question.explanation,
        progress,
    })
}
