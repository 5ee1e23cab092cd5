//! Database models and API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// Re-export shared types from practice-core
pub use practice_core::{
    Difficulty, Lesson, LessonProgress, MatchingMode, ProgressSummary, Question,
    QuestionDraft, QuestionSource, Topic,
};
pub use practice_core::tutor::ChatMessage;

// === Database Entity Types ===

/// Registered learner. Only a hash of the token is stored.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Learner {
    pub id: Uuid,
    pub token_hash: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

/// Question produced by the model and kept so answers can be checked later.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAiQuestion {
    pub id: String,
    pub lesson_id: String,
    pub learner_id: Option<Uuid>,
    pub prompt: String,
    pub canonical_answer: String,
    pub accepted_answers: Vec<String>,
    pub explanation: String,
    pub created_at: DateTime<Utc>,
}

impl DbAiQuestion {
    /// Convert to practice-core Question
    pub fn to_question(&self) -> Question {
        Question {
            id: self.id.clone(),
            lesson_id: self.lesson_id.clone(),
            prompt: self.prompt.clone(),
            canonical_answer: self.canonical_answer.clone(),
            accepted_answers: self.accepted_answers.clone(),
            explanation: self.explanation.clone(),
            source: QuestionSource::Ai,
        }
    }
}

/// Checked answer log entry
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAttempt {
    pub id: Uuid,
    pub learner_id: Uuid,
    pub lesson_id: String,
    pub question_id: String,
    pub submitted_answer: String,
    pub is_correct: bool,
    pub similarity: f64,
    pub time_taken_ms: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Lesson progress row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbLessonProgress {
    pub learner_id: Uuid,
    pub lesson_id: String,
    pub attempts: i32,
    pub correct: i32,
    pub current_streak: i32,
    pub best_streak: i32,
    pub last_attempt_at: Option<DateTime<Utc>>,
}

impl DbLessonProgress {
    /// Create from practice-core LessonProgress
    pub fn from_core(learner_id: Uuid, progress: &LessonProgress) -> Self {
        Self {
            learner_id,
            lesson_id: progress.lesson_id.clone(),
            attempts: progress.attempts as i32,
            correct: progress.correct as i32,
            current_streak: progress.current_streak as i32,
            best_streak: progress.best_streak as i32,
            last_attempt_at: progress.last_attempt_at,
        }
    }

    /// Convert to practice-core LessonProgress
    pub fn to_core(&self) -> LessonProgress {
        LessonProgress {
            lesson_id: self.lesson_id.clone(),
            attempts: self.attempts.max(0) as u32,
            correct: self.correct.max(0) as u32,
            current_streak: self.current_streak.max(0) as u32,
            best_streak: self.best_streak.max(0) as u32,
            last_attempt_at: self.last_attempt_at,
        }
    }
}

// === API Request/Response Types ===

// Learner types
#[derive(Debug, Serialize, Deserialize)]
pub struct LearnerRegisterRequest {
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LearnerRegisterResponse {
    pub learner_id: Uuid,
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LearnerStatusResponse {
    pub learner_id: Uuid,
    pub name: Option<String>,
    pub last_seen_at: DateTime<Utc>,
}

// Lesson types
#[derive(Debug, Serialize, Deserialize)]
pub struct LessonSummary {
    #[serde(flatten)]
    pub lesson: Lesson,
    pub question_count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LessonListResponse {
    pub lessons: Vec<LessonSummary>,
}

/// Question as shown to a learner, without answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicQuestion {
    pub id: String,
    pub lesson_id: String,
    pub prompt: String,
    pub source: QuestionSource,
}

impl From<&Question> for PublicQuestion {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id.clone(),
            lesson_id: q.lesson_id.clone(),
            prompt: q.prompt.clone(),
            source: q.source,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LessonQuestionsResponse {
    pub lesson_id: String,
    pub questions: Vec<PublicQuestion>,
}

// Practice types
#[derive(Debug, Serialize, Deserialize)]
pub struct NextQuestionQuery {
    pub lesson_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NextQuestionResponse {
    pub question: PublicQuestion,
    /// True when the bank was exhausted and started over.
    pub recycled: bool,
    pub used_count: usize,
    pub bank_size: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckAnswerRequest {
    pub lesson_id: String,
    pub question_id: String,
    pub answer: String,
    pub time_taken_ms: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckAnswerResponse {
    pub is_correct: bool,
    pub similarity: f64,
    pub canonical_answer: String,
    pub explanation: String,
    pub progress: LessonProgress,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResetPracticeRequest {
    pub lesson_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResetPracticeResponse {
    pub cleared: usize,
}

// Progress types
#[derive(Debug, Serialize, Deserialize)]
pub struct ProgressResponse {
    pub summary: ProgressSummary,
    pub lessons: Vec<LessonProgressView>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LessonProgressView {
    #[serde(flatten)]
    pub progress: LessonProgress,
    pub accuracy: f64,
    pub mastered: bool,
}

impl From<LessonProgress> for LessonProgressView {
    fn from(progress: LessonProgress) -> Self {
        Self {
            accuracy: progress.accuracy(),
            mastered: progress.is_mastered(),
            progress,
        }
    }
}

// Tutor types
#[derive(Debug, Serialize, Deserialize)]
pub struct TutorAskRequest {
    pub lesson_id: Option<String>,
    pub question_id: Option<String>,
    pub message: String,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TutorAskResponse {
    pub reply: String,
}
