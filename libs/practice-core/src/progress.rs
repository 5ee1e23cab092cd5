//! Per-lesson progress tracking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Attempts needed before a lesson can count as mastered.
pub const MASTERY_MIN_ATTEMPTS: u32 = 10;
/// Accuracy needed for mastery.
pub const MASTERY_ACCURACY: f64 = 0.8;

/// A learner's running record on one lesson.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonProgress {
    pub lesson_id: String,
    pub attempts: u32,
    pub correct: u32,
    pub current_streak: u32,
    pub best_streak: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_attempt_at: Option<DateTime<Utc>>,
}

impl LessonProgress {
    pub fn new(lesson_id: impl Into<String>) -> Self {
        Self {
            lesson_id: lesson_id.into(),
            attempts: 0,
            correct: 0,
            current_streak: 0,
            best_streak: 0,
            last_attempt_at: None,
        }
    }

    /// Record one checked answer.
    pub fn record(&mut self, correct: bool, now: DateTime<Utc>) {
        self.attempts += 1;
        if correct {
            self.correct += 1;
            self.current_streak += 1;
            self.best_streak = self.best_streak.max(self.current_streak);
        } else {
            self.current_streak = 0;
        }
        self.last_attempt_at = Some(now);
    }

    /// Fraction of attempts answered correctly, 0.0 with no attempts.
    pub fn accuracy(&self) -> f64 {
        if self.attempts == 0 {
            return 0.0;
        }
        f64::from(self.correct) / f64::from(self.attempts)
    }

    pub fn is_mastered(&self) -> bool {
        self.attempts >= MASTERY_MIN_ATTEMPTS && self.accuracy() >= MASTERY_ACCURACY
    }
}

/// Roll-up across every lesson a learner has touched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub lessons_started: usize,
    pub lessons_mastered: usize,
    pub total_lessons: usize,
    pub total_attempts: u32,
    pub total_correct: u32,
    pub accuracy: f64,
    /// Mastered lessons over total lessons.
    pub completion: f64,
}

impl ProgressSummary {
    pub fn from_lessons(progress: &[LessonProgress], total_lessons: usize) -> Self {
        let started: Vec<&LessonProgress> = progress.iter().filter(|p| p.attempts > 0).collect();
        let lessons_mastered = started.iter().filter(|p| p.is_mastered()).count();
        let total_attempts: u32 = started.iter().map(|p| p.attempts).sum();
        let total_correct: u32 = started.iter().map(|p| p.correct).sum();

        let accuracy = if total_attempts == 0 {
            0.0
        } else {
            f64::from(total_correct) / f64::from(total_attempts)
        };
        let completion = if total_lessons == 0 {
            0.0
        } else {
            lessons_mastered as f64 / total_lessons as f64
        };

        Self {
            lessons_started: started.len(),
            lessons_mastered,
            total_lessons,
            total_attempts,
            total_correct,
            accuracy,
            completion,
        }
    }
}
