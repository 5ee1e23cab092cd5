//! Core practice library shared by the backend and any client.
//!
//! Provides:
//! - Seeded question banks (FNV-1a seed hash, xorshift32 PRNG, per-topic generators)
//! - Answer normalization and checking
//! - Used-question rotation so repeats wait until a bank is exhausted
//! - Markdown parser for authored question banks
//! - Progress tracking and tutor prompt helpers

pub mod bank;
pub mod catalog;
pub mod error;
pub mod generators;
pub mod matching;
pub mod parser;
pub mod progress;
pub mod rng;
pub mod rotation;
pub mod seed;
pub mod tutor;
pub mod types;

pub use bank::generate_bank;
pub use catalog::Catalog;
pub use error::{ParseError, Result, TutorError};
pub use generators::{generator_for, QuestionGenerator};
pub use matching::{
    answers_equivalent, check_answer, levenshtein_distance, normalize_answer,
    normalized_similarity, CheckResult,
};
pub use parser::{parse, AuthoredBank, RawQuestion};
pub use progress::{LessonProgress, ProgressSummary};
pub use rng::XorShift32;
pub use rotation::{ExhaustionPolicy, Selection, UsedQuestions};
pub use seed::hash_seed;
pub use types::{
    Difficulty, Lesson, MatchingMode, Question, QuestionDraft, QuestionSource, Topic,
};
