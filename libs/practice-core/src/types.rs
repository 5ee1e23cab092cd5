//! Core types for lessons and practice questions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Topic a lesson's generated questions are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Fractions,
    Percentages,
    LinearEquations,
    Exponents,
    Area,
    Rounding,
}

impl Topic {
    pub const ALL: [Topic; 10] = [
        Topic::Addition,
        Topic::Subtraction,
        Topic::Multiplication,
        Topic::Division,
        Topic::Fractions,
        Topic::Percentages,
        Topic::LinearEquations,
        Topic::Exponents,
        Topic::Area,
        Topic::Rounding,
    ];

    /// Get the topic name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Addition => "addition",
            Self::Subtraction => "subtraction",
            Self::Multiplication => "multiplication",
            Self::Division => "division",
            Self::Fractions => "fractions",
            Self::Percentages => "percentages",
            Self::LinearEquations => "linear_equations",
            Self::Exponents => "exponents",
            Self::Area => "area",
            Self::Rounding => "rounding",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }

    /// Human readable name used in lesson titles.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Addition => "Addition",
            Self::Subtraction => "Subtraction",
            Self::Multiplication => "Multiplication",
            Self::Division => "Division",
            Self::Fractions => "Fractions",
            Self::Percentages => "Percentages",
            Self::LinearEquations => "Linear Equations",
            Self::Exponents => "Exponents",
            Self::Area => "Area",
            Self::Rounding => "Rounding",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Difficulty band, scales the number ranges used by generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a question came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionSource {
    Generated,
    Authored,
    Ai,
}

impl QuestionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Generated => "generated",
            Self::Authored => "authored",
            Self::Ai => "ai",
        }
    }
}

/// A lesson in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: String,
    pub title: String,
    /// `None` for lessons that only have authored questions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<Topic>,
    pub difficulty: Difficulty,
}

/// A practice question with everything needed to check an answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub lesson_id: String,
    pub prompt: String,
    pub canonical_answer: String,
    pub accepted_answers: Vec<String>,
    pub explanation: String,
    pub source: QuestionSource,
}

impl Question {
    /// Canonical answer followed by every accepted alternate.
    pub fn expected_answers(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.canonical_answer.as_str())
            .chain(self.accepted_answers.iter().map(String::as_str))
    }
}

/// Generator or model output before an id is assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub prompt: String,
    #[serde(alias = "answer")]
    pub canonical_answer: String,
    #[serde(default)]
    pub accepted_answers: Vec<String>,
    #[serde(default)]
    pub explanation: String,
}

impl QuestionDraft {
    pub fn into_question(self, id: String, lesson_id: &str, source: QuestionSource) -> Question {
        Question {
            id,
            lesson_id: lesson_id.to_string(),
            prompt: self.prompt,
            canonical_answer: self.canonical_answer,
            accepted_answers: self.accepted_answers,
            explanation: self.explanation,
            source,
        }
    }
}

/// How typed answers are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingMode {
    Exact,
    Normalized,
    #[default]
    Fuzzy,
}

impl MatchingMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "exact" => Some(Self::Exact),
            "normalized" => Some(Self::Normalized),
            "fuzzy" => Some(Self::Fuzzy),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_round_trips_through_str() {
        for topic in Topic::ALL {
            assert_eq!(Topic::from_str(topic.as_str()), Some(topic));
        }
        assert_eq!(Topic::from_str("calculus"), None);
    }

    #[test]
    fn topic_serde_matches_as_str() {
        let json = serde_json::to_string(&Topic::LinearEquations).unwrap();
        assert_eq!(json, "\"linear_equations\"");
    }

    #[test]
    fn expected_answers_lists_canonical_first() {
        let q = QuestionDraft {
            prompt: "What is 7 / 2?".into(),
            canonical_answer: "3 r 1".into(),
            accepted_answers: vec!["3 remainder 1".into()],
            explanation: String::new(),
        }
        .into_question("l:gen:0".into(), "l", QuestionSource::Generated);

        let all: Vec<&str> = q.expected_answers().collect();
        assert_eq!(all, vec!["3 r 1", "3 remainder 1"]);
        assert_eq!(q.lesson_id, "l");
    }

    #[test]
    fn draft_accepts_answer_alias() {
        let draft: QuestionDraft =
            serde_json::from_str(r#"{"prompt":"2+2?","answer":"4"}"#).unwrap();
        assert_eq!(draft.canonical_answer, "4");
        assert!(draft.accepted_answers.is_empty());
    }
}
