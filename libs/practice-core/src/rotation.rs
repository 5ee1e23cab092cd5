//! Used-question tracking so a learner does not see repeats until a bank runs out.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::rng::XorShift32;
use crate::types::Question;

/// What to do once every question in a bank has been served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExhaustionPolicy {
    /// Start the bank over.
    Cycle,
    /// Report exhaustion so the caller can fetch a question elsewhere.
    #[default]
    Fallback,
}

impl ExhaustionPolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "cycle" => Some(Self::Cycle),
            "fallback" => Some(Self::Fallback),
            _ => None,
        }
    }
}

/// Outcome of asking for the next question.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selection<'a> {
    /// A question the learner has not seen in this pass.
    Fresh(&'a Question),
    /// The bank was exhausted and has been started over.
    Recycled(&'a Question),
    /// Nothing left to serve from this bank.
    Exhausted,
}

impl<'a> Selection<'a> {
    pub fn question(&self) -> Option<&'a Question> {
        match self {
            Self::Fresh(q) | Self::Recycled(q) => Some(q),
            Self::Exhausted => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct LessonUsage {
    used: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_served: Option<String>,
}

/// Per-lesson record of served question ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsedQuestions {
    lessons: BTreeMap<String, LessonUsage>,
}

impl UsedQuestions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild tracking for one lesson from stored ids.
    pub fn from_ids<I, S>(lesson_id: &str, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut used = Self::new();
        for id in ids {
            used.mark_used(lesson_id, id);
        }
        used
    }

    pub fn mark_used(&mut self, lesson_id: &str, question_id: impl Into<String>) {
        let usage = self.lessons.entry(lesson_id.to_string()).or_default();
        let id = question_id.into();
        usage.used.insert(id.clone());
        usage.last_served = Some(id);
    }

    pub fn is_used(&self, lesson_id: &str, question_id: &str) -> bool {
        self.lessons
            .get(lesson_id)
            .is_some_and(|u| u.used.contains(question_id))
    }

    pub fn used_count(&self, lesson_id: &str) -> usize {
        self.lessons.get(lesson_id).map_or(0, |u| u.used.len())
    }

    pub fn last_served(&self, lesson_id: &str) -> Option<&str> {
        self.lessons
            .get(lesson_id)
            .and_then(|u| u.last_served.as_deref())
    }

    /// Forget every served id for a lesson.
    pub fn reset(&mut self, lesson_id: &str) {
        self.lessons.remove(lesson_id);
    }

    /// Pick the next question from `bank` and record it.
    ///
    /// Unused questions are chosen with a PRNG seeded from the lesson id and
    /// the number already used, so a given history always yields the same pick.
    pub fn next_question<'a>(
        &mut self,
        bank: &'a [Question],
        lesson_id: &str,
        policy: ExhaustionPolicy,
    ) -> Selection<'a> {
        if bank.is_empty() {
            return Selection::Exhausted;
        }

        let used_count = self.used_count(lesson_id);
        let unused: Vec<&Question> = bank
            .iter()
            .filter(|q| !self.is_used(lesson_id, &q.id))
            .collect();

        let mut rng = XorShift32::from_seed(&format!("{lesson_id}#{used_count}"));

        if let Some(question) = rng.pick(&unused).copied() {
            self.mark_used(lesson_id, question.id.clone());
            return Selection::Fresh(question);
        }

        match policy {
            ExhaustionPolicy::Fallback => Selection::Exhausted,
            ExhaustionPolicy::Cycle => {
                let last = self.last_served(lesson_id).map(str::to_string);
                let candidates: Vec<&Question> = bank
                    .iter()
                    .filter(|q| bank.len() == 1 || last.as_deref() != Some(q.id.as_str()))
                    .collect();

                self.reset(lesson_id);
                match rng.pick(&candidates).copied() {
                    Some(question) => {
                        self.mark_used(lesson_id, question.id.clone());
                        Selection::Recycled(question)
                    }
                    None => Selection::Exhausted,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{QuestionDraft, QuestionSource};
    use std::collections::HashSet;

    fn bank(n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| {
                QuestionDraft {
                    prompt: format!("q{i}"),
                    canonical_answer: i.to_string(),
                    accepted_answers: vec![],
                    explanation: String::new(),
                }
                .into_question(format!("l:gen:{i}"), "l", QuestionSource::Generated)
            })
            .collect()
    }

    #[test]
    fn serves_every_question_once_before_exhausting() {
        let bank = bank(6);
        let mut used = UsedQuestions::new();
        let mut seen = HashSet::new();

        for _ in 0..6 {
            match used.next_question(&bank, "l", ExhaustionPolicy::Fallback) {
                Selection::Fresh(q) => assert!(seen.insert(q.id.clone())),
                other => panic!("expected fresh question, got {other:?}"),
            }
        }

        assert_eq!(used.used_count("l"), 6);
        assert_eq!(
            used.next_question(&bank, "l", ExhaustionPolicy::Fallback),
            Selection::Exhausted
        );
        assert_eq!(used.used_count("l"), 6);
    }

    #[test]
    fn cycle_restarts_and_avoids_immediate_repeat() {
        let bank = bank(3);
        let mut used = UsedQuestions::new();
        for _ in 0..3 {
            used.next_question(&bank, "l", ExhaustionPolicy::Cycle);
        }
        let last = used.last_served("l").unwrap().to_string();

        match used.next_question(&bank, "l", ExhaustionPolicy::Cycle) {
            Selection::Recycled(q) => assert_ne!(q.id, last),
            other => panic!("expected recycled question, got {other:?}"),
        }
        assert_eq!(used.used_count("l"), 1);
    }

    #[test]
    fn single_question_bank_can_repeat_when_cycling() {
        let bank = bank(1);
        let mut used = UsedQuestions::new();
        assert!(matches!(
            used.next_question(&bank, "l", ExhaustionPolicy::Cycle),
            Selection::Fresh(_)
        ));
        assert!(matches!(
            used.next_question(&bank, "l", ExhaustionPolicy::Cycle),
            Selection::Recycled(_)
        ));
    }

    #[test]
    fn empty_bank_is_exhausted() {
        let mut used = UsedQuestions::new();
        assert_eq!(
            used.next_question(&[], "l", ExhaustionPolicy::Cycle),
            Selection::Exhausted
        );
    }

    #[test]
    fn selection_is_deterministic_for_same_history() {
        let bank = bank(10);
        let mut a = UsedQuestions::from_ids("l", ["l:gen:3", "l:gen:7"]);
        let mut b = UsedQuestions::from_ids("l", ["l:gen:7", "l:gen:3"]);

        let qa = a.next_question(&bank, "l", ExhaustionPolicy::Fallback).question().map(|q| q.id.clone());
        let qb = b.next_question(&bank, "l", ExhaustionPolicy::Fallback).question().map(|q| q.id.clone());
        assert_eq!(qa, qb);
        assert_ne!(qa.as_deref(), Some("l:gen:3"));
    }

    #[test]
    fn lessons_are_tracked_separately() {
        let mut used = UsedQuestions::new();
        used.mark_used("a", "a:gen:0");
        assert!(used.is_used("a", "a:gen:0"));
        assert!(!used.is_used("b", "a:gen:0"));
        used.reset("a");
        assert_eq!(used.used_count("a"), 0);
    }

    #[test]
    fn survives_serde_round_trip() {
        let mut used = UsedQuestions::new();
        used.mark_used("l", "l:gen:1");
        let json = serde_json::to_string(&used).unwrap();
        let back: UsedQuestions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, used);
    }
}
