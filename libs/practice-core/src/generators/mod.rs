//! Per-topic question generators.
//!
//! Every generator is a pure function of the PRNG state and the difficulty,
//! so a bank seeded from the same lesson id is always identical.

pub mod algebra;
pub mod arithmetic;
pub mod geometry;
pub mod number;

use crate::rng::XorShift32;
use crate::types::{Difficulty, QuestionDraft, Topic};

/// Trait implemented by every topic generator.
pub trait QuestionGenerator: Send + Sync {
    /// Topic this generator produces questions for.
    fn topic(&self) -> Topic;

    /// Draw one question.
    fn generate(&self, rng: &mut XorShift32, difficulty: Difficulty) -> QuestionDraft;
}

/// Get the generator for a topic.
pub fn generator_for(topic: Topic) -> Box<dyn QuestionGenerator> {
    match topic {
        Topic::Addition => Box::new(arithmetic::Addition),
        Topic::Subtraction => Box::new(arithmetic::Subtraction),
        Topic::Multiplication => Box::new(arithmetic::Multiplication),
        Topic::Division => Box::new(arithmetic::Division),
        Topic::Fractions => Box::new(number::Fractions),
        Topic::Percentages => Box::new(number::Percentages),
        Topic::LinearEquations => Box::new(algebra::LinearEquations),
        Topic::Exponents => Box::new(number::Exponents),
        Topic::Area => Box::new(geometry::Area),
        Topic::Rounding => Box::new(number::Rounding),
    }
}

pub(crate) fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

pub(crate) fn draft(prompt: String, answer: impl ToString, explanation: String) -> QuestionDraft {
    QuestionDraft {
        prompt,
        canonical_answer: answer.to_string(),
        accepted_answers: Vec::new(),
        explanation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_topic_has_a_matching_generator() {
        for topic in Topic::ALL {
            assert_eq!(generator_for(topic).topic(), topic);
        }
    }

    #[test]
    fn gcd_handles_signs_and_zero() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(-12, 18), 6);
        assert_eq!(gcd(7, 0), 7);
        assert_eq!(gcd(13, 5), 1);
    }

    #[test]
    fn generators_are_deterministic() {
        for topic in Topic::ALL {
            for difficulty in Difficulty::ALL {
                let generator = generator_for(topic);
                let mut a = XorShift32::from_seed("determinism");
                let mut b = XorShift32::from_seed("determinism");
                assert_eq!(
                    generator.generate(&mut a, difficulty),
                    generator.generate(&mut b, difficulty)
                );
            }
        }
    }

    #[test]
    fn drafts_are_complete() {
        let mut rng = XorShift32::from_seed("complete");
        for topic in Topic::ALL {
            for difficulty in Difficulty::ALL {
                let d = generator_for(topic).generate(&mut rng, difficulty);
                assert!(!d.prompt.is_empty(), "{topic} prompt");
                assert!(!d.canonical_answer.is_empty(), "{topic} answer");
                assert!(!d.explanation.is_empty(), "{topic} explanation");
            }
        }
    }
}
