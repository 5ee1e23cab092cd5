//! Deterministic per-lesson question banks.

use std::collections::HashSet;

use crate::generators::generator_for;
use crate::rng::XorShift32;
use crate::types::{Lesson, Question, QuestionSource};

/// Redraws allowed for one slot before it is skipped.
pub const MAX_DRAW_ATTEMPTS: usize = 8;

/// Id of the `index`-th generated question of a lesson.
pub fn generated_question_id(lesson_id: &str, index: usize) -> String {
    format!("{lesson_id}:gen:{index}")
}

/// Generate the bank for a lesson.
///
/// The PRNG is seeded from the lesson id, so the result only depends on the
/// lesson and `size`. A bank of size `n` is always a prefix of a larger bank.
/// Lessons without a topic produce an empty bank.
pub fn generate_bank(lesson: &Lesson, size: usize) -> Vec<Question> {
    let Some(topic) = lesson.topic else {
        return Vec::new();
    };

    let generator = generator_for(topic);
    let mut rng = XorShift32::from_seed(&lesson.id);
    let mut seen_prompts = HashSet::new();
    let mut questions = Vec::with_capacity(size);

    for _ in 0..size {
        for _ in 0..MAX_DRAW_ATTEMPTS {
            let draft = generator.generate(&mut rng, lesson.difficulty);
            if seen_prompts.insert(draft.prompt.clone()) {
                let id = generated_question_id(&lesson.id, questions.len());
                questions.push(draft.into_question(id, &lesson.id, QuestionSource::Generated));
                break;
            }
        }
    }

    questions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Difficulty, Topic};
    use pretty_assertions::assert_eq;

    fn lesson(id: &str, topic: Option<Topic>, difficulty: Difficulty) -> Lesson {
        Lesson {
            id: id.to_string(),
            title: id.to_string(),
            topic,
            difficulty,
        }
    }

    #[test]
    fn same_lesson_same_bank() {
        let l = lesson("fractions-medium", Some(Topic::Fractions), Difficulty::Medium);
        assert_eq!(generate_bank(&l, 20), generate_bank(&l, 20));
    }

    #[test]
    fn different_lessons_differ() {
        let a = lesson("addition-a", Some(Topic::Addition), Difficulty::Hard);
        let b = lesson("addition-b", Some(Topic::Addition), Difficulty::Hard);
        assert_ne!(generate_bank(&a, 10), generate_bank(&b, 10));
    }

    #[test]
    fn smaller_bank_is_prefix() {
        let l = lesson("exponents-hard", Some(Topic::Exponents), Difficulty::Hard);
        let small = generate_bank(&l, 5);
        let large = generate_bank(&l, 15);
        assert_eq!(small[..], large[..small.len()]);
    }

    #[test]
    fn ids_are_dense_and_scoped() {
        let l = lesson("area-easy", Some(Topic::Area), Difficulty::Easy);
        let bank = generate_bank(&l, 12);
        for (i, q) in bank.iter().enumerate() {
            assert_eq!(q.id, format!("area-easy:gen:{i}"));
            assert_eq!(q.lesson_id, "area-easy");
            assert_eq!(q.source, QuestionSource::Generated);
        }
    }

    #[test]
    fn prompts_are_unique() {
        // Easy exponents only have nine distinct questions.
        let l = lesson("exponents-easy", Some(Topic::Exponents), Difficulty::Easy);
        let bank = generate_bank(&l, 30);
        let prompts: HashSet<_> = bank.iter().map(|q| &q.prompt).collect();
        assert_eq!(prompts.len(), bank.len());
        assert!(bank.len() <= 9);
    }

    #[test]
    fn topicless_lesson_or_zero_size_is_empty() {
        let authored = lesson("capitals", None, Difficulty::Easy);
        assert!(generate_bank(&authored, 20).is_empty());

        let l = lesson("addition-easy", Some(Topic::Addition), Difficulty::Easy);
        assert!(generate_bank(&l, 0).is_empty());
    }
}
