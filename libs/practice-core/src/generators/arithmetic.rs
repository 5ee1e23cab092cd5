//! Whole-number arithmetic: the four basic operations.

use super::{draft, QuestionGenerator};
use crate::rng::XorShift32;
use crate::types::{Difficulty, QuestionDraft, Topic};

pub struct Addition;

impl QuestionGenerator for Addition {
    fn topic(&self) -> Topic {
        Topic::Addition
    }

    fn generate(&self, rng: &mut XorShift32, difficulty: Difficulty) -> QuestionDraft {
        let (lo, hi) = match difficulty {
            Difficulty::Easy => (1, 20),
            Difficulty::Medium => (10, 99),
            Difficulty::Hard => (100, 999),
        };
        let a = rng.range(lo, hi);
        let b = rng.range(lo, hi);
        let sum = a + b;

        draft(
            format!("What is {a} + {b}?"),
            sum,
            format!("Add the two numbers: {a} + {b} = {sum}."),
        )
    }
}

pub struct Subtraction;

impl QuestionGenerator for Subtraction {
    fn topic(&self) -> Topic {
        Topic::Subtraction
    }

    fn generate(&self, rng: &mut XorShift32, difficulty: Difficulty) -> QuestionDraft {
        let (a, b) = match difficulty {
            Difficulty::Easy => {
                let a = rng.range(2, 20);
                (a, rng.range(1, a))
            }
            Difficulty::Medium => {
                let a = rng.range(20, 99);
                (a, rng.range(10, a))
            }
            // Hard questions may go below zero.
            Difficulty::Hard => (rng.range(10, 500), rng.range(10, 500)),
        };
        let diff = a - b;

        let explanation = if diff < 0 {
            format!(
                "{b} is larger than {a}, so the result is negative: {a} - {b} = -({b} - {a}) = {diff}."
            )
        } else {
            format!("Take {b} away from {a}: {a} - {b} = {diff}.")
        };

        draft(format!("What is {a} - {b}?"), diff, explanation)
    }
}

pub struct Multiplication;

impl QuestionGenerator for Multiplication {
    fn topic(&self) -> Topic {
        Topic::Multiplication
    }

    fn generate(&self, rng: &mut XorShift32, difficulty: Difficulty) -> QuestionDraft {
        let (lo, hi) = match difficulty {
            Difficulty::Easy => (2, 10),
            Difficulty::Medium => (3, 15),
            Difficulty::Hard => (11, 30),
        };
        let a = rng.range(lo, hi);
        let b = rng.range(lo, hi);
        let product = a * b;

        draft(
            format!("What is {a} × {b}?"),
            product,
            format!("{a} groups of {b} make {product}, so {a} × {b} = {product}."),
        )
    }
}

pub struct Division;

impl QuestionGenerator for Division {
    fn topic(&self) -> Topic {
        Topic::Division
    }

    fn generate(&self, rng: &mut XorShift32, difficulty: Difficulty) -> QuestionDraft {
        match difficulty {
            Difficulty::Easy | Difficulty::Medium => {
                let (lo, hi) = if difficulty == Difficulty::Easy { (2, 10) } else { (3, 12) };
                let divisor = rng.range(lo, hi);
                let quotient = rng.range(2, hi);
                let dividend = divisor * quotient;

                draft(
                    format!("What is {dividend} ÷ {divisor}?"),
                    quotient,
                    format!("{divisor} × {quotient} = {dividend}, so {dividend} ÷ {divisor} = {quotient}."),
                )
            }
            Difficulty::Hard => {
                let divisor = rng.range(3, 12);
                let quotient = rng.range(5, 25);
                let remainder = rng.range(1, divisor - 1);
                let dividend = divisor * quotient + remainder;

                let mut question = draft(
                    format!("What is {dividend} ÷ {divisor}? Give the answer as a quotient and remainder, like 7 r 2."),
                    format!("{quotient} r {remainder}"),
                    format!(
                        "{divisor} × {quotient} = {}, which leaves {dividend} - {} = {remainder}. The answer is {quotient} r {remainder}.",
                        divisor * quotient,
                        divisor * quotient
                    ),
                );
                question.accepted_answers = vec![
                    format!("{quotient} remainder {remainder}"),
                    format!("{quotient} R{remainder}"),
                ];
                question
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw_many(
        generator: &dyn QuestionGenerator,
        difficulty: Difficulty,
    ) -> Vec<QuestionDraft> {
        let mut rng = XorShift32::from_seed("arithmetic-tests");
        (0..200).map(|_| generator.generate(&mut rng, difficulty)).collect()
    }

    fn operands(prompt: &str, op: &str) -> (i64, i64) {
        let body = prompt
            .trim_start_matches("What is ")
            .split('?')
            .next()
            .unwrap();
        let mut parts = body.split(op).map(|p| p.trim().parse::<i64>().unwrap());
        (parts.next().unwrap(), parts.next().unwrap())
    }

    #[test]
    fn addition_answers_are_sums() {
        for d in draw_many(&Addition, Difficulty::Medium) {
            let (a, b) = operands(&d.prompt, "+");
            assert!((10..=99).contains(&a) && (10..=99).contains(&b));
            assert_eq!(d.canonical_answer, (a + b).to_string());
        }
    }

    #[test]
    fn easy_subtraction_never_goes_negative() {
        for d in draw_many(&Subtraction, Difficulty::Easy) {
            let (a, b) = operands(&d.prompt, "-");
            assert!(a >= b);
            assert_eq!(d.canonical_answer, (a - b).to_string());
        }
    }

    #[test]
    fn hard_subtraction_can_go_negative() {
        let negatives = draw_many(&Subtraction, Difficulty::Hard)
            .iter()
            .filter(|d| d.canonical_answer.starts_with('-'))
            .count();
        assert!(negatives > 0);
    }

    #[test]
    fn multiplication_answers_are_products() {
        for d in draw_many(&Multiplication, Difficulty::Hard) {
            let (a, b) = operands(&d.prompt, "×");
            assert_eq!(d.canonical_answer, (a * b).to_string());
        }
    }

    #[test]
    fn easy_division_is_exact() {
        for d in draw_many(&Division, Difficulty::Easy) {
            let (a, b) = operands(&d.prompt, "÷");
            assert_eq!(a % b, 0);
            assert_eq!(d.canonical_answer, (a / b).to_string());
        }
    }

    #[test]
    fn hard_division_has_remainder() {
        for d in draw_many(&Division, Difficulty::Hard) {
            let (a, b) = operands(&d.prompt, "÷");
            let expected = format!("{} r {}", a / b, a % b);
            assert!(a % b > 0);
            assert_eq!(d.canonical_answer, expected);
            assert_eq!(d.accepted_answers.len(), 2);
        }
    }
}
