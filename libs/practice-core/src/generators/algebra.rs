//! One-variable linear equations.

use super::{draft, QuestionGenerator};
use crate::rng::XorShift32;
use crate::types::{Difficulty, QuestionDraft, Topic};

pub struct LinearEquations;

impl QuestionGenerator for LinearEquations {
    fn topic(&self) -> Topic {
        Topic::LinearEquations
    }

    fn generate(&self, rng: &mut XorShift32, difficulty: Difficulty) -> QuestionDraft {
        let mut question = match difficulty {
            Difficulty::Easy => {
                let x = rng.range(1, 20);
                let b = rng.range(1, 20);
                let c = x + b;
                draft(
                    format!("Solve for x: x + {b} = {c}"),
                    x,
                    format!("Subtract {b} from both sides: x = {c} - {b} = {x}."),
                )
            }
            Difficulty::Medium => {
                let a = rng.range(2, 9);
                let x = rng.range(1, 12);
                let b = rng.range(1, 30);
                let c = a * x + b;
                draft(
                    format!("Solve for x: {a}x + {b} = {c}"),
                    x,
                    format!(
                        "Subtract {b} from both sides to get {a}x = {}, then divide by {a}: x = {x}.",
                        c - b
                    ),
                )
            }
            Difficulty::Hard => {
                let a = rng.range(2, 12);
                let mut x = rng.range(1, 15);
                if rng.chance(0.5) {
                    x = -x;
                }
                let b = rng.range(1, 40);
                let c = a * x - b;
                draft(
                    format!("Solve for x: {a}x - {b} = {c}"),
                    x,
                    format!(
                        "Add {b} to both sides to get {a}x = {}, then divide by {a}: x = {x}.",
                        c + b
                    ),
                )
            }
        };

        question.accepted_answers = vec![format!("x = {}", question.canonical_answer)];
        question
    }
}
