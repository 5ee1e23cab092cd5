//! Area of simple shapes.

use super::{draft, QuestionGenerator};
use crate::rng::XorShift32;
use crate::types::{Difficulty, QuestionDraft, Topic};

pub struct Area;

impl QuestionGenerator for Area {
    fn topic(&self) -> Topic {
        Topic::Area
    }

    fn generate(&self, rng: &mut XorShift32, difficulty: Difficulty) -> QuestionDraft {
        let (mut question, area) = match difficulty {
            Difficulty::Easy | Difficulty::Medium => {
                let hi = if difficulty == Difficulty::Easy { 10 } else { 25 };
                let width = rng.range(2, hi);
                let height = rng.range(2, hi);
                let area = width * height;
                (
                    draft(
                        format!(
                            "A rectangle is {width} cm wide and {height} cm tall. What is its area in square centimetres?"
                        ),
                        area,
                        format!("Area of a rectangle is width × height: {width} × {height} = {area} cm²."),
                    ),
                    area,
                )
            }
            Difficulty::Hard => {
                // Even base keeps the area whole.
                let base = 2 * rng.range(2, 15);
                let height = rng.range(3, 20);
                let area = base * height / 2;
                (
                    draft(
                        format!(
                            "A triangle has a base of {base} cm and a height of {height} cm. What is its area in square centimetres?"
                        ),
                        area,
                        format!(
                            "Area of a triangle is half of base × height: {base} × {height} ÷ 2 = {area} cm²."
                        ),
                    ),
                    area,
                )
            }
        };

        question.accepted_answers = ["cm^2", "cm2", "cm²", "sq cm"]
            .iter()
            .map(|unit| format!("{area} {unit}"))
            .collect();
        question
    }
}
