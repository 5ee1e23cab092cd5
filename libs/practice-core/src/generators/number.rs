//! Number sense: fractions, percentages, powers and rounding.

use super::{draft, gcd, QuestionGenerator};
use crate::rng::XorShift32;
use crate::types::{Difficulty, QuestionDraft, Topic};

pub struct Fractions;

impl QuestionGenerator for Fractions {
    fn topic(&self) -> Topic {
        Topic::Fractions
    }

    fn generate(&self, rng: &mut XorShift32, difficulty: Difficulty) -> QuestionDraft {
        let (max_den, max_factor) = match difficulty {
            Difficulty::Easy => (6, 4),
            Difficulty::Medium => (10, 6),
            Difficulty::Hard => (12, 9),
        };

        let den = rng.range(2, max_den);
        // Step the numerator forward until it is coprime with the denominator;
        // 1 is always coprime so this terminates.
        let mut num = rng.range(1, den - 1);
        while gcd(num, den) != 1 {
            num -= 1;
        }
        let factor = rng.range(2, max_factor);
        let (big_num, big_den) = (num * factor, den * factor);

        draft(
            format!("Simplify {big_num}/{big_den} to lowest terms."),
            format!("{num}/{den}"),
            format!(
                "The greatest common factor of {big_num} and {big_den} is {factor}. \
                 Divide both by {factor}: {big_num} ÷ {factor} = {num} and {big_den} ÷ {factor} = {den}."
            ),
        )
    }
}

pub struct Percentages;

impl QuestionGenerator for Percentages {
    fn topic(&self) -> Topic {
        Topic::Percentages
    }

    fn generate(&self, rng: &mut XorShift32, difficulty: Difficulty) -> QuestionDraft {
        let percents: &[i64] = match difficulty {
            Difficulty::Easy => &[10, 25, 50],
            Difficulty::Medium => &[5, 15, 20, 30, 40, 60, 75],
            Difficulty::Hard => &[35, 45, 65, 85, 95],
        };
        let percent = rng.pick(percents).copied().unwrap_or(10);
        // Multiples of 20 keep every listed percentage a whole number.
        let whole = 20 * rng.range(1, 25);
        let result = percent * whole / 100;

        draft(
            format!("What is {percent}% of {whole}?"),
            result,
            format!("{percent}% means {percent}/100, so {whole} × {percent} ÷ 100 = {result}."),
        )
    }
}

pub struct Exponents;

impl QuestionGenerator for Exponents {
    fn topic(&self) -> Topic {
        Topic::Exponents
    }

    fn generate(&self, rng: &mut XorShift32, difficulty: Difficulty) -> QuestionDraft {
        let (base, exp) = match difficulty {
            Difficulty::Easy => (rng.range(2, 10), 2),
            Difficulty::Medium => (rng.range(2, 9), rng.range(2, 3)),
            Difficulty::Hard => (rng.range(2, 5), rng.range(3, 6)),
        };
        let value = base.pow(exp as u32);
        let expanded = vec![base.to_string(); exp as usize].join(" × ");

        draft(
            format!("What is {base}^{exp}?"),
            value,
            format!("{base}^{exp} means multiplying {base} by itself {exp} times: {expanded} = {value}."),
        )
    }
}

pub struct Rounding;

impl QuestionGenerator for Rounding {
    fn topic(&self) -> Topic {
        Topic::Rounding
    }

    fn generate(&self, rng: &mut XorShift32, difficulty: Difficulty) -> QuestionDraft {
        let (place, lo, hi) = match difficulty {
            Difficulty::Easy => (10, 11, 99),
            Difficulty::Medium => (100, 101, 999),
            Difficulty::Hard => (1000, 1001, 99_999),
        };
        let n = rng.range(lo, hi);
        let rounded = round_half_up(n, place);
        let remainder = n % place;
        let direction = if remainder * 2 >= place { "up" } else { "down" };

        draft(
            format!("Round {n} to the nearest {place}."),
            rounded,
            format!(
                "The part below the {place}s is {remainder}, which is {} half of {place}, so round {direction} to {rounded}.",
                if direction == "up" { "at least" } else { "less than" }
            ),
        )
    }
}

fn round_half_up(n: i64, place: i64) -> i64 {
    (n + place / 2) / place * place
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw_many(generator: &dyn QuestionGenerator, difficulty: Difficulty) -> Vec<QuestionDraft> {
        let mut rng = XorShift32::from_seed("number-tests");
        (0..200).map(|_| generator.generate(&mut rng, difficulty)).collect()
    }

    fn fraction(s: &str) -> (i64, i64) {
        let (n, d) = s.split_once('/').unwrap();
        (n.parse().unwrap(), d.parse().unwrap())
    }

    #[test]
    fn fraction_answers_are_lowest_terms() {
        for difficulty in Difficulty::ALL {
            for d in draw_many(&Fractions, difficulty) {
                let (num, den) = fraction(&d.canonical_answer);
                assert_eq!(gcd(num, den), 1, "{}", d.prompt);
                assert!(num < den);

                let shown = d
                    .prompt
                    .trim_start_matches("Simplify ")
                    .trim_end_matches(" to lowest terms.");
                let (big_num, big_den) = fraction(shown);
                assert_eq!(big_num * den, num * big_den);
                assert!(big_den > den);
            }
        }
    }

    #[test]
    fn percentages_are_whole_numbers() {
        for d in draw_many(&Percentages, Difficulty::Hard) {
            assert!(d.canonical_answer.parse::<i64>().is_ok(), "{}", d.prompt);
        }
    }

    #[test]
    fn exponent_values() {
        for d in draw_many(&Exponents, Difficulty::Hard) {
            let body = d.prompt.trim_start_matches("What is ").trim_end_matches('?');
            let (base, exp) = body.split_once('^').unwrap();
            let base: i64 = base.parse().unwrap();
            let exp: u32 = exp.parse().unwrap();
            assert!((3..=6).contains(&exp));
            assert_eq!(d.canonical_answer, base.pow(exp).to_string());
        }
    }

    #[test]
    fn rounds_half_up() {
        assert_eq!(round_half_up(45, 10), 50);
        assert_eq!(round_half_up(44, 10), 40);
        assert_eq!(round_half_up(1499, 1000), 1000);
        assert_eq!(round_half_up(1500, 1000), 2000);
        assert_eq!(round_half_up(950, 100), 1000);
    }

    #[test]
    fn rounding_answers_are_multiples_of_place() {
        for d in draw_many(&Rounding, Difficulty::Medium) {
            let rounded: i64 = d.canonical_answer.parse().unwrap();
            assert_eq!(rounded % 100, 0);
        }
    }
}
