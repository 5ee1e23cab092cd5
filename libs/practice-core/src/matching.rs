//! Answer normalization and checking.

use crate::types::{MatchingMode, Question};
use serde::{Deserialize, Serialize};

/// Punctuation that changes the meaning of a math answer and is kept.
const SIGNIFICANT_PUNCTUATION: &[char] = &['-', '/', '.', '^', '=', '%'];

/// Result of checking a submitted answer against a question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    /// Whether the answer is considered correct.
    pub is_correct: bool,
    /// Best similarity against any expected answer, 0.0 to 1.0.
    pub similarity: f64,
    /// The expected answer that matched, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_answer: Option<String>,
    /// The matching mode used.
    pub matching_mode: MatchingMode,
    /// Normalized submission (for display).
    pub normalized_submission: String,
    pub canonical_answer: String,
}

/// Normalize an answer for comparison.
///
/// Lowercases, drops whitespace and punctuation other than the math-significant
/// set, then strips a trailing period and a leading plus sign.
pub fn normalize_answer(s: &str) -> String {
    let mut out: String = s
        .chars()
        .map(|c| if c == '\u{2212}' { '-' } else { c })
        .filter(|c| !c.is_whitespace())
        .filter(|c| !c.is_ascii_punctuation() || SIGNIFICANT_PUNCTUATION.contains(c))
        .flat_map(char::to_lowercase)
        .collect();

    while out.ends_with('.') {
        out.pop();
    }
    if let Some(rest) = out.strip_prefix('+') {
        out = rest.to_string();
    }
    out
}

/// Compare two answers after normalization, treating equal numbers as equal.
pub fn answers_equivalent(a: &str, b: &str) -> bool {
    let a = normalize_answer(a);
    let b = normalize_answer(b);
    if a == b {
        return true;
    }
    match (parse_number(&a), parse_number(&b)) {
        (Some(x), Some(y)) => (x - y).abs() < 1e-9,
        _ => false,
    }
}

fn parse_number(s: &str) -> Option<f64> {
    // f64 parsing accepts "inf"/"nan", which are not answers.
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit() || c == '.' || c == '-') {
        return None;
    }
    s.parse::<f64>().ok()
}

/// True for answers made of words rather than numbers.
fn is_textual(answer: &str) -> bool {
    let normalized = normalize_answer(answer);
    parse_number(&normalized).is_none() && normalized.chars().any(char::is_alphabetic)
}

/// Signed number tokens of a normalized answer, in order.
///
/// `"12remainder3"` gives `["12", "3"]` and `"x=-7"` gives `["-7"]`.
fn numbers_in(normalized: &str) -> Vec<&str> {
    normalized
        .split(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-'))
        .filter(|token| token.chars().any(|c| c.is_ascii_digit()))
        .collect()
}

/// Check a submitted answer against a question's canonical and accepted answers.
pub fn check_answer(
    question: &Question,
    submitted: &str,
    mode: MatchingMode,
    fuzzy_threshold: f64,
) -> CheckResult {
    let normalized_submission = normalize_answer(submitted);
    let result = |is_correct: bool, similarity: f64, matched: Option<&str>| CheckResult {
        is_correct,
        similarity,
        matched_answer: matched.map(str::to_string),
        matching_mode: mode,
        normalized_submission: normalized_submission.clone(),
        canonical_answer: question.canonical_answer.clone(),
    };

    if normalized_submission.is_empty() {
        return result(false, 0.0, None);
    }

    match mode {
        MatchingMode::Exact => {
            let typed = collapse_whitespace(submitted);
            let matched = question
                .expected_answers()
                .find(|expected| collapse_whitespace(expected) == typed);
            result(matched.is_some(), if matched.is_some() { 1.0 } else { 0.0 }, matched)
        }
        MatchingMode::Normalized | MatchingMode::Fuzzy => {
            if let Some(matched) = question
                .expected_answers()
                .find(|expected| answers_equivalent(expected, submitted))
            {
                return result(true, 1.0, Some(matched));
            }

            let (best, similarity) = question
                .expected_answers()
                .map(|expected| {
                    let score = normalized_similarity(&normalize_answer(expected), &normalized_submission);
                    (expected, score)
                })
                .fold((None, 0.0_f64), |(best, top), (expected, score)| {
                    if score > top {
                        (Some(expected), score)
                    } else {
                        (best, top)
                    }
                });

            // Numbers are either right or wrong; "12346" is not close to "12345",
            // and "49 cm^2" is not close to "48 cm^2". Only the words may differ.
            let fuzzy_ok = mode == MatchingMode::Fuzzy
                && similarity >= fuzzy_threshold
                && best.is_some_and(|expected| {
                    is_textual(expected)
                        && numbers_in(&normalize_answer(expected)) == numbers_in(&normalized_submission)
                });

            if fuzzy_ok {
                result(true, similarity, best)
            } else {
                result(false, similarity, None)
            }
        }
    }
}

/// Trim and collapse runs of whitespace to single spaces.
fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Calculate Levenshtein distance between two strings.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Two rolling rows instead of the full matrix
    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;

        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);

            curr[j] = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Similarity in `[0, 1]` derived from the Levenshtein distance, per character.
pub fn normalized_similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }

    let distance = levenshtein_distance(a, b);
    1.0 - (distance as f64 / max_len as f64)
}
