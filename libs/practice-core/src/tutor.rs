//! Prompt construction and reply post-processing for the homework tutor.
//!
//! Nothing here talks to the network; the backend sends these messages to an
//! OpenAI-compatible chat endpoint.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::TutorError;
use crate::types::{Lesson, Question, QuestionDraft};

/// Oldest history turns beyond this are dropped.
pub const MAX_HISTORY_TURNS: usize = 12;

/// Prompts passed back to the model when asking for a fresh question.
const MAX_AVOID_PROMPTS: usize = 20;

const TUTOR_SYSTEM_PROMPT: &str = "You are a patient homework tutor for school students. \
Guide the student towards the answer one step at a time. Ask short questions that check \
their understanding. Never state the final answer outright, even if asked directly; \
confirm it only after the student has produced it. Write maths in LaTeX using $...$ \
for inline expressions and $$...$$ for display expressions. Keep replies under 150 words.";

const QUESTION_SYSTEM_PROMPT: &str = "You write practice questions for school students. \
Reply with exactly one JSON object and nothing else, using the keys \"prompt\", \
\"answer\", \"accepted_answers\" (array of alternative correct answers, may be empty) and \
\"explanation\" (a short worked solution). Answers must be short: a number, fraction or a \
few words.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// Build the conversation for a tutor turn.
///
/// Any system messages in `history` are discarded; only the tutor prompt may
/// set instructions.
pub fn tutor_messages(
    lesson: Option<&Lesson>,
    question: Option<&Question>,
    history: &[ChatMessage],
    message: &str,
) -> Vec<ChatMessage> {
    let mut system = TUTOR_SYSTEM_PROMPT.to_string();
    if let Some(lesson) = lesson {
        system.push_str(&format!("\n\nThe student is working on the lesson \"{}\".", lesson.title));
    }
    if let Some(question) = question {
        system.push_str(&format!(
            "\nThe current practice question is: {}\nFor your reference only, the correct answer is: {}",
            question.prompt, question.canonical_answer
        ));
    }

    let turns: Vec<&ChatMessage> = history
        .iter()
        .filter(|m| m.role != ChatRole::System)
        .collect();
    let skip = turns.len().saturating_sub(MAX_HISTORY_TURNS);

    let mut messages = Vec::with_capacity(turns.len() - skip + 2);
    messages.push(ChatMessage::system(system));
    messages.extend(turns.into_iter().skip(skip).cloned());
    messages.push(ChatMessage::user(message.trim()));
    messages
}

/// Build the request for one new question in a lesson.
pub fn question_request_messages(lesson: &Lesson, avoid_prompts: &[String]) -> Vec<ChatMessage> {
    let mut request = format!(
        "Write one new {} practice question for the lesson \"{}\".",
        lesson.difficulty.as_str(),
        lesson.title
    );
    if let Some(topic) = lesson.topic {
        request.push_str(&format!(" The topic is {}.", topic.display_name()));
    }

    let skip = avoid_prompts.len().saturating_sub(MAX_AVOID_PROMPTS);
    let avoid: Vec<&str> = avoid_prompts[skip..].iter().map(String::as_str).collect();
    if !avoid.is_empty() {
        request.push_str("\nDo not repeat any of these questions:\n- ");
        request.push_str(&avoid.join("\n- "));
    }

    vec![ChatMessage::system(QUESTION_SYSTEM_PROMPT), ChatMessage::user(request)]
}

static FENCED_JSON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(?:json)?\s*(\{.*?\})\s*```").expect("valid regex"));
static DISPLAY_MATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\\\[(.+?)\\\]").expect("valid regex"));
static INLINE_MATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\\\((.+?)\\\)").expect("valid regex"));
static TRAILING_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)[ \t]+$").expect("valid regex"));
static EXTRA_BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

/// Parse a model reply into a question draft.
pub fn parse_generated_question(reply: &str) -> Result<QuestionDraft, TutorError> {
    let json = match FENCED_JSON.captures(reply) {
        Some(caps) => caps.get(1).map_or("", |m| m.as_str()),
        None => {
            let start = reply.find('{').ok_or(TutorError::MissingJson)?;
            let end = reply.rfind('}').ok_or(TutorError::MissingJson)?;
            if end < start {
                return Err(TutorError::MissingJson);
            }
            &reply[start..=end]
        }
    };

    let mut draft: QuestionDraft = serde_json::from_str(json)?;
    draft.prompt = draft.prompt.trim().to_string();
    draft.canonical_answer = draft.canonical_answer.trim().to_string();
    draft.accepted_answers.retain(|a| !a.trim().is_empty());

    if draft.prompt.is_empty() {
        return Err(TutorError::EmptyField("prompt"));
    }
    if draft.canonical_answer.is_empty() {
        return Err(TutorError::EmptyField("answer"));
    }
    Ok(draft)
}

/// Tidy a tutor reply for the chat UI.
///
/// Converts `\[..\]` and `\(..\)` LaTeX delimiters to `$$..$$` and `$..$`,
/// strips trailing whitespace and collapses runs of blank lines.
pub fn format_tutor_reply(text: &str) -> String {
    let text = text.replace("\r\n", "\n");
    let text = DISPLAY_MATH.replace_all(&text, |caps: &regex::Captures| {
        format!("$${}$$", caps[1].trim())
    });
    let text = INLINE_MATH.replace_all(&text, |caps: &regex::Captures| {
        format!("${}$", caps[1].trim())
    });
    let text = TRAILING_SPACE.replace_all(&text, "");
    let text = EXTRA_BLANK_LINES.replace_all(&text, "\n\n");
    text.trim().to_string()
}
