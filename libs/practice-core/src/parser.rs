//! Markdown parser for authored question banks.
//!
//! # Format
//! ```markdown
//! # World capitals
//!
//! ID: 1
//! Q: What is the capital of France?
//! A: Paris
//! ALT: paris france
//! WHY: Paris has been the capital since 987.
//!
//! Q: Name the longest river in Africa.
//! A: Nile
//! ALT: the nile
//! WHY: The Nile runs about 6,650 km.
//! Multiple lines are supported here.
//! ```
//!
//! `Q:` and `WHY:` may continue over several lines. `ID:` is optional; a
//! missing id is derived from the question text so it stays stable.

use crate::error::{ParseError, Result};
use crate::seed::hash_seed;
use crate::types::{Question, QuestionSource};
use std::collections::HashSet;

/// Question parsed from markdown, before it is attached to a lesson.
#[derive(Debug, Clone, PartialEq)]
pub struct RawQuestion {
    pub id: String,
    pub prompt: String,
    pub answer: String,
    pub accepted_answers: Vec<String>,
    pub explanation: String,
    pub line_number: usize,
}

impl RawQuestion {
    pub fn into_question(self, lesson_id: &str) -> Question {
        Question {
            id: authored_question_id(lesson_id, &self.id),
            lesson_id: lesson_id.to_string(),
            prompt: self.prompt,
            canonical_answer: self.answer,
            accepted_answers: self.accepted_answers,
            explanation: self.explanation,
            source: QuestionSource::Authored,
        }
    }
}

/// Id of an authored question within a lesson.
pub fn authored_question_id(lesson_id: &str, id: &str) -> String {
    format!("{lesson_id}:authored:{id}")
}

/// Parsed bank file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthoredBank {
    pub title: Option<String>,
    pub questions: Vec<RawQuestion>,
}

/// Parse markdown content into an authored bank.
pub fn parse(content: &str) -> Result<AuthoredBank> {
    if content.trim().is_empty() {
        return Ok(AuthoredBank::default());
    }

    let mut parser = Parser::new();

    for (idx, line) in content.lines().enumerate() {
        let line_num = idx + 1;
        parser.process_line(line, line_num)?;
    }

    parser.finalize()
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Field {
    Question,
    Explanation,
}

struct QuestionBuilder {
    id: Option<String>,
    question: Option<String>,
    answer: Option<String>,
    accepted: Vec<String>,
    explanation: Option<String>,
    start_line: usize,
}

impl QuestionBuilder {
    fn new(start_line: usize) -> Self {
        Self {
            id: None,
            question: None,
            answer: None,
            accepted: Vec::new(),
            explanation: None,
            start_line,
        }
    }

    fn build(self) -> Result<RawQuestion> {
        let question = self
            .question
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty())
            .ok_or(ParseError::MissingQuestion {
                line: self.start_line,
            })?;
        let answer = self
            .answer
            .filter(|a| !a.is_empty())
            .ok_or(ParseError::MissingAnswer {
                line: self.start_line,
            })?;

        let id = self
            .id
            .unwrap_or_else(|| format!("{:08x}", hash_seed(&question)));

        Ok(RawQuestion {
            id,
            prompt: question,
            answer,
            accepted_answers: self.accepted,
            explanation: self
                .explanation
                .map(|e| e.trim().to_string())
                .unwrap_or_default(),
            line_number: self.start_line,
        })
    }
}

struct Parser {
    title: Option<String>,
    current: Option<QuestionBuilder>,
    current_field: Option<Field>,
    buffer: Vec<String>,
    questions: Vec<RawQuestion>,
    seen_ids: HashSet<String>,
}

impl Parser {
    fn new() -> Self {
        Self {
            title: None,
            current: None,
            current_field: None,
            buffer: Vec::new(),
            questions: Vec::new(),
            seen_ids: HashSet::new(),
        }
    }

    fn process_line(&mut self, line: &str, line_num: usize) -> Result<()> {
        match Self::parse_line(line) {
            LineType::Title(text) => self.handle_title(text),
            LineType::Id(id_str) => self.handle_id(id_str, line_num)?,
            LineType::Question(text) => self.handle_question(text, line_num)?,
            LineType::Answer(text) => self.handle_answer(text, line_num),
            LineType::Alternate(text) => self.handle_alternate(text),
            LineType::Explanation(text) => self.handle_explanation(text),
            LineType::Text(text) => {
                if self.current_field.is_some() {
                    self.buffer.push(text.to_string());
                }
            }
            LineType::Empty => {
                if self.current_field.is_some() {
                    self.buffer.push(String::new());
                }
            }
        }
        Ok(())
    }

    fn parse_line(line: &str) -> LineType<'_> {
        let trimmed = line.trim();

        if let Some(rest) = trimmed.strip_prefix("ID:") {
            LineType::Id(rest.trim())
        } else if let Some(rest) = trimmed.strip_prefix("Q:") {
            LineType::Question(rest.trim())
        } else if let Some(rest) = trimmed.strip_prefix("ALT:") {
            LineType::Alternate(rest.trim())
        } else if let Some(rest) = trimmed.strip_prefix("A:") {
            LineType::Answer(rest.trim())
        } else if let Some(rest) = trimmed.strip_prefix("WHY:") {
            LineType::Explanation(rest.trim())
        } else if let Some(rest) = trimmed.strip_prefix("# ") {
            LineType::Title(rest.trim())
        } else if trimmed.is_empty() {
            LineType::Empty
        } else {
            LineType::Text(line)
        }
    }

    fn handle_title(&mut self, text: &str) {
        // Only a heading before the first question names the bank.
        if self.current.is_none() && self.questions.is_empty() && self.title.is_none() {
            self.title = Some(text.to_string());
        } else if self.current_field.is_some() {
            self.buffer.push(format!("# {text}"));
        }
    }

    fn handle_id(&mut self, id_str: &str, line_num: usize) -> Result<()> {
        self.finish_current()?;

        let valid = !id_str.is_empty()
            && id_str
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(ParseError::InvalidId {
                line: line_num,
                value: id_str.to_string(),
            });
        }

        let mut builder = QuestionBuilder::new(line_num);
        builder.id = Some(id_str.to_string());
        self.current = Some(builder);
        Ok(())
    }

    fn handle_question(&mut self, text: &str, line_num: usize) -> Result<()> {
        self.flush_buffer();

        // A second Q: starts the next question.
        let has_question = self
            .current
            .as_ref()
            .is_some_and(|q| q.question.is_some());
        if has_question {
            self.finish_current()?;
        }
        if self.current.is_none() {
            self.current = Some(QuestionBuilder::new(line_num));
        }

        self.current_field = Some(Field::Question);
        self.buffer.push(text.to_string());
        Ok(())
    }

    fn handle_answer(&mut self, text: &str, line_num: usize) {
        self.flush_buffer();
        self.current_field = None;
        let card = self
            .current
            .get_or_insert_with(|| QuestionBuilder::new(line_num));
        card.answer = Some(text.to_string());
    }

    fn handle_alternate(&mut self, text: &str) {
        self.flush_buffer();
        self.current_field = None;
        if let Some(ref mut card) = self.current {
            if !text.is_empty() {
                card.accepted.push(text.to_string());
            }
        }
    }

    fn handle_explanation(&mut self, text: &str) {
        self.flush_buffer();
        self.current_field = Some(Field::Explanation);
        self.buffer.push(text.to_string());
    }

    fn flush_buffer(&mut self) {
        if self.buffer.is_empty() {
            return;
        }

        let content = self.buffer.join("\n");
        self.buffer.clear();

        if let Some(ref mut card) = self.current {
            match self.current_field {
                Some(Field::Question) => card.question = Some(content),
                Some(Field::Explanation) => card.explanation = Some(content),
                None => {}
            }
        }
    }

    fn finish_current(&mut self) -> Result<()> {
        self.flush_buffer();
        self.current_field = None;

        if let Some(card) = self.current.take() {
            let raw = card.build()?;
            if !self.seen_ids.insert(raw.id.clone()) {
                return Err(ParseError::DuplicateId {
                    id: raw.id,
                    line: raw.line_number,
                });
            }
            self.questions.push(raw);
        }
        Ok(())
    }

    fn finalize(mut self) -> Result<AuthoredBank> {
        self.finish_current()?;
        Ok(AuthoredBank {
            title: self.title,
            questions: self.questions,
        })
    }
}

enum LineType<'a> {
    Title(&'a str),
    Id(&'a str),
    Question(&'a str),
    Answer(&'a str),
    Alternate(&'a str),
    Explanation(&'a str),
    Text(&'a str),
    Empty,
}
