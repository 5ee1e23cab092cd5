//! Lesson catalog: built-in generated lessons plus authored banks.

use std::collections::HashMap;

use crate::bank::generate_bank;
use crate::types::{Difficulty, Lesson, Question, Topic};

/// All lessons known to the service and their authored questions.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    lessons: Vec<Lesson>,
    authored: HashMap<String, Vec<Question>>,
}

impl Catalog {
    /// Empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// One generated lesson per topic and difficulty.
    pub fn builtin() -> Self {
        let lessons = Topic::ALL
            .iter()
            .flat_map(|topic| {
                Difficulty::ALL.iter().map(move |difficulty| Lesson {
                    id: format!("{}-{}", topic.as_str().replace('_', "-"), difficulty),
                    title: format!("{} ({})", topic.display_name(), difficulty.display_name()),
                    topic: Some(*topic),
                    difficulty: *difficulty,
                })
            })
            .collect();

        Self {
            lessons,
            authored: HashMap::new(),
        }
    }

    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    pub fn lesson(&self, lesson_id: &str) -> Option<&Lesson> {
        self.lessons.iter().find(|l| l.id == lesson_id)
    }

    /// Attach authored questions to a lesson, creating a topic-less lesson if needed.
    pub fn add_authored(&mut self, lesson_id: &str, title: Option<String>, questions: Vec<Question>) {
        match self.lessons.iter_mut().find(|l| l.id == lesson_id) {
            Some(lesson) => {
                if let Some(title) = title {
                    lesson.title = title;
                }
            }
            None => self.lessons.push(Lesson {
                id: lesson_id.to_string(),
                title: title.unwrap_or_else(|| lesson_id.to_string()),
                topic: None,
                difficulty: Difficulty::default(),
            }),
        }

        self.authored
            .entry(lesson_id.to_string())
            .or_default()
            .extend(questions);
    }

    pub fn authored(&self, lesson_id: &str) -> &[Question] {
        self.authored
            .get(lesson_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Generated questions followed by authored ones. Unknown lessons are empty.
    pub fn bank(&self, lesson_id: &str, size: usize) -> Vec<Question> {
        let Some(lesson) = self.lesson(lesson_id) else {
            return Vec::new();
        };

        let mut questions = generate_bank(lesson, size);
        questions.extend(self.authored(lesson_id).iter().cloned());
        questions
    }

    /// Look a question up by id in a lesson's bank.
    pub fn find_question(&self, lesson_id: &str, question_id: &str, size: usize) -> Option<Question> {
        if let Some(q) = self.authored(lesson_id).iter().find(|q| q.id == question_id) {
            return Some(q.clone());
        }
        generate_bank(self.lesson(lesson_id)?, size)
            .into_iter()
            .find(|q| q.id == question_id)
    }
}
