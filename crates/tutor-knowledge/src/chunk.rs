//! Chunk model and materialization of course content into chunks.

use std::fmt::Write;

use serde::Serialize;

use crate::content::{CourseContent, Quiz, Section};

/// Origin of a chunk. Surfaced to callers, not used for ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkCategory {
    Page,
    Section,
    Quiz,
    Explanation,
}

impl ChunkCategory {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Section => "section",
            Self::Quiz => "quiz",
            Self::Explanation => "explanation",
        }
    }
}

impl std::fmt::Display for ChunkCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable unit of retrievable text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chunk {
    pub id: String,
    pub source: String,
    pub content: String,
    pub category: ChunkCategory,
}

impl Chunk {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        content: impl Into<String>,
        category: ChunkCategory,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            content: content.into(),
            category,
        }
    }
}

/// Materialize every atomic unit of `content` as a chunk, in build order.
pub(crate) fn chunks_from_content(content: &CourseContent) -> Vec<Chunk> {
    let mut chunks = Vec::new();

    for (number, text) in &content.page_content {
        chunks.push(Chunk::new(
            format!("page-{number}"),
            format!("Page {number}"),
            text.clone(),
            ChunkCategory::Page,
        ));
    }

    for (key, section) in &content.course_sections {
        section_chunks(key, section, &mut chunks);
    }

    for (key, quiz) in &content.quizzes {
        quiz_chunks(key, quiz, &mut chunks);
    }

    for (title, text) in &content.explanations {
        chunks.push(Chunk::new(
            format!("explanation-{}", slug(title)),
            title.clone(),
            text.clone(),
            ChunkCategory::Explanation,
        ));
    }

    chunks
}

fn section_chunks(key: &str, section: &Section, out: &mut Vec<Chunk>) {
    let mut info = format!("{}\n\n{}", section.title, section.description);
    if !section.topics.is_empty() {
        let _ = write!(info, "\n\nTopics: {}", section.topics.join(", "));
    }
    out.push(Chunk::new(
        format!("section-{key}"),
        format!("Section: {}", section.title),
        info,
        ChunkCategory::Section,
    ));

    for (i, activity) in section.activities.iter().enumerate() {
        out.push(Chunk::new(
            format!("section-{key}-activity-{i}"),
            format!("{} - Activity {}", section.title, i + 1),
            format!("Activity in {}: {activity}", section.title),
            ChunkCategory::Section,
        ));
    }
}

fn quiz_chunks(key: &str, quiz: &Quiz, out: &mut Vec<Chunk>) {
    for (i, q) in quiz.questions.iter().enumerate() {
        let mut body = format!("Question: {}\nOptions:\n", q.question);
        for (n, option) in q.options.iter().enumerate() {
            let _ = writeln!(body, "{}. {option}", n + 1);
        }
        if let Some(correct) = q.correct_option() {
            let _ = writeln!(body, "Correct Answer: {correct}");
        } else {
            tracing::warn!(
                quiz = key,
                question = i + 1,
                index = q.correct_answer,
                "correct answer index out of range"
            );
        }
        if !q.explanation.is_empty() {
            let _ = write!(body, "Explanation: {}", q.explanation);
        }

        out.push(Chunk::new(
            format!("quiz-{key}-q{i}"),
            format!("{} - Question {}", quiz.title, i + 1),
            body.trim_end().to_owned(),
            ChunkCategory::Quiz,
        ));
    }
}

fn slug(title: &str) -> String {
    title
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect()
}
