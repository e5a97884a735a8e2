//! Static course content consumed at store-build time.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::Result;

/// All training material the knowledge base is built from.
///
/// Ordered maps fix the build order: pages by number, sections and quizzes by key.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseContent {
    #[serde(default, alias = "pages")]
    pub page_content: BTreeMap<u32, String>,
    #[serde(default, alias = "sections")]
    pub course_sections: BTreeMap<String, Section>,
    #[serde(default)]
    pub quizzes: BTreeMap<String, Quiz>,
    /// Standalone worked explanations keyed by title.
    #[serde(default)]
    pub explanations: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Section {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub activities: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Quiz {
    pub title: String,
    #[serde(default)]
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    /// Zero-based index into `options`.
    #[serde(alias = "correct")]
    pub correct_answer: usize,
    #[serde(default)]
    pub explanation: String,
}

impl CourseContent {
    /// Decode course content from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or does not match the content shape.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn with_page(mut self, number: u32, text: impl Into<String>) -> Self {
        self.page_content.insert(number, text.into());
        self
    }

    #[must_use]
    pub fn with_section(mut self, key: impl Into<String>, section: Section) -> Self {
        self.course_sections.insert(key.into(), section);
        self
    }

    #[must_use]
    pub fn with_quiz(mut self, key: impl Into<String>, quiz: Quiz) -> Self {
        self.quizzes.insert(key.into(), quiz);
        self
    }

    #[must_use]
    pub fn with_explanation(mut self, title: impl Into<String>, text: impl Into<String>) -> Self {
        self.explanations.insert(title.into(), text.into());
        self
    }
}

impl QuizQuestion {
    /// Text of the correct option, if the index is in range.
    #[must_use]
    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.correct_answer).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_json_reads_camel_case_shape() {
        let json = r#"{
            "pageContent": { "1": "Welcome", "12": "Prompt Errors" },
            "courseSections": {
                "intro": {
                    "title": "Introduction",
                    "description": "Start here",
                    "topics": ["Trajectories"],
                    "activities": ["Read the handbook"]
                }
            },
            "quizzes": {
                "intro": {
                    "title": "Intro Quiz",
                    "questions": [{
                        "question": "What is a trajectory?",
                        "options": ["A path", "A sequence of agent steps"],
                        "correctAnswer": 1,
                        "explanation": "Trajectories record each step."
                    }]
                }
            }
        }"#;

        let content = CourseContent::from_json(json).unwrap();
        assert_eq!(content.page_content.len(), 2);
        assert_eq!(content.page_content[&12], "Prompt Errors");
        assert_eq!(content.course_sections["intro"].activities.len(), 1);
        let q = &content.quizzes["intro"].questions[0];
        assert_eq!(q.correct_option(), Some("A sequence of agent steps"));
        assert!(content.explanations.is_empty());
    }

    #[test]
    fn from_json_all_sections_optional() {
        let content = CourseContent::from_json("{}").unwrap();
        assert!(content.page_content.is_empty());
        assert!(content.course_sections.is_empty());
        assert!(content.quizzes.is_empty());
    }

    #[test]
    fn from_json_rejects_malformed() {
        assert!(CourseContent::from_json("{ not json").is_err());
    }

    #[test]
    fn pages_ordered_numerically() {
        let content = CourseContent::default()
            .with_page(10, "ten")
            .with_page(2, "two");
        let keys: Vec<_> = content.page_content.keys().copied().collect();
        assert_eq!(keys, vec![2, 10]);
    }

    #[test]
    fn correct_option_out_of_range() {
        let q = QuizQuestion {
            question: "q".into(),
            options: vec!["a".into()],
            correct_answer: 3,
            explanation: String::new(),
        };
        assert!(q.correct_option().is_none());
    }
}
