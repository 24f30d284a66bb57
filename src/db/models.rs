// Data models — Rust structs that map to database rows.
//
// These are the types that flow through the application. They're separate
// from the database queries so other modules can use them without depending
// on rusqlite directly.

use serde::{Deserialize, Serialize};

/// Which of the two upload slots a stored file occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Syllabus,
    Notes,
}

impl UploadKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Syllabus => "syllabus",
            Self::Notes => "notes",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "syllabus" => Some(Self::Syllabus),
            "notes" => Some(Self::Notes),
            _ => None,
        }
    }
}

/// A stored upload — where a student's syllabus or notes file lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadRecord {
    pub username: String,
    pub kind: String,
    /// Path relative to the upload directory.
    pub path: String,
    pub uploaded_at: String,
}

/// One multiple-choice quiz question, keyed by normalized topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: String,
    /// Normalized topic key (lowercased, trimmed).
    pub topic: String,
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    /// One of "A" | "B" | "C" | "D".
    pub correct: String,
}

impl QuizQuestion {
    /// Build a new question with a fresh UUIDv4 id and a normalized topic.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        topic: &str,
        question: String,
        option_a: String,
        option_b: String,
        option_c: String,
        option_d: String,
        correct: String,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            topic: crate::quiz::normalize_topic(topic),
            question,
            option_a,
            option_b,
            option_c,
            option_d,
            correct,
        }
    }
}
