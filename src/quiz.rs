// Quiz scoring — normalized topic keys and the equality-count grader.

use std::collections::HashMap;

use serde::Serialize;

use crate::db::models::QuizQuestion;

/// Canonical form of a topic for quiz lookups: trimmed and lowercased.
/// Every quiz store access goes through this, on both the authoring and
/// the taking side.
pub fn normalize_topic(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// The result of grading one quiz submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

/// Count how many submitted answers match. `answers` maps question id to
/// the chosen option letter; a missing or mismatched answer counts as
/// wrong. Total is always the number of questions asked.
pub fn grade(questions: &[QuizQuestion], answers: &HashMap<String, String>) -> Score {
    let correct = questions
        .iter()
        .filter(|q| answers.get(&q.id).map(String::as_str) == Some(q.correct.as_str()))
        .count();
    Score {
        correct,
        total: questions.len(),
    }
}
