// Unit tests for quiz grading and topic-key normalization.

use std::collections::HashMap;

use lectern::db::models::QuizQuestion;
use lectern::quiz::{grade, normalize_topic};

fn question(topic: &str, correct: &str) -> QuizQuestion {
    QuizQuestion::new(
        topic,
        "Which option is right?".to_string(),
        "first".to_string(),
        "second".to_string(),
        "third".to_string(),
        "fourth".to_string(),
        correct.to_string(),
    )
}

// ============================================================
// normalize_topic
// ============================================================

#[test]
fn normalization_trims_and_lowercases() {
    assert_eq!(normalize_topic("  Algebra "), "algebra");
    assert_eq!(normalize_topic("GRAPH THEORY"), "graph theory");
    assert_eq!(normalize_topic("calculus"), "calculus");
}

#[test]
fn authored_questions_get_normalized_topics() {
    let q = question("  Linear ALGEBRA ", "A");
    assert_eq!(q.topic, "linear algebra");
}

#[test]
fn question_ids_are_unique() {
    let a = question("algebra", "A");
    let b = question("algebra", "A");
    assert_ne!(a.id, b.id);
}

// ============================================================
// grade
// ============================================================

#[test]
fn all_correct_answers_score_full_marks() {
    let questions = vec![question("t", "A"), question("t", "C")];
    let mut answers = HashMap::new();
    answers.insert(questions[0].id.clone(), "A".to_string());
    answers.insert(questions[1].id.clone(), "C".to_string());

    let score = grade(&questions, &answers);
    assert_eq!(score.correct, 2);
    assert_eq!(score.total, 2);
}

#[test]
fn missing_answers_count_as_wrong() {
    let questions = vec![question("t", "A"), question("t", "B")];
    let mut answers = HashMap::new();
    answers.insert(questions[0].id.clone(), "A".to_string());

    let score = grade(&questions, &answers);
    assert_eq!(score.correct, 1);
    assert_eq!(score.total, 2);
}

#[test]
fn wrong_answers_do_not_score() {
    let questions = vec![question("t", "D")];
    let mut answers = HashMap::new();
    answers.insert(questions[0].id.clone(), "A".to_string());

    let score = grade(&questions, &answers);
    assert_eq!(score.correct, 0);
    assert_eq!(score.total, 1);
}

#[test]
fn extraneous_form_keys_are_ignored() {
    // The submitted form carries non-answer fields (like the topic); the
    // grader only looks up question ids.
    let questions = vec![question("t", "B")];
    let mut answers = HashMap::new();
    answers.insert("topic".to_string(), "t".to_string());
    answers.insert(questions[0].id.clone(), "B".to_string());

    let score = grade(&questions, &answers);
    assert_eq!(score.correct, 1);
    assert_eq!(score.total, 1);
}

#[test]
fn no_questions_grades_zero_of_zero() {
    let score = grade(&[], &HashMap::new());
    assert_eq!(score.correct, 0);
    assert_eq!(score.total, 0);
}
