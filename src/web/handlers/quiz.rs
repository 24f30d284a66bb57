// Quiz handlers — taking a topic quiz, submitting answers, and the
// faculty authoring endpoint.
//
// Topic keys are normalized (trimmed, lowercased) on every store access,
// so "Algebra" on the study plan and "algebra " typed by faculty land on
// the same question set.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Extension, Form};
use minijinja::context;
use serde::Deserialize;
use tracing::{error, info};

use crate::db::models::QuizQuestion;
use crate::quiz::{grade, normalize_topic};
use crate::web::{message_page, AppState, CurrentUser};

#[derive(Deserialize)]
pub struct QuizQuery {
    topic: String,
}

#[derive(Deserialize)]
pub struct AddQuizForm {
    topic: String,
    question: String,
    option_a: String,
    option_b: String,
    option_c: String,
    option_d: String,
    correct_option: String,
}

/// GET /quiz?topic= — render the topic's questions as a form.
pub async fn quiz(
    State(state): State<AppState>,
    Extension(CurrentUser(username)): Extension<CurrentUser>,
    Query(params): Query<QuizQuery>,
) -> Response {
    let key = normalize_topic(&params.topic);
    let questions = state.db.questions_for_topic(&key).await.unwrap_or_default();

    state.templates.render(
        "quiz.html",
        context! {
            topic => params.topic,
            username => username,
            questions => questions,
        },
    )
}

/// POST /submit-quiz — grade the submitted answers and show the score.
///
/// The form is dynamic (one field per question id), so it deserializes
/// into a plain map. The grader ignores keys that aren't question ids.
pub async fn submit_quiz(
    State(state): State<AppState>,
    Extension(CurrentUser(username)): Extension<CurrentUser>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let topic = form.get("topic").cloned().unwrap_or_default();
    let questions = state
        .db
        .questions_for_topic(&normalize_topic(&topic))
        .await
        .unwrap_or_default();

    let score = grade(&questions, &form);
    info!(
        username = %username,
        topic = %topic,
        correct = score.correct,
        total = score.total,
        "quiz graded"
    );

    state.templates.render(
        "quiz_result.html",
        context! {
            topic => topic,
            username => username,
            score => score.correct,
            total => score.total,
        },
    )
}

/// POST /add-quiz — faculty only; append a question under the topic.
pub async fn add_quiz(State(state): State<AppState>, Form(form): Form<AddQuizForm>) -> Response {
    if !matches!(form.correct_option.as_str(), "A" | "B" | "C" | "D") {
        return message_page(
            &state,
            StatusCode::BAD_REQUEST,
            "Correct option must be one of A, B, C, D",
        );
    }
    if form.topic.trim().is_empty() || form.question.trim().is_empty() {
        return message_page(
            &state,
            StatusCode::BAD_REQUEST,
            "Topic and question are required",
        );
    }

    let question = QuizQuestion::new(
        &form.topic,
        form.question,
        form.option_a,
        form.option_b,
        form.option_c,
        form.option_d,
        form.correct_option,
    );

    match state.db.add_question(&question).await {
        Ok(()) => {
            info!(topic = %question.topic, "quiz question added");
            Redirect::to("/faculty-dashboard").into_response()
        }
        Err(err) => {
            error!(error = %err, "failed to store quiz question");
            message_page(
                &state,
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to save question",
            )
        }
    }
}
