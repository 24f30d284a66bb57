// Dashboard pages — the student's file overview and the faculty
// quiz-authoring form.

use axum::extract::State;
use axum::response::Response;
use axum::Extension;
use minijinja::context;

use crate::db::models::UploadKind;
use crate::web::{AppState, CurrentUser};

/// GET /dashboard — the student's uploaded files plus the upload form.
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(CurrentUser(username)): Extension<CurrentUser>,
) -> Response {
    let uploads = state.db.get_uploads(&username).await.unwrap_or_default();
    let syllabus_file = uploads
        .iter()
        .find(|r| r.kind == UploadKind::Syllabus.as_str())
        .map(|r| r.path.clone());
    let notes_file = uploads
        .iter()
        .find(|r| r.kind == UploadKind::Notes.as_str())
        .map(|r| r.path.clone());

    state.templates.render(
        "dashboard.html",
        context! {
            username => username,
            syllabus_file => syllabus_file,
            notes_file => notes_file,
        },
    )
}

/// GET /faculty-dashboard — the quiz authoring form.
pub async fn faculty_dashboard(State(state): State<AppState>) -> Response {
    state
        .templates
        .render("faculty_dashboard.html", context! {})
}
