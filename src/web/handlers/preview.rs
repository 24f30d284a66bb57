// File preview — serves a student's stored upload back to them.
//
// Images and PDFs go out as raw bytes with the right content type; text
// files render inline in a <pre> block; anything else gets a placeholder
// page. Missing records or files produce a friendly page, never a 500.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Extension;
use minijinja::context;

use crate::db::models::UploadKind;
use crate::web::{asset_response, message_page, AppState, CurrentUser};

/// GET /preview/{username}/{kind}
pub async fn preview(
    State(state): State<AppState>,
    Extension(CurrentUser(session_user)): Extension<CurrentUser>,
    Path((username, kind)): Path<(String, String)>,
) -> Response {
    // Students only see their own files.
    if session_user != username {
        return message_page(
            &state,
            StatusCode::FORBIDDEN,
            "You can only preview your own files",
        );
    }

    let Some(kind) = UploadKind::from_str(&kind) else {
        return message_page(&state, StatusCode::NOT_FOUND, "File not found");
    };

    let path = match state.db.get_upload(&username, kind).await {
        Ok(Some(path)) => path,
        Ok(None) => return message_page(&state, StatusCode::NOT_FOUND, "File not found"),
        Err(_) => {
            return message_page(
                &state,
                StatusCode::INTERNAL_SERVER_ERROR,
                "Preview unavailable",
            )
        }
    };

    if !state.files.exists(&path) {
        return message_page(&state, StatusCode::NOT_FOUND, "File missing");
    }
    let bytes = match state.files.read(&path) {
        Ok(bytes) => bytes,
        Err(_) => return message_page(&state, StatusCode::NOT_FOUND, "File missing"),
    };

    let ext = path.rsplit('.').next().unwrap_or("").to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" | "png" | "pdf" => asset_response(&bytes, &path),
        "txt" => state.templates.render(
            "preview.html",
            context! {
                path => path,
                content => String::from_utf8_lossy(&bytes),
            },
        ),
        _ => message_page(&state, StatusCode::OK, "Unsupported file type"),
    }
}
