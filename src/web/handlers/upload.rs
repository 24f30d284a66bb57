// Upload handler — stores the syllabus and notes files, runs topic
// extraction on the syllabus, and renders the study plan.
//
// This is the one place that builds a SyllabusDocument: format comes from
// the uploaded filename's extension, never from content sniffing. Every
// non-Ok extraction outcome maps to a placeholder notice on the study
// plan; none of them is an HTTP error.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Extension;
use minijinja::context;
use tracing::{error, info};

use crate::db::models::UploadKind;
use crate::extract::{DocumentFormat, ExtractionOutcome, SyllabusDocument};
use crate::web::{message_page, AppState, CurrentUser};

/// POST /upload — multipart form with `syllabus` and `notes` file fields.
pub async fn upload(
    State(state): State<AppState>,
    Extension(CurrentUser(username)): Extension<CurrentUser>,
    mut multipart: Multipart,
) -> Response {
    let mut syllabus: Option<(String, Vec<u8>)> = None;
    let mut notes: Option<(String, Vec<u8>)> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or("").to_string();
        let filename = field.file_name().unwrap_or("").to_string();
        let bytes = match field.bytes().await {
            Ok(b) => b.to_vec(),
            Err(err) => {
                error!(field = %name, error = %err, "failed to read upload field");
                return message_page(&state, StatusCode::BAD_REQUEST, "Failed to read upload");
            }
        };
        match name.as_str() {
            "syllabus" => syllabus = Some((filename, bytes)),
            "notes" => notes = Some((filename, bytes)),
            _ => {}
        }
    }

    let Some((syllabus_name, syllabus_bytes)) = syllabus else {
        return message_page(&state, StatusCode::BAD_REQUEST, "Missing syllabus file");
    };
    let Some((notes_name, notes_bytes)) = notes else {
        return message_page(&state, StatusCode::BAD_REQUEST, "Missing notes file");
    };

    let syllabus_path = match store_one(
        &state,
        &username,
        UploadKind::Syllabus,
        &syllabus_name,
        &syllabus_bytes,
    )
    .await
    {
        Ok(path) => path,
        Err(err) => {
            error!(error = %err, "failed to store syllabus");
            return message_page(&state, StatusCode::INTERNAL_SERVER_ERROR, "Upload failed");
        }
    };
    let notes_path = match store_one(&state, &username, UploadKind::Notes, &notes_name, &notes_bytes)
        .await
    {
        Ok(path) => path,
        Err(err) => {
            error!(error = %err, "failed to store notes");
            return message_page(&state, StatusCode::INTERNAL_SERVER_ERROR, "Upload failed");
        }
    };

    let format = DocumentFormat::from_filename(&syllabus_name);
    let doc = SyllabusDocument::new(format, &syllabus_bytes);
    let outcome = state.extractor.extract(&doc);

    let (topics, notice) = match outcome {
        ExtractionOutcome::Topics(list) => {
            info!(username = %username, topics = list.len(), "study plan built");
            (list, None)
        }
        ExtractionOutcome::Unsupported => (Vec::new(), Some("Unsupported syllabus file")),
        ExtractionOutcome::ExtractionError => (Vec::new(), Some("Error extracting topics")),
        ExtractionOutcome::Empty => (Vec::new(), Some("No comma-separated topics found")),
    };

    state.templates.render(
        "study_plan.html",
        context! {
            username => username,
            topics => topics,
            notice => notice,
            syllabus_file => syllabus_path,
            notes_file => notes_path,
        },
    )
}

/// Save one upload to the file store and record its path in the database.
async fn store_one(
    state: &AppState,
    username: &str,
    kind: UploadKind,
    filename: &str,
    bytes: &[u8],
) -> anyhow::Result<String> {
    let extension = filename.rsplit_once('.').map(|(_, e)| e).unwrap_or("");
    let path = state.files.save(username, kind, bytes, extension)?;
    state.db.put_upload(username, kind, &path).await?;
    Ok(path)
}
