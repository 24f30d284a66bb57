// Web server — Axum frontend for the study-plan app.
//
// Server-rendered HTML throughout: templates/ is embedded at compile time
// via include_dir! and rendered with minijinja (the templates are plain
// Jinja-style form pages, no client framework). The small static/ dir is
// embedded the same way.
//
// Auth: stateless HMAC-SHA256 session cookies. No session table in the DB.
// Student routes and faculty routes check different cookie subjects.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::body::Body;
use axum::extract::{DefaultBodyLimit, Path};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;
use include_dir::{include_dir, Dir};
use minijinja::Environment;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::Config;
use crate::db::Database;
use crate::extract::{LopdfReader, TopicExtractor};
use crate::storage::FileStore;

pub mod auth;
pub mod handlers;

// Embedded at compile time so the binary is self-contained.
static TEMPLATES: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/templates");
static ASSETS: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/static");

/// Uploads larger than this are rejected by the framework before any
/// handler runs — the one bound extraction relies on the caller for.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Compiled template environment, built once at startup from the
/// embedded templates/ directory.
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn load() -> Result<Self> {
        let mut env = Environment::new();
        for file in TEMPLATES.files() {
            let name = file.path().to_string_lossy().into_owned();
            let source = std::str::from_utf8(file.contents())
                .with_context(|| format!("Template {name} is not UTF-8"))?;
            env.add_template_owned(name.clone(), source.to_string())
                .with_context(|| format!("Template {name} failed to compile"))?;
        }
        Ok(Self { env })
    }

    /// Render a template to a full HTML response. Render failures become
    /// a 500 — they indicate a bug, not a user error.
    pub fn render(&self, name: &str, ctx: minijinja::Value) -> Response {
        match self.env.get_template(name).and_then(|t| t.render(ctx)) {
            Ok(html) => Html(html).into_response(),
            Err(err) => {
                error!(template = name, error = %err, "template render failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Page failed to render").into_response()
            }
        }
    }
}

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn Database>,
    pub config: Arc<Config>,
    pub files: Arc<FileStore>,
    pub templates: Arc<Templates>,
    pub extractor: Arc<TopicExtractor<LopdfReader>>,
}

/// A logged-in student, inserted into request extensions by
/// `auth::require_user`.
#[derive(Clone)]
pub struct CurrentUser(pub String);

/// Marker for a logged-in faculty member, inserted by
/// `auth::require_faculty`.
#[derive(Clone)]
pub struct FacultyUser;

/// Start the Axum web server and block until it exits.
pub async fn run_server(
    config: Config,
    db: Arc<dyn Database>,
    port: u16,
    bind: &str,
) -> Result<()> {
    let files = FileStore::new(config.upload_dir.clone());
    files.ensure_root()?;

    let state = AppState {
        db,
        config: Arc::new(config),
        files: Arc::new(files),
        templates: Arc::new(Templates::load()?),
        extractor: Arc::new(TopicExtractor::new(LopdfReader)),
    };

    let app = build_router(state);

    let addr = format!("{bind}:{port}");
    info!("Lectern listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: AppState) -> Router {
    // Student routes (require a student session cookie)
    let student = Router::new()
        .route("/dashboard", get(handlers::dashboard::dashboard))
        .route("/upload", post(handlers::upload::upload))
        .route("/quiz", get(handlers::quiz::quiz))
        .route("/submit-quiz", post(handlers::quiz::submit_quiz))
        .route("/preview/{username}/{kind}", get(handlers::preview::preview))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth::require_user,
        ));

    // Faculty routes (require a faculty session cookie)
    let faculty = Router::new()
        .route(
            "/faculty-dashboard",
            get(handlers::dashboard::faculty_dashboard),
        )
        .route("/add-quiz", post(handlers::quiz::add_quiz))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth::require_faculty,
        ));

    // Public routes (no auth)
    let public = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route(
            "/signup",
            get(handlers::auth::signup_form).post(handlers::auth::signup),
        )
        .route(
            "/login",
            get(handlers::auth::login_form).post(handlers::auth::login),
        )
        .route("/faculty", get(handlers::auth::faculty_form))
        .route("/faculty-login", post(handlers::auth::faculty_login))
        .route("/logout", post(handlers::auth::logout))
        .route("/static/{*path}", get(static_asset));

    Router::new()
        .merge(student)
        .merge(faculty)
        .merge(public)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The root just forwards to the login page.
async fn root() -> Redirect {
    Redirect::to("/login")
}

/// Deployment health check — always returns 200 OK.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}

/// Serve a file from the embedded static/ directory.
async fn static_asset(Path(path): Path<String>) -> Response {
    match ASSETS.get_file(&path) {
        Some(file) => asset_response(file.contents(), &path),
        None => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

pub fn asset_response(contents: &[u8], path: &str) -> Response {
    let mime = mime_type(path);
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, HeaderValue::from_static(mime))
        .body(Body::from(contents.to_vec()))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

pub fn mime_type(path: &str) -> &'static str {
    let ext = path.rsplit('.').next().unwrap_or("").to_ascii_lowercase();
    match ext.as_str() {
        "html" => "text/html; charset=utf-8",
        "css" => "text/css",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "ico" => "image/x-icon",
        "pdf" => "application/pdf",
        "json" => "application/json",
        "txt" => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

/// Render the shared message page — used where the original app returned
/// a bare HTML string ("File not found", "Unsupported file type", ...).
pub fn message_page(state: &AppState, status: StatusCode, message: &str) -> Response {
    let body = state.templates.render(
        "message.html",
        minijinja::context! { message => message },
    );
    (status, body).into_response()
}
