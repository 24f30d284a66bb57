// Login and signup handlers — student accounts plus the faculty door.
//
// Students: username/password against the users table (SHA-256 digests).
// Faculty: a single id/pin pair from the environment — there is no
// faculty table and no hardcoded fallback pair.
//
// Successful logins set a signed HMAC session cookie and redirect;
// failures re-render the form with a message, like the original pages.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use minijinja::context;
use serde::Deserialize;
use tracing::{error, info};

use crate::web::auth::{
    clear_cookie_header, constant_time_eq, create_token, hash_password, set_cookie_header, Subject,
};
use crate::web::{message_page, AppState};

#[derive(Deserialize)]
pub struct Credentials {
    username: String,
    password: String,
}

#[derive(Deserialize)]
pub struct FacultyCredentials {
    faculty_id: String,
    pin: String,
}

/// GET /signup
pub async fn signup_form(State(state): State<AppState>) -> Response {
    state
        .templates
        .render("signup.html", context! { message => "" })
}

/// POST /signup — create a student account.
pub async fn signup(State(state): State<AppState>, Form(form): Form<Credentials>) -> Response {
    let username = form.username.trim().to_string();
    if username.is_empty() || form.password.is_empty() {
        return state.templates.render(
            "signup.html",
            context! { message => "Username and password are required" },
        );
    }

    let hash = hash_password(&form.password);
    match state.db.create_user(&username, &hash).await {
        Ok(true) => {
            info!(username = %username, "account created");
            state.templates.render(
                "login.html",
                context! { message => "Account created successfully. Please login." },
            )
        }
        Ok(false) => state
            .templates
            .render("signup.html", context! { message => "Username already exists" }),
        Err(err) => {
            error!(error = %err, "signup failed");
            message_page(&state, StatusCode::INTERNAL_SERVER_ERROR, "Signup failed")
        }
    }
}

/// GET /login
pub async fn login_form(State(state): State<AppState>) -> Response {
    state
        .templates
        .render("login.html", context! { message => "" })
}

/// POST /login — authenticate a student and start a session.
pub async fn login(State(state): State<AppState>, Form(form): Form<Credentials>) -> Response {
    let username = form.username.trim().to_string();
    let hash = hash_password(&form.password);

    let authenticated = match state.db.authenticate(&username, &hash).await {
        Ok(ok) => ok,
        Err(err) => {
            error!(error = %err, "login check failed");
            return message_page(&state, StatusCode::INTERNAL_SERVER_ERROR, "Login failed");
        }
    };

    if !authenticated {
        return state.templates.render(
            "login.html",
            context! { message => "Invalid username or password" },
        );
    }

    let token = create_token(
        &state.config.session_secret,
        &Subject::Student(username.clone()),
    );
    info!(username = %username, "student logged in");
    (
        [(header::SET_COOKIE, set_cookie_header(&token))],
        Redirect::to("/dashboard"),
    )
        .into_response()
}

/// GET /faculty
pub async fn faculty_form(State(state): State<AppState>) -> Response {
    state
        .templates
        .render("faculty_login.html", context! { error => "" })
}

/// POST /faculty-login — check the configured faculty id/pin pair.
pub async fn faculty_login(
    State(state): State<AppState>,
    Form(form): Form<FacultyCredentials>,
) -> Response {
    if state.config.require_faculty_credentials().is_err() {
        return state.templates.render(
            "faculty_login.html",
            context! { error => "Faculty login is not configured on this server" },
        );
    }

    let id_ok = constant_time_eq(form.faculty_id.trim(), &state.config.faculty_id);
    let pin_ok = constant_time_eq(&form.pin, &state.config.faculty_pin);
    if !(id_ok && pin_ok) {
        return state.templates.render(
            "faculty_login.html",
            context! { error => "Invalid Faculty Credentials" },
        );
    }

    let token = create_token(&state.config.session_secret, &Subject::Faculty);
    info!("faculty logged in");
    (
        [(header::SET_COOKIE, set_cookie_header(&token))],
        Redirect::to("/faculty-dashboard"),
    )
        .into_response()
}

/// POST /logout — clear the session cookie, back to the login page.
pub async fn logout() -> Response {
    (
        [(header::SET_COOKIE, clear_cookie_header())],
        Redirect::to("/login"),
    )
        .into_response()
}
