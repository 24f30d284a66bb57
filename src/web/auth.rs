// Auth middleware — stateless HMAC-SHA256 session cookie validation.
//
// Session token format: {subject_b64}.{timestamp_secs}.{nonce_hex}.{hmac_hex}
//
// The subject is "user:{username}" for students or "faculty", base64url
// encoded so usernames can't smuggle separators into the token. The HMAC
// covers "{subject_b64}.{timestamp_secs}.{nonce_hex}" signed with
// LECTERN_SESSION_SECRET. Tokens are valid for SESSION_TTL_SECS (24 hours).
//
// Login flow:
//   POST /login (or /faculty-login) → check credentials
//     success: set lectern_session cookie with a new HMAC token
//     failure: re-render the form
//
// Auth check (the middlewares below):
//   extract cookie → parse → verify HMAC → verify age → check subject role

use std::time::{SystemTime, UNIX_EPOCH};

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::{Digest, Sha256};

use super::{AppState, CurrentUser, FacultyUser};

type HmacSha256 = Hmac<Sha256>;

/// Session cookie name.
pub const COOKIE_NAME: &str = "lectern_session";

/// Session lifetime: 24 hours.
pub const SESSION_TTL_SECS: u64 = 86_400;

/// Who a session token belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subject {
    Student(String),
    Faculty,
}

impl Subject {
    fn encode(&self) -> String {
        match self {
            Self::Student(username) => format!("user:{username}"),
            Self::Faculty => "faculty".to_string(),
        }
    }

    fn decode(raw: &str) -> Option<Self> {
        if raw == "faculty" {
            return Some(Self::Faculty);
        }
        raw.strip_prefix("user:")
            .filter(|u| !u.is_empty())
            .map(|u| Self::Student(u.to_string()))
    }
}

/// SHA-256 hex digest of a password — what the users table stores and
/// what `Database::authenticate` compares against.
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Build a new session token for `subject`, signed with `secret`.
///
/// Returns the raw cookie value (the token string, not the full
/// Set-Cookie header).
pub fn create_token(secret: &str, subject: &Subject) -> String {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let mut nonce_bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut nonce_bytes);
    let nonce = hex::encode(nonce_bytes);

    let subject_b64 = URL_SAFE_NO_PAD.encode(subject.encode());
    let payload = format!("{subject_b64}.{timestamp}.{nonce}");
    let sig = hmac_sign(secret, &payload);

    format!("{payload}.{sig}")
}

/// Verify a session token. Returns the subject if the HMAC is valid and
/// the token is not older than `SESSION_TTL_SECS`.
pub fn verify_token(secret: &str, token: &str) -> Option<Subject> {
    // Format: {subject_b64}.{timestamp}.{nonce}.{hmac}
    let parts: Vec<&str> = token.splitn(4, '.').collect();
    if parts.len() != 4 {
        return None;
    }
    let (subject_b64, timestamp_str, nonce, provided_sig) =
        (parts[0], parts[1], parts[2], parts[3]);

    // Verify HMAC
    let payload = format!("{subject_b64}.{timestamp_str}.{nonce}");
    let expected_sig = hmac_sign(secret, &payload);
    if !constant_time_eq(provided_sig, &expected_sig) {
        return None;
    }

    // Verify age
    let timestamp = timestamp_str.parse::<u64>().ok()?;
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    if now.saturating_sub(timestamp) >= SESSION_TTL_SECS {
        return None;
    }

    let subject_raw = URL_SAFE_NO_PAD.decode(subject_b64).ok()?;
    Subject::decode(std::str::from_utf8(&subject_raw).ok()?)
}

/// Axum middleware: student routes. Redirects to /login without a valid
/// student session; inserts CurrentUser for handlers on success.
pub async fn require_user(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match session_subject(&request, &state.config.session_secret) {
        Some(Subject::Student(username)) => {
            request.extensions_mut().insert(CurrentUser(username));
            next.run(request).await
        }
        _ => Redirect::to("/login").into_response(),
    }
}

/// Axum middleware: faculty routes. Redirects to /faculty without a valid
/// faculty session.
pub async fn require_faculty(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match session_subject(&request, &state.config.session_secret) {
        Some(Subject::Faculty) => {
            request.extensions_mut().insert(FacultyUser);
            next.run(request).await
        }
        _ => Redirect::to("/faculty").into_response(),
    }
}

/// Build the `Set-Cookie` header value for a new session.
pub fn set_cookie_header(token: &str) -> String {
    format!("{COOKIE_NAME}={token}; HttpOnly; SameSite=Strict; Path=/; Max-Age={SESSION_TTL_SECS}")
}

/// Build the `Set-Cookie` header value that clears the session cookie.
pub fn clear_cookie_header() -> String {
    format!("{COOKIE_NAME}=; HttpOnly; SameSite=Strict; Path=/; Max-Age=0")
}

// --- Private helpers ---

fn hmac_sign(secret: &str, payload: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .unwrap_or_else(|_| HmacSha256::new_from_slice(b"fallback").unwrap());
    mac.update(payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Constant-time string comparison to prevent timing attacks.
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

/// Extract and validate the session cookie from the request.
fn session_subject(request: &Request, secret: &str) -> Option<Subject> {
    let cookie_header = request.headers().get(header::COOKIE)?.to_str().ok()?;

    // Parse individual cookie pairs
    for pair in cookie_header.split(';') {
        let pair = pair.trim();
        if let Some((name, value)) = pair.split_once('=') {
            if name.trim() == COOKIE_NAME {
                return verify_token(secret, value.trim());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_token_roundtrip() {
        let secret = "test_secret_32_bytes_long_enough!";
        let subject = Subject::Student("alice".to_string());
        let token = create_token(secret, &subject);
        assert_eq!(verify_token(secret, &token), Some(subject));
    }

    #[test]
    fn test_faculty_token_roundtrip() {
        let secret = "another_secret";
        let token = create_token(secret, &Subject::Faculty);
        assert_eq!(verify_token(secret, &token), Some(Subject::Faculty));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_token("correct_secret", &Subject::Faculty);
        assert_eq!(verify_token("wrong_secret", &token), None);
    }

    #[test]
    fn test_tampered_subject_rejected() {
        let secret = "my_secret";
        let token = create_token(secret, &Subject::Student("mallory".to_string()));
        // Swap the subject segment for a faculty one, keeping the signature.
        let faculty_b64 = URL_SAFE_NO_PAD.encode("faculty");
        let mut parts: Vec<&str> = token.splitn(4, '.').collect();
        parts[0] = &faculty_b64;
        let forged = parts.join(".");
        assert_eq!(verify_token(secret, &forged), None);
    }

    #[test]
    fn test_malformed_token_rejected() {
        assert_eq!(verify_token("secret", "not.a.token"), None);
        assert_eq!(verify_token("secret", ""), None);
        assert_eq!(verify_token("secret", "a.b.c.d"), None);
    }

    #[test]
    fn test_password_hash_is_stable_hex() {
        let h = hash_password("hunter2");
        assert_eq!(h.len(), 64);
        assert_eq!(h, hash_password("hunter2"));
        assert_ne!(h, hash_password("hunter3"));
    }
}
