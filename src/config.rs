use std::env;
use std::path::PathBuf;

use anyhow::Result;

/// Central configuration loaded from environment variables.
///
/// All secrets come from env vars (never hardcoded). The .env file
/// is loaded automatically at startup via dotenvy.
pub struct Config {
    pub db_path: String,
    /// Directory where uploaded syllabi and notes are stored.
    pub upload_dir: PathBuf,
    /// Secret for HMAC session token signing (LECTERN_SESSION_SECRET env var)
    pub session_secret: String,
    /// Faculty login id (LECTERN_FACULTY_ID env var)
    pub faculty_id: String,
    /// Faculty login pin (LECTERN_FACULTY_PIN env var)
    pub faculty_pin: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Only db_path and upload_dir have defaults — the session secret and
    /// faculty credentials are required before `serve` will start.
    pub fn load() -> Result<Self> {
        Ok(Self {
            db_path: env::var("LECTERN_DB_PATH").unwrap_or_else(|_| "./lectern.db".to_string()),
            upload_dir: env::var("LECTERN_UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./uploads")),
            session_secret: env::var("LECTERN_SESSION_SECRET").unwrap_or_default(),
            faculty_id: env::var("LECTERN_FACULTY_ID").unwrap_or_default(),
            faculty_pin: env::var("LECTERN_FACULTY_PIN").unwrap_or_default(),
        })
    }

    /// Check that the session secret is configured.
    /// Call this before starting the web server.
    pub fn require_session_secret(&self) -> Result<()> {
        if self.session_secret.is_empty() {
            anyhow::bail!(
                "LECTERN_SESSION_SECRET not set. Add it to your .env file.\n\
                 See .env.example for the required variables."
            );
        }
        Ok(())
    }

    /// Check that faculty credentials are configured.
    ///
    /// There is deliberately no built-in default pair — faculty access is
    /// issued through the environment, not baked into the binary.
    pub fn require_faculty_credentials(&self) -> Result<()> {
        if self.faculty_id.is_empty() || self.faculty_pin.is_empty() {
            anyhow::bail!(
                "LECTERN_FACULTY_ID / LECTERN_FACULTY_PIN not set. Faculty login\n\
                 is disabled until both are configured in your .env file."
            );
        }
        Ok(())
    }
}
