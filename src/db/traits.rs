// Database trait — backend-agnostic async interface for all DB operations.
//
// Implementor: SqliteDatabase (wraps rusqlite). All methods are async so a
// native-async backend could sit behind the same interface later; request
// handlers only ever see `Arc<dyn Database>`.
//
// The trait mirrors the queries.rs function signatures, so the free
// functions stay directly testable against a bare Connection.

use anyhow::Result;
use async_trait::async_trait;

use super::models::{QuizQuestion, UploadKind, UploadRecord};

#[async_trait]
pub trait Database: Send + Sync {
    // --- Lifecycle ---

    /// Count the number of user-created tables in the database.
    async fn table_count(&self) -> Result<i64>;

    // --- Users ---

    /// Create a user. Returns false if the username is taken.
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<bool>;

    /// Check a username/password-hash pair.
    async fn authenticate(&self, username: &str, password_hash: &str) -> Result<bool>;

    /// Total registered users (status command).
    async fn user_count(&self) -> Result<i64>;

    // --- Uploads ---

    /// Record where a student's upload landed (upsert, one row per slot).
    async fn put_upload(&self, username: &str, kind: UploadKind, path: &str) -> Result<()>;

    /// Stored path for one upload slot, if any.
    async fn get_upload(&self, username: &str, kind: UploadKind) -> Result<Option<String>>;

    /// All upload records for a student.
    async fn get_uploads(&self, username: &str) -> Result<Vec<UploadRecord>>;

    /// Total stored uploads (status command).
    async fn upload_count(&self) -> Result<i64>;

    // --- Quiz questions ---

    /// Append a question under its normalized topic key.
    async fn add_question(&self, question: &QuizQuestion) -> Result<()>;

    /// All questions for a normalized topic, oldest first.
    async fn questions_for_topic(&self, topic: &str) -> Result<Vec<QuizQuestion>>;

    /// (topic, question count) pairs for the status command.
    async fn topics_with_questions(&self) -> Result<Vec<(String, i64)>>;
}
