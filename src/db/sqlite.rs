// SqliteDatabase — rusqlite backend implementing the Database trait.
//
// The Connection is wrapped in tokio::sync::Mutex because Connection is
// !Send. Trait methods lock the mutex, do synchronous rusqlite work, and
// return. The lock is never held across .await points — Rust enforces this
// because MutexGuard is !Send. One connection, one writer at a time: that
// is the whole concurrency story for these stores.

use anyhow::Result;
use async_trait::async_trait;
use rusqlite::Connection;
use tokio::sync::Mutex;

use super::models::{QuizQuestion, UploadKind, UploadRecord};
use super::traits::Database;

pub struct SqliteDatabase {
    conn: Mutex<Connection>,
}

impl SqliteDatabase {
    /// Wrap an already-opened rusqlite Connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

#[async_trait]
impl Database for SqliteDatabase {
    async fn table_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::schema::table_count(&conn)
    }

    async fn create_user(&self, username: &str, password_hash: &str) -> Result<bool> {
        let conn = self.conn.lock().await;
        super::queries::create_user(&conn, username, password_hash)
    }

    async fn authenticate(&self, username: &str, password_hash: &str) -> Result<bool> {
        let conn = self.conn.lock().await;
        super::queries::authenticate(&conn, username, password_hash)
    }

    async fn user_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::user_count(&conn)
    }

    async fn put_upload(&self, username: &str, kind: UploadKind, path: &str) -> Result<()> {
        let conn = self.conn.lock().await;
        super::queries::put_upload(&conn, username, kind, path)
    }

    async fn get_upload(&self, username: &str, kind: UploadKind) -> Result<Option<String>> {
        let conn = self.conn.lock().await;
        super::queries::get_upload(&conn, username, kind)
    }

    async fn get_uploads(&self, username: &str) -> Result<Vec<UploadRecord>> {
        let conn = self.conn.lock().await;
        super::queries::get_uploads(&conn, username)
    }

    async fn upload_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::upload_count(&conn)
    }

    async fn add_question(&self, question: &QuizQuestion) -> Result<()> {
        let conn = self.conn.lock().await;
        super::queries::add_question(&conn, question)
    }

    async fn questions_for_topic(&self, topic: &str) -> Result<Vec<QuizQuestion>> {
        let conn = self.conn.lock().await;
        super::queries::questions_for_topic(&conn, topic)
    }

    async fn topics_with_questions(&self) -> Result<Vec<(String, i64)>> {
        let conn = self.conn.lock().await;
        super::queries::topics_with_questions(&conn)
    }
}
