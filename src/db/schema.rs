// Database schema — table creation and migrations.
//
// We use a simple version-based approach: a `schema_version` table tracks
// which migrations have run. Everything below is idempotent, so it's safe
// to call on every startup.

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Create all tables if they don't exist yet.
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        -- Tracks schema version for future migrations
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Student accounts. Passwords are stored as SHA-256 hex digests,
        -- never plaintext.
        CREATE TABLE IF NOT EXISTS users (
            username TEXT PRIMARY KEY,
            password_hash TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- One row per (student, kind) upload. Re-uploading replaces the row.
        CREATE TABLE IF NOT EXISTS uploads (
            username TEXT NOT NULL,
            kind TEXT NOT NULL CHECK (kind IN ('syllabus', 'notes')),
            path TEXT NOT NULL,                -- relative to the upload dir
            uploaded_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (username, kind)
        );

        -- Faculty-authored quiz questions, keyed by normalized topic
        -- (lowercased, trimmed).
        CREATE TABLE IF NOT EXISTS quiz_questions (
            id TEXT PRIMARY KEY,               -- UUIDv4
            topic TEXT NOT NULL,
            question TEXT NOT NULL,
            option_a TEXT NOT NULL,
            option_b TEXT NOT NULL,
            option_c TEXT NOT NULL,
            option_d TEXT NOT NULL,
            correct TEXT NOT NULL CHECK (correct IN ('A', 'B', 'C', 'D')),
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_quiz_questions_topic
            ON quiz_questions(topic);

        INSERT OR IGNORE INTO schema_version (version) VALUES (1);
        ",
    )
    .context("Failed to create database tables")?;

    Ok(())
}

/// Count the number of user-created tables in the database.
pub fn table_count(conn: &Connection) -> Result<i64> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%'",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}
