// Synchronous rusqlite queries.
//
// Free functions over &Connection so they can be tested against an
// in-memory database without the async trait machinery. SqliteDatabase
// wraps these behind the Database trait.

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::models::{QuizQuestion, UploadKind, UploadRecord};

// --- Users ---

/// Create a new user. Returns false if the username is already taken.
pub fn create_user(conn: &Connection, username: &str, password_hash: &str) -> Result<bool> {
    let changed = conn
        .execute(
            "INSERT OR IGNORE INTO users (username, password_hash) VALUES (?1, ?2)",
            params![username, password_hash],
        )
        .context("Failed to insert user")?;
    Ok(changed == 1)
}

/// Check a username/password-hash pair. Unknown usernames just return false.
pub fn authenticate(conn: &Connection, username: &str, password_hash: &str) -> Result<bool> {
    let stored: Option<String> = conn
        .query_row(
            "SELECT password_hash FROM users WHERE username = ?1",
            params![username],
            |row| row.get(0),
        )
        .optional()?;
    Ok(stored.as_deref() == Some(password_hash))
}

pub fn user_count(conn: &Connection) -> Result<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
    Ok(count)
}

// --- Uploads ---

/// Record where a student's upload landed (upsert — one row per slot).
pub fn put_upload(conn: &Connection, username: &str, kind: UploadKind, path: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO uploads (username, kind, path, uploaded_at)
         VALUES (?1, ?2, ?3, datetime('now'))
         ON CONFLICT (username, kind) DO UPDATE SET
             path = excluded.path,
             uploaded_at = excluded.uploaded_at",
        params![username, kind.as_str(), path],
    )
    .context("Failed to record upload")?;
    Ok(())
}

/// Look up the stored path for one upload slot.
pub fn get_upload(conn: &Connection, username: &str, kind: UploadKind) -> Result<Option<String>> {
    let path = conn
        .query_row(
            "SELECT path FROM uploads WHERE username = ?1 AND kind = ?2",
            params![username, kind.as_str()],
            |row| row.get(0),
        )
        .optional()?;
    Ok(path)
}

/// All upload records for a student.
pub fn get_uploads(conn: &Connection, username: &str) -> Result<Vec<UploadRecord>> {
    let mut stmt = conn.prepare(
        "SELECT username, kind, path, uploaded_at FROM uploads WHERE username = ?1 ORDER BY kind",
    )?;
    let rows = stmt.query_map(params![username], |row| {
        Ok(UploadRecord {
            username: row.get(0)?,
            kind: row.get(1)?,
            path: row.get(2)?,
            uploaded_at: row.get(3)?,
        })
    })?;
    let mut records = Vec::new();
    for row in rows {
        records.push(row?);
    }
    Ok(records)
}

pub fn upload_count(conn: &Connection) -> Result<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM uploads", [], |row| row.get(0))?;
    Ok(count)
}

// --- Quiz questions ---

/// Append a question under its (already normalized) topic key.
pub fn add_question(conn: &Connection, q: &QuizQuestion) -> Result<()> {
    conn.execute(
        "INSERT INTO quiz_questions
             (id, topic, question, option_a, option_b, option_c, option_d, correct)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            q.id,
            q.topic,
            q.question,
            q.option_a,
            q.option_b,
            q.option_c,
            q.option_d,
            q.correct
        ],
    )
    .context("Failed to insert quiz question")?;
    Ok(())
}

/// All questions for a normalized topic, oldest first.
pub fn questions_for_topic(conn: &Connection, topic: &str) -> Result<Vec<QuizQuestion>> {
    let mut stmt = conn.prepare(
        "SELECT id, topic, question, option_a, option_b, option_c, option_d, correct
         FROM quiz_questions WHERE topic = ?1 ORDER BY created_at, id",
    )?;
    let rows = stmt.query_map(params![topic], |row| {
        Ok(QuizQuestion {
            id: row.get(0)?,
            topic: row.get(1)?,
            question: row.get(2)?,
            option_a: row.get(3)?,
            option_b: row.get(4)?,
            option_c: row.get(5)?,
            option_d: row.get(6)?,
            correct: row.get(7)?,
        })
    })?;
    let mut questions = Vec::new();
    for row in rows {
        questions.push(row?);
    }
    Ok(questions)
}

/// (topic, question count) pairs for the status command, most questions first.
pub fn topics_with_questions(conn: &Connection) -> Result<Vec<(String, i64)>> {
    let mut stmt = conn.prepare(
        "SELECT topic, COUNT(*) FROM quiz_questions GROUP BY topic ORDER BY COUNT(*) DESC, topic",
    )?;
    let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
    let mut topics = Vec::new();
    for row in rows {
        topics.push(row?);
    }
    Ok(topics)
}
