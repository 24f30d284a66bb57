// SQLite store tests against an in-memory database.
//
// These exercise the free functions in db::queries directly, the same way
// the SqliteDatabase trait impl calls them.

use anyhow::Result;
use rusqlite::Connection;

use lectern::db::models::{QuizQuestion, UploadKind};
use lectern::db::{queries, schema};

fn test_db() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    schema::create_tables(&conn)?;
    Ok(conn)
}

#[test]
fn schema_is_idempotent() -> Result<()> {
    let conn = test_db()?;
    schema::create_tables(&conn)?;
    assert!(schema::table_count(&conn)? >= 4);
    Ok(())
}

#[test]
fn duplicate_usernames_are_rejected() -> Result<()> {
    let conn = test_db()?;
    assert!(queries::create_user(&conn, "alice", "hash1")?);
    assert!(!queries::create_user(&conn, "alice", "hash2")?);
    assert_eq!(queries::user_count(&conn)?, 1);
    Ok(())
}

#[test]
fn authenticate_checks_the_stored_hash() -> Result<()> {
    let conn = test_db()?;
    queries::create_user(&conn, "alice", "hash1")?;
    assert!(queries::authenticate(&conn, "alice", "hash1")?);
    assert!(!queries::authenticate(&conn, "alice", "wrong")?);
    assert!(!queries::authenticate(&conn, "nobody", "hash1")?);
    Ok(())
}

#[test]
fn uploads_upsert_per_slot() -> Result<()> {
    let conn = test_db()?;
    queries::put_upload(&conn, "bob", UploadKind::Syllabus, "bob_syllabus.txt")?;
    queries::put_upload(&conn, "bob", UploadKind::Syllabus, "bob_syllabus.pdf")?;
    queries::put_upload(&conn, "bob", UploadKind::Notes, "bob_notes.txt")?;

    assert_eq!(
        queries::get_upload(&conn, "bob", UploadKind::Syllabus)?.as_deref(),
        Some("bob_syllabus.pdf")
    );
    assert_eq!(queries::get_uploads(&conn, "bob")?.len(), 2);
    assert_eq!(queries::upload_count(&conn)?, 2);
    Ok(())
}

#[test]
fn missing_upload_slot_is_none() -> Result<()> {
    let conn = test_db()?;
    assert_eq!(queries::get_upload(&conn, "bob", UploadKind::Notes)?, None);
    Ok(())
}

#[test]
fn questions_come_back_by_topic() -> Result<()> {
    let conn = test_db()?;
    let q1 = QuizQuestion::new(
        "Algebra",
        "2 + 2?".to_string(),
        "3".to_string(),
        "4".to_string(),
        "5".to_string(),
        "6".to_string(),
        "B".to_string(),
    );
    let q2 = QuizQuestion::new(
        "  ALGEBRA ",
        "x + x?".to_string(),
        "x".to_string(),
        "2x".to_string(),
        "x^2".to_string(),
        "0".to_string(),
        "B".to_string(),
    );
    queries::add_question(&conn, &q1)?;
    queries::add_question(&conn, &q2)?;

    // Both authored spellings normalize to one topic key.
    let questions = queries::questions_for_topic(&conn, "algebra")?;
    assert_eq!(questions.len(), 2);
    assert!(queries::questions_for_topic(&conn, "geometry")?.is_empty());

    let topics = queries::topics_with_questions(&conn)?;
    assert_eq!(topics, vec![("algebra".to_string(), 2)]);
    Ok(())
}

#[test]
fn invalid_correct_option_is_rejected_by_the_schema() -> Result<()> {
    let conn = test_db()?;
    let mut q = QuizQuestion::new(
        "algebra",
        "q".to_string(),
        "a".to_string(),
        "b".to_string(),
        "c".to_string(),
        "d".to_string(),
        "A".to_string(),
    );
    q.correct = "E".to_string();
    assert!(queries::add_question(&conn, &q).is_err());
    Ok(())
}
