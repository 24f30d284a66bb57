// Composition tests — verifying that pure functions chain together
// correctly across modules:
//   extraction -> normalized topic key -> authored question -> grading
// without any network calls or web machinery. The only side effects are
// an in-memory SQLite database and a temp dir for the file store.

use std::collections::HashMap;

use anyhow::Result;
use rusqlite::Connection;

use lectern::db::models::{QuizQuestion, UploadKind};
use lectern::db::{queries, schema};
use lectern::extract::{
    DocumentFormat, DocumentReader, ExtractionOutcome, SyllabusDocument, TopicExtractor,
};
use lectern::quiz::{grade, normalize_topic};
use lectern::storage::FileStore;

struct FakeReader(Vec<String>);

impl DocumentReader for FakeReader {
    fn read_pages(&self, _bytes: &[u8]) -> Result<Vec<String>> {
        Ok(self.0.clone())
    }
}

// ============================================================
// Chain: upload bytes -> topics -> quiz key -> graded score
// ============================================================

#[test]
fn syllabus_topics_line_up_with_authored_quizzes() -> Result<()> {
    let conn = Connection::open_in_memory()?;
    schema::create_tables(&conn)?;

    // Student uploads a syllabus.
    let content = b"Unit 1: Algebra, Unit 2: Graph Theory";
    let extractor = TopicExtractor::new(FakeReader(vec![]));
    let doc = SyllabusDocument::new(DocumentFormat::PlainText, content);
    let ExtractionOutcome::Topics(topics) = extractor.extract(&doc) else {
        panic!("expected topics");
    };
    assert_eq!(topics, vec!["Algebra", "Graph Theory"]);

    // Faculty authors a question with a differently-cased topic spelling.
    let q = QuizQuestion::new(
        "GRAPH theory",
        "How many edges in a tree with n nodes?".to_string(),
        "n".to_string(),
        "n - 1".to_string(),
        "n + 1".to_string(),
        "2n".to_string(),
        "B".to_string(),
    );
    queries::add_question(&conn, &q)?;

    // The study-plan topic resolves to the same question set.
    let key = normalize_topic(&topics[1]);
    let questions = queries::questions_for_topic(&conn, &key)?;
    assert_eq!(questions.len(), 1);

    // Student answers correctly.
    let mut answers = HashMap::new();
    answers.insert(questions[0].id.clone(), "B".to_string());
    let score = grade(&questions, &answers);
    assert_eq!((score.correct, score.total), (1, 1));
    Ok(())
}

// ============================================================
// Chain: file store round trip feeds extraction
// ============================================================

#[test]
fn stored_syllabus_extracts_after_readback() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = FileStore::new(dir.path());

    let uploaded = b"Chapter 1: Sets, Chapter 2: Relations, Functions".to_vec();
    let path = store.save("carol", UploadKind::Syllabus, &uploaded, "txt")?;

    // Later request: read the stored bytes back and extract from them.
    let bytes = store.read(&path)?;
    let format = DocumentFormat::from_filename(&path);
    assert_eq!(format, DocumentFormat::PlainText);

    let extractor = TopicExtractor::new(FakeReader(vec![]));
    let outcome = extractor.extract(&SyllabusDocument::new(format, &bytes));
    assert_eq!(
        outcome,
        ExtractionOutcome::Topics(vec![
            "Sets".to_string(),
            "Relations".to_string(),
            "Functions".to_string(),
        ])
    );
    Ok(())
}
