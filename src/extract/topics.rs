// The extraction routine itself — comma-split, clean, dedup, cap.

use tracing::{debug, warn};

use super::cleanup::{filter_charset, strip_section_labels};
use super::document::{DocumentFormat, SyllabusDocument};
use super::traits::DocumentReader;

/// Shortest string we accept as a topic, in characters.
pub const MIN_TOPIC_LEN: usize = 3;
/// Longest string we accept as a topic, in characters.
pub const MAX_TOPIC_LEN: usize = 60;
/// How many topics a single syllabus can contribute.
pub const MAX_TOPICS: usize = 25;

/// The tagged result of one extraction attempt. Exactly one variant per
/// call; all four are ordinary outcomes the caller branches on, never
/// fatal conditions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    /// At least one qualifying topic, in first-seen order, at most
    /// MAX_TOPICS of them.
    Topics(Vec<String>),
    /// The upload's format is neither plain text nor PDF. Content is
    /// never inspected in this case.
    Unsupported,
    /// The document reader failed. The underlying error is logged and
    /// absorbed here, never propagated.
    ExtractionError,
    /// The document was readable but produced zero qualifying topics.
    Empty,
}

/// Extracts topic candidates from one uploaded syllabus.
///
/// Stateless and synchronous — a pure function of its input aside from
/// the injected reader, so it's safe to call concurrently from multiple
/// request handlers.
pub struct TopicExtractor<R: DocumentReader> {
    reader: R,
}

impl<R: DocumentReader> TopicExtractor<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Run the full pipeline on one document.
    pub fn extract(&self, doc: &SyllabusDocument<'_>) -> ExtractionOutcome {
        let text = match doc.format {
            DocumentFormat::Other => return ExtractionOutcome::Unsupported,
            DocumentFormat::PlainText => String::from_utf8_lossy(doc.bytes).into_owned(),
            DocumentFormat::Pdf => match self.reader.read_pages(doc.bytes) {
                Ok(pages) => join_pages(&pages),
                Err(err) => {
                    warn!(error = %err, "syllabus page extraction failed");
                    return ExtractionOutcome::ExtractionError;
                }
            },
        };

        let topics = collect_topics(&text);
        debug!(count = topics.len(), "extracted syllabus topics");

        if topics.is_empty() {
            ExtractionOutcome::Empty
        } else {
            ExtractionOutcome::Topics(topics)
        }
    }
}

/// Concatenate page texts in document order, single-space separated.
/// Pages with no extractable text contribute nothing, not even a
/// placeholder.
fn join_pages(pages: &[String]) -> String {
    let nonempty: Vec<&str> = pages
        .iter()
        .map(String::as_str)
        .filter(|p| !p.is_empty())
        .collect();
    nonempty.join(" ")
}

/// Split on commas (the only delimiter), clean each fragment, and keep
/// the qualifying ones — deduplicated by exact equality, first occurrence
/// wins, capped at MAX_TOPICS.
fn collect_topics(text: &str) -> Vec<String> {
    let mut topics: Vec<String> = Vec::new();

    for fragment in text.split(',') {
        let cleaned = filter_charset(&strip_section_labels(fragment.trim()));
        // No re-trim after cleanup: the cleaned string is used as-is.
        if cleaned.len() < MIN_TOPIC_LEN || cleaned.len() > MAX_TOPIC_LEN {
            continue;
        }
        if !topics.contains(&cleaned) {
            topics.push(cleaned);
        }
    }

    topics.truncate(MAX_TOPICS);
    topics
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_skips_blank_pages() {
        let pages = vec![
            "Algebra".to_string(),
            String::new(),
            "Geometry".to_string(),
        ];
        assert_eq!(join_pages(&pages), "Algebra Geometry");
    }

    #[test]
    fn collect_drops_short_and_long_fragments() {
        let long = "x".repeat(61);
        let text = format!("ok topic, ab, {long}");
        assert_eq!(collect_topics(&text), vec!["ok topic".to_string()]);
    }
}
