// Topic extraction — pulls candidate topic names out of an uploaded syllabus.
//
// The syllabus is treated as comma-separated prose: split on commas, strip
// section labels ("Unit 3:", "chapter 12-"), drop stray punctuation, and
// keep what's left if it looks like a short topic name.

pub mod cleanup;
pub mod document;
pub mod pdf;
pub mod topics;
pub mod traits;

pub use document::{DocumentFormat, SyllabusDocument};
pub use pdf::LopdfReader;
pub use topics::{ExtractionOutcome, TopicExtractor};
pub use traits::DocumentReader;
