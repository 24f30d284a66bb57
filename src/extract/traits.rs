// Document reader trait — swap-ready abstraction.
//
// Like the Database trait, this isolates the rest of the extraction code
// from the concrete PDF library. The default implementation uses lopdf;
// tests substitute readers that return canned pages or fail on demand.

use anyhow::Result;

/// Trait for reading per-page text out of a binary document.
pub trait DocumentReader: Send + Sync {
    /// Parse `bytes` and return the extracted text of every page, in
    /// document order. Pages with no extractable text come back as empty
    /// strings; the caller decides what to do with them.
    fn read_pages(&self, bytes: &[u8]) -> Result<Vec<String>>;
}
