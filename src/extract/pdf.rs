// lopdf-backed DocumentReader.
//
// Loads the PDF from memory and extracts text page by page, so the
// extractor can skip blank pages and keep page order. Any lopdf error —
// load or per-page — surfaces as Err and gets absorbed into
// ExtractionOutcome::ExtractionError by the caller.

use anyhow::{Context, Result};
use lopdf::Document;

use super::traits::DocumentReader;

/// Production reader for `.pdf` uploads.
#[derive(Default)]
pub struct LopdfReader;

impl DocumentReader for LopdfReader {
    fn read_pages(&self, bytes: &[u8]) -> Result<Vec<String>> {
        let doc = Document::load_mem(bytes).context("failed to parse PDF")?;

        let mut pages = Vec::new();
        for (page_num, _page_id) in doc.get_pages() {
            let text = doc
                .extract_text(&[page_num])
                .with_context(|| format!("failed to extract text from page {page_num}"))?;
            pages.push(text);
        }
        Ok(pages)
    }
}
