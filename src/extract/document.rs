// Input model for extraction — the format tag plus the raw upload bytes.
//
// Format classification happens where the filename is known (the upload
// handler); the extractor itself never re-derives it.

/// How the uploaded syllabus should be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// A `.txt` upload — the bytes are the text.
    PlainText,
    /// A `.pdf` upload — page text comes from the DocumentReader.
    Pdf,
    /// Anything else. Extraction refuses these without looking at content.
    Other,
}

impl DocumentFormat {
    /// Classify from a bare filename extension, case-insensitively.
    /// Unrecognized extensions map to `Other`.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "txt" => Self::PlainText,
            "pdf" => Self::Pdf,
            _ => Self::Other,
        }
    }

    /// Classify from a full filename. A name without any `.` is `Other`.
    pub fn from_filename(name: &str) -> Self {
        match name.rsplit_once('.') {
            Some((_, ext)) => Self::from_extension(ext),
            None => Self::Other,
        }
    }
}

/// One uploaded syllabus, borrowed for the duration of a single
/// extraction call.
pub struct SyllabusDocument<'a> {
    pub format: DocumentFormat,
    pub bytes: &'a [u8],
}

impl<'a> SyllabusDocument<'a> {
    pub fn new(format: DocumentFormat, bytes: &'a [u8]) -> Self {
        Self { format, bytes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_known_extensions_case_insensitively() {
        assert_eq!(DocumentFormat::from_extension("txt"), DocumentFormat::PlainText);
        assert_eq!(DocumentFormat::from_extension("PDF"), DocumentFormat::Pdf);
        assert_eq!(DocumentFormat::from_extension("docx"), DocumentFormat::Other);
    }

    #[test]
    fn filename_without_extension_is_other() {
        assert_eq!(DocumentFormat::from_filename("syllabus"), DocumentFormat::Other);
        assert_eq!(DocumentFormat::from_filename("notes.tar.pdf"), DocumentFormat::Pdf);
    }
}
