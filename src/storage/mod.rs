// File store — filesystem blob storage for uploaded documents.
//
// Files land under the configured upload directory as
// `{owner}_{kind}.{extension}`, so re-uploading a slot overwrites the
// previous file. Paths handed back (and accepted by `read`) are relative
// to the root; `read` refuses anything that could escape it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::db::models::UploadKind;

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the upload directory if it doesn't exist yet.
    pub fn ensure_root(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root)
            .with_context(|| format!("Failed to create upload dir {}", self.root.display()))?;
        Ok(())
    }

    /// Store one upload and return its path relative to the root.
    ///
    /// Owner and extension are sanitized to a filename-safe charset before
    /// they're interpolated into the path.
    pub fn save(
        &self,
        owner: &str,
        kind: UploadKind,
        bytes: &[u8],
        extension: &str,
    ) -> Result<String> {
        let owner = sanitize(owner);
        let extension = sanitize(extension);
        if owner.is_empty() {
            anyhow::bail!("Upload owner name is empty after sanitization");
        }

        let name = if extension.is_empty() {
            format!("{owner}_{}", kind.as_str())
        } else {
            format!("{owner}_{}.{extension}", kind.as_str())
        };

        let full = self.root.join(&name);
        std::fs::write(&full, bytes)
            .with_context(|| format!("Failed to write upload to {}", full.display()))?;
        Ok(name)
    }

    /// Read back a previously saved upload by its relative path.
    pub fn read(&self, relative: &str) -> Result<Vec<u8>> {
        if !is_safe_relative(relative) {
            anyhow::bail!("Refusing upload path outside the store: {relative}");
        }
        let full = self.root.join(relative);
        let bytes = std::fs::read(&full)
            .with_context(|| format!("Failed to read upload {}", full.display()))?;
        Ok(bytes)
    }

    /// Whether a previously saved upload still exists on disk.
    pub fn exists(&self, relative: &str) -> bool {
        is_safe_relative(relative) && self.root.join(relative).is_file()
    }
}

/// Keep letters, digits, hyphens, and underscores; drop everything else.
fn sanitize(part: &str) -> String {
    part.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
        .collect()
}

/// A stored path is a single path component: no separators, no parent refs.
fn is_safe_relative(relative: &str) -> bool {
    !relative.is_empty()
        && !relative.contains(['/', '\\'])
        && !relative.contains("..")
        && !Path::new(relative).is_absolute()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_and_read_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let path = store
            .save("alice", UploadKind::Syllabus, b"Algebra, Geometry", "txt")
            .unwrap();
        assert_eq!(path, "alice_syllabus.txt");
        assert_eq!(store.read(&path).unwrap(), b"Algebra, Geometry");
    }

    #[test]
    fn save_overwrites_the_slot() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.save("bob", UploadKind::Notes, b"v1", "txt").unwrap();
        let path = store.save("bob", UploadKind::Notes, b"v2", "txt").unwrap();
        assert_eq!(store.read(&path).unwrap(), b"v2");
    }

    #[test]
    fn save_sanitizes_hostile_owner_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let path = store
            .save("../../etc/passwd", UploadKind::Syllabus, b"x", "txt")
            .unwrap();
        assert_eq!(path, "etcpasswd_syllabus.txt");
    }

    #[test]
    fn read_rejects_traversal_paths() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.read("../outside.txt").is_err());
        assert!(store.read("a/b.txt").is_err());
        assert!(store.read("").is_err());
    }
}
