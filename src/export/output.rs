//! Destinations for finished documents.

use chrono::NaiveDateTime;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// MIME type of a WordprocessingML document.
pub const DOCX_MIME_TYPE: &str = crate::ooxml::opc::constants::content_type::WML_DOCUMENT;

const MAX_TITLE_CHARS: usize = 50;

/// Receives the finished document. Called at most once per run, and only
/// with a complete container.
pub trait OutputSink {
    fn save(&mut self, filename: &str, mime_type: &str, bytes: &[u8]) -> io::Result<()>;
}

/// Writes documents into a directory.
///
/// The bytes go to a temporary file in the same directory which is renamed
/// over the target only once fully written, so a failed save leaves no
/// truncated document behind.
#[derive(Debug, Clone)]
pub struct DirectoryOutput {
    dir: PathBuf,
    last_path: Option<PathBuf>,
}

impl DirectoryOutput {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            last_path: None,
        }
    }

    /// Path of the most recently written document.
    pub fn last_path(&self) -> Option<&Path> {
        self.last_path.as_deref()
    }
}

impl OutputSink for DirectoryOutput {
    fn save(&mut self, filename: &str, _mime_type: &str, bytes: &[u8]) -> io::Result<()> {
        let name = Path::new(filename).file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("not a file name: {filename:?}"),
            )
        })?;
        let path = self.dir.join(name);
        let mut file = tempfile::NamedTempFile::new_in(&self.dir)?;
        file.write_all(bytes)?;
        file.as_file().sync_all()?;
        file.persist(&path).map_err(|e| e.error)?;
        self.last_path = Some(path);
        Ok(())
    }
}

/// A saved document held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedDocument {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Keeps the last saved document in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryOutput {
    saved: Option<SavedDocument>,
}

impl MemoryOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn saved(&self) -> Option<&SavedDocument> {
        self.saved.as_ref()
    }

    pub fn into_saved(self) -> Option<SavedDocument> {
        self.saved
    }
}

impl OutputSink for MemoryOutput {
    fn save(&mut self, filename: &str, mime_type: &str, bytes: &[u8]) -> io::Result<()> {
        self.saved = Some(SavedDocument {
            filename: filename.to_string(),
            mime_type: mime_type.to_string(),
            bytes: bytes.to_vec(),
        });
        Ok(())
    }
}

/// Build `<safe_title>_<YYYY-MM-DDTHH-MM-SS>.docx`.
///
/// Characters that are invalid in file names (`<>:"/\|?*`) are removed, the
/// title is trimmed and cut to 50 characters, and an empty result becomes
/// `document`.
///
/// ```rust
/// use chrono::NaiveDate;
/// use markdocx::export::export_filename;
///
/// let at = NaiveDate::from_ymd_opt(2024, 3, 9)
///     .unwrap()
///     .and_hms_opt(8, 5, 0)
///     .unwrap();
/// assert_eq!(export_filename("Q1: plan?", at), "Q1 plan_2024-03-09T08-05-00.docx");
/// ```
pub fn export_filename(title: &str, timestamp: NaiveDateTime) -> String {
    let cleaned: String = title
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*'))
        .collect();
    let safe: String = cleaned.trim().chars().take(MAX_TITLE_CHARS).collect();
    let safe = if safe.is_empty() { "document" } else { safe.as_str() };
    format!("{safe}_{}.docx", timestamp.format("%Y-%m-%dT%H-%M-%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap()
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(
            export_filename("a<b>c:\"d/e\\f|g?h*", at()),
            "abcdefgh_2025-01-02T03-04-05.docx"
        );
        assert_eq!(export_filename("  ", at()), "document_2025-01-02T03-04-05.docx");
        assert_eq!(export_filename("???", at()), "document_2025-01-02T03-04-05.docx");
    }

    #[test]
    fn test_export_filename_truncates_by_chars() {
        let title = "标".repeat(60);
        let name = export_filename(&title, at());
        assert_eq!(name, format!("{}_2025-01-02T03-04-05.docx", "标".repeat(50)));
    }

    #[test]
    fn test_directory_output() {
        let dir = tempfile::tempdir().unwrap();
        let mut output = DirectoryOutput::new(dir.path());
        output.save("out.docx", DOCX_MIME_TYPE, b"PK").unwrap();
        let path = output.last_path().unwrap();
        assert_eq!(path, dir.path().join("out.docx"));
        assert_eq!(std::fs::read(path).unwrap(), b"PK");
    }

    #[test]
    fn test_directory_output_replaces_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("out.docx"), b"old contents").unwrap();
        let mut output = DirectoryOutput::new(dir.path());

        output.save("out.docx", DOCX_MIME_TYPE, b"PK new").unwrap();

        assert_eq!(std::fs::read(dir.path().join("out.docx")).unwrap(), b"PK new");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_directory_output_missing_dir_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let mut output = DirectoryOutput::new(&missing);

        assert!(output.save("out.docx", DOCX_MIME_TYPE, b"PK").is_err());
        assert!(output.last_path().is_none());
        assert!(!missing.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_directory_output_rejects_bare_root() {
        let dir = tempfile::tempdir().unwrap();
        let mut output = DirectoryOutput::new(dir.path());
        assert!(output.save("..", DOCX_MIME_TYPE, b"PK").is_err());
    }

    #[test]
    fn test_memory_output() {
        let mut output = MemoryOutput::new();
        output.save("a.docx", DOCX_MIME_TYPE, b"1").unwrap();
        output.save("b.docx", DOCX_MIME_TYPE, b"2").unwrap();
        let saved = output.into_saved().unwrap();
        assert_eq!(saved.filename, "b.docx");
        assert_eq!(saved.bytes, b"2");
    }
}
