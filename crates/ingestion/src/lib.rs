//! DocForge Ingestion
//!
//! Turns uploaded file bytes into plain text:
//! 1. Detects the file kind from the filename extension
//! 2. Extracts text (PDF via lopdf, DOCX via docx-rs, TXT as UTF-8)
//! 3. Trims the result
//!
//! Length validation is left to the caller.

mod docx;
mod errors;
mod pdf;

pub use docx::extract_text_from_docx;
pub use errors::IngestionError;
pub use pdf::extract_text_from_pdf;

use std::fmt;
use tracing::info;

/// Supported upload formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Pdf,
    Docx,
    Txt,
}

impl FileKind {
    /// Detect the kind from a filename's extension, case-insensitively
    pub fn from_filename(filename: &str) -> Option<Self> {
        match file_extension(filename).as_str() {
            "pdf" => Some(FileKind::Pdf),
            "docx" => Some(FileKind::Docx),
            "txt" => Some(FileKind::Txt),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Pdf => "pdf",
            FileKind::Docx => "docx",
            FileKind::Txt => "txt",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text pulled out of an uploaded file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub kind: FileKind,
    pub text: String,
}

/// Lowercased text after the last `.`; the whole name when there is no dot
pub fn file_extension(filename: &str) -> String {
    filename
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Extract trimmed text from an uploaded file
pub fn extract_text(filename: &str, data: &[u8]) -> Result<ExtractedText, IngestionError> {
    let kind = FileKind::from_filename(filename).ok_or_else(|| {
        IngestionError::UnsupportedFileType {
            filename: filename.to_string(),
            extension: file_extension(filename),
        }
    })?;

    let text = match kind {
        FileKind::Pdf => extract_text_from_pdf(filename, data)?,
        FileKind::Docx => extract_text_from_docx(filename, data)?,
        FileKind::Txt => extract_text_from_txt(filename, data)?,
    };

    info!(
        filename = %filename,
        kind = %kind,
        bytes = data.len(),
        chars = text.chars().count(),
        "Text extracted"
    );

    Ok(ExtractedText { kind, text })
}

/// Decode UTF-8 text; invalid sequences are an error rather than replaced
pub fn extract_text_from_txt(filename: &str, data: &[u8]) -> Result<String, IngestionError> {
    let text = std::str::from_utf8(data).map_err(|e| IngestionError::TextDecodeError {
        filename: filename.to_string(),
        message: e.to_string(),
    })?;

    Ok(text.trim().to_string())
}
