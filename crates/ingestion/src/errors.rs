//! Ingestion error types

use docqa_common::errors::AppError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestionError {
    #[error("Unsupported file type '{extension}' for {filename}")]
    UnsupportedFileType { filename: String, extension: String },

    #[error("PDF parse error for {filename}: {message}")]
    PdfParseError { filename: String, message: String },

    #[error("DOCX parse error for {filename}: {message}")]
    DocxParseError { filename: String, message: String },

    #[error("Text decode error for {filename}: {message}")]
    TextDecodeError { filename: String, message: String },
}

impl IngestionError {
    /// Short label for metrics
    pub fn reason(&self) -> &'static str {
        match self {
            IngestionError::UnsupportedFileType { .. } => "unsupported_type",
            IngestionError::PdfParseError { .. } => "pdf_parse",
            IngestionError::DocxParseError { .. } => "docx_parse",
            IngestionError::TextDecodeError { .. } => "text_decode",
        }
    }
}

impl From<IngestionError> for AppError {
    fn from(e: IngestionError) -> Self {
        match e {
            IngestionError::UnsupportedFileType { extension, .. } => {
                AppError::UnsupportedFileType { extension }
            }
            IngestionError::PdfParseError { filename, message }
            | IngestionError::DocxParseError { filename, message }
            | IngestionError::TextDecodeError { filename, message } => {
                AppError::Extraction { filename, message }
            }
        }
    }
}
