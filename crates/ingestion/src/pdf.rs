//! PDF text extraction module
//!
//! Extracts text content from in-memory PDF files using lopdf.

use crate::errors::IngestionError;
use tracing::{debug, warn};

/// Extract text content from PDF bytes, one line break per page
pub fn extract_text_from_pdf(filename: &str, data: &[u8]) -> Result<String, IngestionError> {
    let doc = lopdf::Document::load_mem(data).map_err(|e| IngestionError::PdfParseError {
        filename: filename.to_string(),
        message: format!("Failed to load PDF: {}", e),
    })?;

    let mut text = String::new();
    let pages = doc.get_pages();

    debug!(page_count = pages.len(), "Extracting text from PDF");

    for page_num in pages.keys() {
        match doc.extract_text(&[*page_num]) {
            Ok(page_text) => {
                text.push_str(&page_text);
                text.push('\n');
            }
            Err(e) => {
                warn!(page = page_num, error = %e, "Failed to extract text from page, skipping");
            }
        }
    }

    let trimmed = text.trim().to_string();

    debug!(
        raw_len = text.len(),
        trimmed_len = trimmed.len(),
        "Text extraction complete"
    );

    Ok(trimmed)
}
