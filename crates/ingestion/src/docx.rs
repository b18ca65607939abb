//! DOCX text extraction module

use crate::errors::IngestionError;
use tracing::debug;

/// Extract paragraph text from DOCX bytes, one line per paragraph.
///
/// Tables and other non-paragraph blocks are skipped.
pub fn extract_text_from_docx(filename: &str, data: &[u8]) -> Result<String, IngestionError> {
    let doc = docx_rs::read_docx(data).map_err(|e| IngestionError::DocxParseError {
        filename: filename.to_string(),
        message: e.to_string(),
    })?;

    let mut paragraphs = Vec::new();

    for child in doc.document.children {
        if let docx_rs::DocumentChild::Paragraph(p) = child {
            let mut line = String::new();
            for child in p.children {
                if let docx_rs::ParagraphChild::Run(run) = child {
                    for child in run.children {
                        if let docx_rs::RunChild::Text(t) = child {
                            line.push_str(&t.text);
                        }
                    }
                }
            }
            paragraphs.push(line);
        }
    }

    debug!(paragraphs = paragraphs.len(), "Extracted text from DOCX");

    Ok(paragraphs.join("\n").trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Paragraph, Run};
    use std::io::Cursor;

    fn sample_docx() -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        Docx::new()
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Quarterly report")))
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Revenue grew 20% this year.")))
            .build()
            .pack(&mut buffer)
            .unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_extract_paragraphs_from_docx() {
        let text = extract_text_from_docx("report.docx", &sample_docx()).unwrap();
        assert_eq!(text, "Quarterly report\nRevenue grew 20% this year.");
    }

    #[test]
    fn test_invalid_docx_is_parse_error() {
        let err = extract_text_from_docx("broken.docx", b"PK not really a zip").unwrap_err();
        assert!(matches!(err, IngestionError::DocxParseError { .. }));
    }
}
