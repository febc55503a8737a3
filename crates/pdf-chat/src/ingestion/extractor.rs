//! PDF text extraction with per-file failure tolerance

use crate::error::{Error, Result};

/// An uploaded PDF: original filename plus raw bytes
#[derive(Debug, Clone)]
pub struct PdfFile {
    pub name: String,
    pub data: Vec<u8>,
}

impl PdfFile {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

/// A file that could not be parsed and was skipped
#[derive(Debug, Clone, serde::Serialize)]
pub struct SkippedFile {
    pub filename: String,
    pub reason: String,
}

/// Result of extracting a batch of PDFs: the concatenated text (in upload
/// order) plus the files that had to be skipped.
#[derive(Debug, Clone)]
pub struct ExtractedCorpus {
    pub text: String,
    pub skipped: Vec<SkippedFile>,
}

/// PDF text extractor
pub struct PdfExtractor;

impl PdfExtractor {
    /// Extract text from every file, concatenating in upload order.
    ///
    /// A file that fails to parse is skipped with a warning; extraction
    /// continues with the remaining files. A file that parses but yields no
    /// text contributes an empty string, not an error.
    pub fn extract_all(files: &[PdfFile]) -> ExtractedCorpus {
        let mut text = String::new();
        let mut skipped = Vec::new();

        for file in files {
            match Self::extract_one(&file.data) {
                Ok(file_text) => {
                    text.push_str(&file_text);
                }
                Err(e) => {
                    tracing::warn!("Skipping '{}': {}", file.name, e);
                    skipped.push(SkippedFile {
                        filename: file.name.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        ExtractedCorpus { text, skipped }
    }

    /// Extract text from a single PDF byte stream.
    pub fn extract_one(data: &[u8]) -> Result<String> {
        let content = match pdf_extract::extract_text_from_mem(data) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("pdf-extract failed: {}, trying fallback", e);
                Self::extract_text_fallback(data)?
            }
        };

        Ok(cleanup_text(&content))
    }

    /// Count the pages of a PDF, when it can be opened at all.
    pub fn page_count(data: &[u8]) -> Option<u32> {
        lopdf::Document::load_mem(data)
            .ok()
            .map(|doc| doc.get_pages().len() as u32)
    }

    /// Fallback extraction walking the content streams with lopdf directly.
    fn extract_text_fallback(data: &[u8]) -> Result<String> {
        let doc = lopdf::Document::load_mem(data)
            .map_err(|e| Error::extraction("document.pdf", format!("Failed to load PDF: {}", e)))?;

        let mut all_text = String::new();

        for (page_num, page_id) in doc.get_pages() {
            match doc.get_page_content(page_id) {
                Ok(content) => {
                    let page_text = Self::extract_text_from_content(&content);
                    if !page_text.is_empty() {
                        all_text.push_str(&page_text);
                        all_text.push('\n');
                    }
                }
                Err(e) => {
                    tracing::debug!("Could not get content for page {}: {}", page_num, e);
                }
            }
        }

        Ok(all_text)
    }

    /// Extract text-show operands from a PDF content stream.
    fn extract_text_from_content(content: &[u8]) -> String {
        let content_str = String::from_utf8_lossy(content);
        let mut text = String::new();
        let mut in_text_block = false;

        for line in content_str.lines() {
            let line = line.trim();

            if line == "BT" {
                in_text_block = true;
                continue;
            }
            if line == "ET" {
                in_text_block = false;
                if !text.is_empty() && !text.ends_with(' ') {
                    text.push(' ');
                }
                continue;
            }

            if in_text_block && (line.ends_with("Tj") || line.ends_with("TJ")) {
                if let Some(start) = line.find('(') {
                    if let Some(end) = line.rfind(')') {
                        if start < end {
                            let extracted = &line[start + 1..end];
                            let decoded = extracted
                                .replace("\\n", "\n")
                                .replace("\\r", "\r")
                                .replace("\\t", "\t")
                                .replace("\\(", "(")
                                .replace("\\)", ")")
                                .replace("\\\\", "\\");
                            text.push_str(&decoded);
                        }
                    }
                }
            }
        }

        text
    }
}

/// Clean up extracted text: strip NULs, normalize line endings, trim
/// trailing per-line whitespace, and collapse runs of blank lines to a
/// single paragraph break. Paragraph structure is preserved because the
/// chunker prefers to break on it.
fn cleanup_text(text: &str) -> String {
    let normalized = text.replace('\0', "").replace("\r\n", "\n");

    let mut out = String::with_capacity(normalized.len());
    let mut blank_run = 0usize;

    for line in normalized.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            blank_run += 1;
            continue;
        }
        if !out.is_empty() {
            if blank_run > 0 {
                out.push_str("\n\n");
            } else {
                out.push('\n');
            }
        }
        blank_run = 0;
        out.push_str(line);
    }

    out
}
