use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

pub const SCALE_NOT_FOUND: &str = "Not found";

// "scale", optional colon/whitespace, then the rest of the line
static SCALE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)scale[:\s]*([^\n]+)").expect("scale pattern is valid"));

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Could not read drawing: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF parsing failed: {0}")]
    Load(#[source] lopdf::Error),

    #[error("Text extraction failed on page {page}: {source}")]
    PageText {
        page: u32,
        #[source]
        source: lopdf::Error,
    },

    #[error("Could not rewrite page content: {0}")]
    Rewrite(String),

    #[error("Text extraction failed: {0}")]
    Text(#[source] pdf_extract::OutputError),
}

impl ExtractionError {
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractionError::Io(_) => "io",
            ExtractionError::Load(_) => "load",
            ExtractionError::PageText { .. } => "page_text",
            ExtractionError::Rewrite(_) => "rewrite",
            ExtractionError::Text(_) => "text",
        }
    }
}

/// Scale annotation found on one page (1-based)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageScale {
    pub page: u32,
    pub scale: String,
}

impl PageScale {
    pub fn is_found(&self) -> bool {
        self.scale != SCALE_NOT_FOUND
    }
}

/// Finds the drawing scale stated on each page of a PDF.
///
/// lopdf checks the document structure, pdf-extract lays out each page
/// as plain text so every visual line ends in `\n`.
#[derive(Debug, Clone, Default)]
pub struct ScaleExtractor;

impl ScaleExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract_from_path(&self, path: &Path) -> Result<Vec<PageScale>, ExtractionError> {
        let pdf_bytes = fs::read(path)?;
        self.extract_from_bytes(&pdf_bytes)
    }

    pub fn extract_from_bytes(&self, pdf_bytes: &[u8]) -> Result<Vec<PageScale>, ExtractionError> {
        let mut document = Document::load_mem(pdf_bytes).map_err(ExtractionError::Load)?;

        // get_pages is keyed by page number, so iteration is in page order
        let pages = document.get_pages();
        tracing::debug!("Scanning {} pages for scale annotations", pages.len());

        let mut rewritten = false;
        for (page_number, page_id) in &pages {
            let expanded = check_page_contents(&document, *page_id)
                .and_then(|_| expand_quote_operators(&mut document, *page_id))
                .map_err(|source| ExtractionError::PageText {
                    page: *page_number,
                    source,
                })?;
            rewritten |= expanded;
        }

        let text_source = if rewritten {
            let mut buffer = Vec::new();
            document
                .save_to(&mut buffer)
                .map_err(|e| ExtractionError::Rewrite(e.to_string()))?;
            Cow::Owned(buffer)
        } else {
            Cow::Borrowed(pdf_bytes)
        };

        let page_texts = pdf_extract::extract_text_from_mem_by_pages(&text_source)
            .map_err(ExtractionError::Text)?;

        let results = page_texts
            .iter()
            .enumerate()
            .map(|(index, text)| {
                let scale = find_scale(&normalize_text(text));
                if scale.is_none() {
                    tracing::debug!("No scale annotation on page {}", index + 1);
                }

                PageScale {
                    page: index as u32 + 1,
                    scale: scale.unwrap_or_else(|| SCALE_NOT_FOUND.to_string()),
                }
            })
            .collect();

        Ok(results)
    }
}

// Every content entry of a page must resolve to a stream. A page with no
// Contents is blank, which is fine.
fn check_page_contents(document: &Document, page_id: ObjectId) -> lopdf::Result<()> {
    let page = document.get_dictionary(page_id)?;
    let contents = match page.get(b"Contents") {
        Ok(contents) => resolve(document, contents)?,
        Err(_) => return Ok(()),
    };

    match contents {
        Object::Array(items) => {
            for item in items {
                resolve(document, item)?.as_stream()?;
            }
        }
        other => {
            other.as_stream()?;
        }
    }

    Ok(())
}

// `'` and `"` move to the next line before showing text. Spell them out as
// `T*` + `Tj` (with `Tw`/`Tc` for `"`) so the line break is never lost.
fn expand_quote_operators(document: &mut Document, page_id: ObjectId) -> lopdf::Result<bool> {
    let content = document.get_and_decode_page_content(page_id)?;
    let has_quotes = content
        .operations
        .iter()
        .any(|op| op.operator == "'" || op.operator == "\"");
    if !has_quotes {
        return Ok(false);
    }

    let mut operations = Vec::with_capacity(content.operations.len());
    for op in content.operations {
        match op.operator.as_str() {
            "'" => {
                operations.push(Operation::new("T*", vec![]));
                operations.push(Operation::new("Tj", op.operands));
            }
            "\"" if op.operands.len() == 3 => {
                let mut operands = op.operands.into_iter();
                if let (Some(word_spacing), Some(char_spacing), Some(text)) =
                    (operands.next(), operands.next(), operands.next())
                {
                    operations.push(Operation::new("Tw", vec![word_spacing]));
                    operations.push(Operation::new("Tc", vec![char_spacing]));
                    operations.push(Operation::new("T*", vec![]));
                    operations.push(Operation::new("Tj", vec![text]));
                }
            }
            _ => operations.push(op),
        }
    }

    document.change_page_content(page_id, Content { operations }.encode()?)?;
    Ok(true)
}

fn resolve<'a>(document: &'a Document, object: &'a Object) -> lopdf::Result<&'a Object> {
    match object {
        Object::Reference(id) => document.get_object(*id),
        direct => Ok(direct),
    }
}

/// First scale annotation in `text`, trimmed
pub fn find_scale(text: &str) -> Option<String> {
    SCALE_PATTERN
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

// Drawings often set feet/inch marks as typographic quotes or primes
fn normalize_text(text: &str) -> String {
    text.nfc()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' | '\u{2032}' => '\'',
            '\u{201C}' | '\u{201D}' | '\u{2033}' => '"',
            other => other,
        })
        .collect()
}
