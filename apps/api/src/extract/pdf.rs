//! Text extraction from uploaded PDF bytes.

use axum::body::Bytes;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::errors::AppError;

/// Cleaned text shorter than this is treated as an image-only or empty PDF.
pub const MIN_EXTRACTED_CHARS: usize = 50;

const PDF_MAGIC: &[u8] = b"%PDF-";

static TRAILING_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+\n").expect("valid regex"));

/// Collapses whitespace runs that end in a newline down to one newline, then trims.
pub fn clean_extracted_text(raw: &str) -> String {
    TRAILING_WS.replace_all(raw, "\n").trim().to_string()
}

pub fn looks_like_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(PDF_MAGIC)
}

/// Parses the PDF off the async runtime. Parser errors and panics both map to 422.
pub async fn extract_pdf_text(bytes: Bytes) -> Result<String, AppError> {
    if !looks_like_pdf(&bytes) {
        return Err(AppError::UnprocessableEntity(
            "That file is not a PDF. Use paste text instead.".to_string(),
        ));
    }

    let extracted =
        tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes)).await;

    let raw = match extracted {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!("pdf parse failed: {e}");
            return Err(extraction_failed());
        }
        Err(e) => {
            warn!("pdf parser aborted: {e}");
            return Err(extraction_failed());
        }
    };

    let cleaned = clean_extracted_text(&raw);
    if cleaned.chars().count() < MIN_EXTRACTED_CHARS {
        return Err(AppError::UnprocessableEntity(
            "PDF extracted, but text looks empty. Use paste text instead.".to_string(),
        ));
    }
    Ok(cleaned)
}

fn extraction_failed() -> AppError {
    AppError::UnprocessableEntity("PDF extraction failed. Use paste text instead.".to_string())
}
