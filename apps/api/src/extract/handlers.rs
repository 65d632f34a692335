use axum::{extract::Multipart, Json};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::extract::pdf::extract_pdf_text;

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub text: String,
    pub chars: usize,
}

/// POST /api/v1/extract/pdf
/// Multipart form with a `file` field holding the PDF.
pub async fn handle_extract_pdf(mut multipart: Multipart) -> Result<Json<ExtractResponse>, AppError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid upload: {e}")))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Invalid upload: {e}")))?;
            upload = Some(bytes);
            break;
        }
    }

    let bytes = match upload {
        Some(bytes) if !bytes.is_empty() => bytes,
        _ => return Err(AppError::Validation("Choose a PDF first.".to_string())),
    };

    let size = bytes.len();
    let text = extract_pdf_text(bytes).await?;
    let chars = text.chars().count();
    info!(bytes = size, chars, "pdf extracted");

    Ok(Json(ExtractResponse { text, chars }))
}
