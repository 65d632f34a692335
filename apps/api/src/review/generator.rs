//! Generated-review backend.
//!
//! `AppState` holds an optional `Arc<dyn ReviewGenerator>`; when it is absent or fails,
//! handlers fall back to the heuristic engine.

use async_trait::async_trait;

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::review::models::DocumentInput;
use crate::review::profile::DocumentKind;
use crate::review::prompts;
use crate::review::render::escape_html;

/// Generated output shorter than this is treated as a failed call.
const MIN_GENERATED_CHARS: usize = 200;

#[async_trait]
pub trait ReviewGenerator: Send + Sync {
    async fn generate_html(
        &self,
        kind: DocumentKind,
        input: &DocumentInput,
    ) -> Result<String, AppError>;
}

pub struct LlmReviewGenerator {
    llm: LlmClient,
}

impl LlmReviewGenerator {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ReviewGenerator for LlmReviewGenerator {
    async fn generate_html(
        &self,
        kind: DocumentKind,
        input: &DocumentInput,
    ) -> Result<String, AppError> {
        let (system, prompt) = prompts::build(kind, input);
        let raw = self
            .llm
            .generate(&system, &prompt, prompts::options_for(kind))
            .await
            .map_err(|e| AppError::Llm(e.to_string()))?;
        finalize_generated_html(kind, &raw)
    }
}

/// Rejects near-empty output and wraps plain text in a review fragment.
pub fn finalize_generated_html(kind: DocumentKind, raw: &str) -> Result<String, AppError> {
    let html = raw.trim();
    if html.chars().count() < MIN_GENERATED_CHARS {
        return Err(AppError::Llm(
            "generated review was empty or too short".to_string(),
        ));
    }

    if html.contains("<div") || html.contains("<h2") || html.contains("<p") {
        return Ok(html.to_string());
    }

    Ok(format!(
        "<div class=\"review\"><h2>{}</h2><p>{}</p></div>",
        kind.profile().title,
        escape_html(html)
    ))
}
