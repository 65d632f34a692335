// Heuristic review engine for resumes and LinkedIn profiles.
// normalize → signals → scoring → issues → report, then render to HTML or JSON.
// One pipeline; per-kind differences live in `profile`.

pub mod generator;
pub mod handlers;
pub mod issues;
pub mod models;
pub mod normalize;
pub mod profile;
pub mod prompts;
pub mod render;
pub mod report;
pub mod scoring;
pub mod signals;

use tracing::debug;

use crate::errors::ReviewError;
use crate::review::models::{DocumentInput, Report};
use crate::review::profile::DocumentKind;

/// Accepted length range, in characters, of normalized input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewLimits {
    pub min_chars: usize,
    pub max_chars: usize,
}

impl Default for ReviewLimits {
    fn default() -> Self {
        Self {
            min_chars: 200,
            max_chars: 25_000,
        }
    }
}

/// Normalizes the raw text and applies the length gate.
pub fn prepare(
    kind: DocumentKind,
    raw_text: &str,
    target_role: Option<String>,
    limits: ReviewLimits,
) -> Result<DocumentInput, ReviewError> {
    let text = normalize::normalize(raw_text);
    let actual = text.chars().count();
    let label = kind.profile().label;

    if actual < limits.min_chars {
        return Err(ReviewError::InputTooShort {
            label,
            min: limits.min_chars,
            actual,
        });
    }
    if actual > limits.max_chars {
        return Err(ReviewError::InputTooLong {
            label,
            max: limits.max_chars,
            actual,
        });
    }

    Ok(DocumentInput::new(text, target_role))
}

/// Runs the heuristic engine over a prepared document.
pub fn review(kind: DocumentKind, input: &DocumentInput) -> Result<Report, ReviewError> {
    let profile = kind.profile();
    let signals = signals::detect(profile, &input.text);
    let card = scoring::score(profile, &signals, input.target_role());
    let issue = issues::prioritize(&signals, input.target_role());

    debug!(
        kind = ?kind,
        overall = card.overall,
        issue = ?issue,
        roles = signals.detected_roles.len(),
        metrics = signals.metrics_count,
        "heuristic review scored"
    );

    report::build_report(profile, input, &signals, &card, issue)
}
