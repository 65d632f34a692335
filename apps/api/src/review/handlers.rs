use std::net::SocketAddr;

use axum::{
    body::Bytes,
    extract::{ConnectInfo, State},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::review::models::Report;
use crate::review::profile::DocumentKind;
use crate::review::render::{render_html, ReviewFormat};
use crate::state::AppState;
use crate::throttle::client_key;

/// Accepted names for the document text, in lookup order.
const TEXT_FIELDS: &[&str] = &["text", "resumeText", "linkedinText"];

/// Request body shared by both review endpoints.
#[derive(Debug, Default, PartialEq)]
pub struct ReviewRequest {
    pub text: String,
    pub target_role: Option<String>,
    pub format: ReviewFormat,
}

impl ReviewRequest {
    /// Reads each field on its own so a bad optional field never discards the text.
    /// Bodies that are not a JSON object become the empty request and fail the length gate.
    pub fn from_body(body: &[u8]) -> Result<Self, AppError> {
        let Ok(Value::Object(fields)) = serde_json::from_slice::<Value>(body) else {
            return Ok(Self::default());
        };

        let text = TEXT_FIELDS
            .iter()
            .find_map(|name| fields.get(*name).and_then(Value::as_str))
            .unwrap_or_default()
            .to_string();

        Ok(Self {
            text,
            target_role: read_target_role(&fields)?,
            format: read_format(&fields)?,
        })
    }
}

fn read_target_role(fields: &Map<String, Value>) -> Result<Option<String>, AppError> {
    match fields.get("targetRole") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(role)) => Ok(Some(role.clone())),
        Some(_) => Err(AppError::Validation("targetRole must be a string".into())),
    }
}

fn read_format(fields: &Map<String, Value>) -> Result<ReviewFormat, AppError> {
    match fields.get("format") {
        None | Some(Value::Null) => Ok(ReviewFormat::default()),
        Some(value) => ReviewFormat::deserialize(value).map_err(|_| {
            AppError::Validation("format must be \"html\" or \"json\"".into())
        }),
    }
}

/// Where the review came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewSource {
    Heuristic,
    Llm,
}

#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub source: ReviewSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(flatten)]
    pub report: Option<Report>,
}

/// POST /api/v1/review/resume
pub async fn handle_review_resume(
    State(state): State<AppState>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ReviewResponse>, AppError> {
    handle_review(DocumentKind::Resume, state, peer, headers, body).await
}

/// POST /api/v1/review/linkedin
pub async fn handle_review_linkedin(
    State(state): State<AppState>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ReviewResponse>, AppError> {
    handle_review(DocumentKind::LinkedIn, state, peer, headers, body).await
}

async fn handle_review(
    kind: DocumentKind,
    state: AppState,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ReviewResponse>, AppError> {
    let client = client_key(&headers, peer.map(|ConnectInfo(addr)| addr));
    if !state.throttle.allow(&client).await {
        warn!(client = %client, "review request throttled");
        return Err(AppError::RateLimited);
    }

    let req = ReviewRequest::from_body(&body)?;
    let input = super::prepare(kind, &req.text, req.target_role, state.config.limits())?;

    let review_id = Uuid::new_v4();
    info!(
        %review_id,
        ?kind,
        format = ?req.format,
        chars = input.text.chars().count(),
        has_target = input.target_role.is_some(),
        "review requested"
    );

    if req.format == ReviewFormat::Html {
        if let Some(generator) = &state.generator {
            match generator.generate_html(kind, &input).await {
                Ok(html) => {
                    return Ok(Json(ReviewResponse {
                        source: ReviewSource::Llm,
                        html: Some(html),
                        report: None,
                    }));
                }
                Err(e) => {
                    warn!(%review_id, "generated review failed, using heuristic engine: {e}");
                }
            }
        }
    }

    let report = super::review(kind, &input)?;
    info!(%review_id, overall = report.overall, readiness = ?report.readiness, "review complete");

    let response = match req.format {
        ReviewFormat::Html => ReviewResponse {
            source: ReviewSource::Heuristic,
            html: Some(render_html(&report)?),
            report: None,
        },
        ReviewFormat::Json => ReviewResponse {
            source: ReviewSource::Heuristic,
            html: None,
            report: Some(report),
        },
    };
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_accepts_kind_specific_field_names() {
        let req =
            ReviewRequest::from_body(br#"{"resumeText":"abc","targetRole":"Test Engineer"}"#)
                .unwrap();
        assert_eq!(req.text, "abc");
        assert_eq!(req.target_role.as_deref(), Some("Test Engineer"));
        assert_eq!(req.format, ReviewFormat::Html);

        let req = ReviewRequest::from_body(br#"{"linkedinText":"xyz","format":"json"}"#).unwrap();
        assert_eq!(req.text, "xyz");
        assert_eq!(req.format, ReviewFormat::Json);
    }

    #[test]
    fn test_malformed_body_becomes_empty_request() {
        let bodies: [&[u8]; 4] = [b"{not json", b"[1, 2]", b"\"text\"", b""];
        for body in bodies {
            assert_eq!(ReviewRequest::from_body(body).unwrap(), ReviewRequest::default());
        }
    }

    #[test]
    fn test_null_optional_fields_use_defaults() {
        let req =
            ReviewRequest::from_body(br#"{"text":"abc","targetRole":null,"format":null}"#)
                .unwrap();
        assert_eq!(req.text, "abc");
        assert!(req.target_role.is_none());
        assert_eq!(req.format, ReviewFormat::Html);
    }

    #[test]
    fn test_unknown_format_is_a_validation_error() {
        let err = ReviewRequest::from_body(br#"{"text":"abc","format":"markdown"}"#).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("format")));
    }

    #[test]
    fn test_non_string_target_role_is_a_validation_error() {
        let err = ReviewRequest::from_body(br#"{"text":"abc","targetRole":42}"#).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("targetRole")));
    }

    #[test]
    fn test_non_string_text_falls_through_to_alias() {
        let req = ReviewRequest::from_body(br#"{"text":7,"resumeText":"abc"}"#).unwrap();
        assert_eq!(req.text, "abc");
    }

    #[test]
    fn test_html_response_omits_report_fields() {
        let response = ReviewResponse {
            source: ReviewSource::Heuristic,
            html: Some("<div></div>".into()),
            report: None,
        };
        let value = serde_json::to_value(response).unwrap();
        assert_eq!(value["source"], "heuristic");
        assert_eq!(value["html"], "<div></div>");
        assert!(value.get("overall").is_none());
    }
}
