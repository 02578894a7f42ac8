//! Chat request parsing and the placeholder reply.
//!
//! The chat endpoint does not talk to any model yet. A request is checked for
//! shape only and answered with a fixed advisory that echoes the caller's
//! `user_id`.

use axum::http::HeaderValue;
use serde::Serialize;
use serde_json::{Map, Value};
use strum::{AsRefStr, Display};
use tracing::debug;
use utoipa::ToSchema;

use crate::error::ValidationIssue;

/// Advisory text returned for every chat request.
pub const CHAT_PLACEHOLDER_REPLY: &str = "Document upload and analysis features are coming soon! \
For now, you can chat with our general AI assistant.";

/// Incoming chat message.
#[derive(Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct ChatMessage {
    /// Message text. Required, never inspected.
    pub message: String,
    /// Optional caller identifier, echoed back.
    pub user_id: Option<String>,
}

/// Rollout state of a feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FeatureStatus {
    /// Announced but not implemented.
    ComingSoon,
}

/// Reply to a chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ChatResponse {
    /// Fixed advisory text.
    pub response: &'static str,
    /// The caller's identifier, or null.
    pub user_id: Option<String>,
    /// Always `coming_soon`.
    pub feature_status: FeatureStatus,
}

impl ChatMessage {
    /// Parse a request from its `Content-Type` and raw body.
    ///
    /// The body is decoded as JSON only when the content type is absent or a
    /// JSON media type. Anything else is not an object and fails validation.
    pub fn from_request(
        content_type: Option<&HeaderValue>,
        body: &[u8],
    ) -> Result<Self, Vec<ValidationIssue>> {
        match content_type {
            Some(value) if !is_json_content_type(value) && !is_blank(body) => {
                Err(vec![not_an_object()])
            }
            _ => Self::from_body(body),
        }
    }

    /// Parse a JSON request body, collecting every shape problem.
    pub fn from_body(body: &[u8]) -> Result<Self, Vec<ValidationIssue>> {
        if is_blank(body) {
            return Err(vec![ValidationIssue::new("missing", &[], "Field required")]);
        }

        let value: Value = serde_json::from_slice(body).map_err(|e| {
            debug!(error = %e, "Chat body is not valid JSON");
            vec![
                ValidationIssue::new("json_invalid", &[], "JSON decode error")
                    .at_offset(error_offset(body, &e)),
            ]
        })?;

        match value {
            Value::Object(fields) => Self::from_fields(fields),
            _ => Err(vec![not_an_object()]),
        }
    }

    fn from_fields(mut fields: Map<String, Value>) -> Result<Self, Vec<ValidationIssue>> {
        let mut issues = Vec::new();

        let message = match fields.remove("message") {
            Some(Value::String(text)) => Some(text),
            Some(_) => {
                issues.push(string_type("message"));
                None
            }
            None => {
                issues.push(ValidationIssue::new("missing", &["message"], "Field required"));
                None
            }
        };

        let user_id = match fields.remove("user_id") {
            Some(Value::String(id)) => Some(id),
            Some(Value::Null) | None => None,
            Some(_) => {
                issues.push(string_type("user_id"));
                None
            }
        };

        match message {
            Some(message) if issues.is_empty() => Ok(Self { message, user_id }),
            _ => Err(issues),
        }
    }

    /// Build the placeholder reply. The message text is not used.
    pub fn reply(self) -> ChatResponse {
        ChatResponse {
            response: CHAT_PLACEHOLDER_REPLY,
            user_id: self.user_id,
            feature_status: FeatureStatus::ComingSoon,
        }
    }
}

/// `application/json` or any `application/*+json`, parameters ignored.
pub fn is_json_content_type(value: &HeaderValue) -> bool {
    let Ok(value) = value.to_str() else {
        return false;
    };
    let essence = value.split(';').next().unwrap_or_default().trim();
    let Some((kind, subtype)) = essence.split_once('/') else {
        return false;
    };

    kind.eq_ignore_ascii_case("application")
        && (subtype.eq_ignore_ascii_case("json")
            || subtype.to_ascii_lowercase().ends_with("+json"))
}

/// Character offset of a decode error, counted from the start of the body.
fn error_offset(body: &[u8], error: &serde_json::Error) -> usize {
    let line_start: usize = body
        .split(|&b| b == b'\n')
        .take(error.line().saturating_sub(1))
        .map(|line| line.len() + 1)
        .sum();
    let offset = (line_start + error.column().saturating_sub(1)).min(body.len());

    std::str::from_utf8(&body[..offset])
        .map(|prefix| prefix.chars().count())
        .unwrap_or(offset)
}

fn is_blank(body: &[u8]) -> bool {
    body.iter().all(u8::is_ascii_whitespace)
}

fn not_an_object() -> ValidationIssue {
    ValidationIssue::new(
        "model_attributes_type",
        &[],
        "Input should be a valid dictionary or object to extract fields from",
    )
}

fn string_type(field: &str) -> ValidationIssue {
    ValidationIssue::new("string_type", &[field], "Input should be a valid string")
}
