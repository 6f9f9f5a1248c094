//! Completion delivery: the JSON envelope POSTed to a callback URL and the
//! scheme gate that runs before any network attempt.

use chrono::{DateTime, Utc};
use serde::Serialize;
use url::Url;

use crate::error::WebhookError;
use crate::flow::UserResponse;
use crate::navigator::CompletionSummary;

/// The envelope a completion webhook receives.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    pub responses: Vec<UserResponse>,
    pub timestamp: DateTime<Utc>,
    /// Empty string when the document declares no name.
    pub flow_name: String,
}

impl WebhookPayload {
    /// Builds the envelope from a completion summary, stamped now.
    pub fn new(summary: &CompletionSummary) -> Self {
        Self {
            responses: summary.responses.clone(),
            timestamp: Utc::now(),
            flow_name: summary.flow_name.clone().unwrap_or_default(),
        }
    }
}

/// Parses `raw` and checks its scheme is one the sender delivers to.
///
/// Only `http` and `https` pass. `javascript:`, `file:` and every other
/// scheme are rejected here, before any socket is opened.
pub fn deliverable_url(raw: &str) -> Result<Url, WebhookError> {
    let url = Url::parse(raw).map_err(|error| WebhookError::InvalidUrl {
        url: raw.to_string(),
        reason: error.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(WebhookError::UnsupportedScheme {
            scheme: scheme.to_string(),
        }),
    }
}

/// POSTs `payload` as JSON to `raw_url`.
#[cfg(feature = "webhook")]
pub fn send_to_webhook(raw_url: &str, payload: &WebhookPayload) -> Result<(), WebhookError> {
    let url = deliverable_url(raw_url)?;
    let agent = ureq::Agent::new_with_defaults();
    match agent.post(url.as_str()).send_json(payload) {
        Ok(_) => Ok(()),
        Err(ureq::Error::StatusCode(code)) => Err(WebhookError::BadStatus(code)),
        Err(error) => Err(WebhookError::Delivery(error.to_string())),
    }
}
