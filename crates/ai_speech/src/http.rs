//! Shared HTTP helpers for the cloud adapters

use std::time::Duration;

use reqwest::{Client, Response};
use serde_json::Value;

use crate::config::SpeechConfig;
use crate::error::{SetupError, SynthesisError, TranscriptionError};

/// Build the HTTP client shared by the adapters of one registry
pub fn build_client(config: &SpeechConfig) -> Result<Client, SetupError> {
    config.validate().map_err(SetupError::Configuration)?;

    Ok(Client::builder()
        .timeout(Duration::from_millis(config.timeout_ms))
        .build()?)
}

/// How a provider reports error detail in a failed response body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorBody {
    /// Status code only
    Ignored,
    Murf,
    ElevenLabs,
}

/// Non-success response, reduced to what the error messages carry
#[derive(Debug)]
pub(crate) struct HttpFailure {
    status: u16,
    detail: Option<String>,
}

impl HttpFailure {
    pub(crate) fn transcription(self, provider: &'static str) -> TranscriptionError {
        TranscriptionError::Http {
            provider,
            status: self.status,
            detail: self.detail,
        }
    }

    pub(crate) fn synthesis(self, provider: &'static str) -> SynthesisError {
        SynthesisError::Http {
            provider,
            status: self.status,
            detail: self.detail,
        }
    }
}

/// Pass successful responses through; read the error body otherwise
pub(crate) async fn check_status(response: Response, body: ErrorBody) -> Result<Response, HttpFailure> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let detail = match body {
        ErrorBody::Ignored => None,
        ErrorBody::Murf => response.text().await.ok().as_deref().and_then(murf_error_detail),
        ErrorBody::ElevenLabs => response
            .text()
            .await
            .ok()
            .as_deref()
            .and_then(elevenlabs_error_detail),
    };

    Err(HttpFailure {
        status: status.as_u16(),
        detail,
    })
}

/// Error detail from a Murf error body.
///
/// Tries `detail.message`, `message` and `error.message`, then the raw JSON.
pub(crate) fn murf_error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    [
        value.pointer("/detail/message"),
        value.get("message"),
        value.pointer("/error/message"),
    ]
    .into_iter()
    .flatten()
    .filter_map(Value::as_str)
    .find(|s| !s.is_empty())
    .map(ToString::to_string)
    .or_else(|| Some(value.to_string()))
}

/// Error detail from an ElevenLabs error body (`detail.message` only)
pub(crate) fn elevenlabs_error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .pointer("/detail/message")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// Read a string at a JSON pointer, trimmed; missing or non-string is empty
pub(crate) fn text_at(value: &Value, pointer: &str) -> String {
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default()
        .to_string()
}

/// Escape text for inclusion in an SSML document
pub(crate) fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}
