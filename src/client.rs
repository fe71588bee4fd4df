//! The HTTP transcription client.
//!
//! One request shape, one response shape: a multipart POST of the audio
//! bytes with a fixed `response_format=verbose_json`, answered by a JSON
//! envelope carrying timed segments. Transport failures and non-2xx statuses
//! are classified here; everything downstream of a successful parse belongs
//! to the pipeline.

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::debug;

use crate::backend::TranscriptionBackend;
use crate::model::Model;
use crate::opts::Opts;
use crate::segments::RawSegment;
use crate::{Error, Result};

/// Groq's OpenAI-compatible transcription endpoint.
pub const GROQ_TRANSCRIPTIONS_URL: &str = "https://api.groq.com/openai/v1/audio/transcriptions";

/// Everything needed for one transcription call. Constructed per invocation
/// and never persisted.
#[derive(Debug, Clone)]
pub struct TranscriptionRequest {
    /// Raw audio bytes to upload.
    pub audio: Vec<u8>,

    /// Original file name; preserved in the multipart part so the API sees
    /// the real extension.
    pub file_name: String,

    /// Caller-reported MIME type, if any. Browsers supply one; CLI callers
    /// usually pass `None` and rely on the extension fallback during
    /// pre-flight validation.
    pub content_type: Option<String>,

    /// Which Whisper model the API should run.
    pub model: Model,

    /// Optional ISO language hint. `None` lets the API auto-detect.
    pub language: Option<String>,
}

/// The API's `verbose_json` success envelope. Fields we don't use are
/// ignored on deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerboseTranscription {
    /// Full transcript text, when present.
    #[serde(default)]
    pub text: Option<String>,

    /// Detected (or caller-forced) language.
    #[serde(default)]
    pub language: Option<String>,

    /// Audio duration in seconds, as reported by the API.
    #[serde(default)]
    pub duration: Option<f64>,

    /// Timed segments. Missing and empty both mean "nothing usable".
    #[serde(default)]
    pub segments: Option<Vec<RawSegment>>,
}

/// Error envelope the API returns alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// A `TranscriptionBackend` that talks to an OpenAI-compatible transcription
/// endpoint over HTTPS.
///
/// The client is cheap to clone and safe to share; each `transcribe` call is
/// a single POST with no retries. Retry policy, if any, belongs to a wrapper.
#[derive(Debug, Clone)]
pub struct HttpTranscriptionClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpTranscriptionClient {
    /// Build a client from library options.
    ///
    /// Remote transcription of long audio is slow, so the request timeout
    /// comes from `Opts` rather than being hardcoded.
    pub fn new(opts: &Opts) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(opts.request_timeout)
            .build()
            .map_err(|err| Error::network(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            endpoint: opts.endpoint.clone(),
        })
    }

    /// The endpoint requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_form(&self, request: &TranscriptionRequest) -> Result<Form> {
        let mut part = Part::bytes(request.audio.clone()).file_name(request.file_name.clone());
        if let Some(content_type) = &request.content_type {
            part = part.mime_str(content_type).map_err(|err| {
                Error::validation(format!(
                    "reported content type '{content_type}' is not a valid MIME type: {err}"
                ))
            })?;
        }

        let mut form = Form::new()
            .part("file", part)
            .text("model", request.model.as_str())
            // The pipeline only understands the segment-bearing shape.
            .text("response_format", "verbose_json");

        // Omitting the field signals auto-detection to the API.
        if let Some(language) = &request.language {
            form = form.text("language", language.clone());
        }

        Ok(form)
    }
}

#[async_trait]
impl TranscriptionBackend for HttpTranscriptionClient {
    async fn transcribe(
        &self,
        request: &TranscriptionRequest,
        credential: &str,
    ) -> Result<VerboseTranscription> {
        let form = self.build_form(request)?;

        debug!(
            endpoint = %self.endpoint,
            file = %request.file_name,
            model = request.model.as_str(),
            language = request.language.as_deref().unwrap_or("auto"),
            "dispatching transcription request"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(credential.trim())
            .multipart(form)
            .send()
            .await
            .map_err(|err| {
                Error::network(format!("transcription request failed: {err}"))
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| {
                Error::network(format!("failed to read transcription response: {err}"))
            })?;

        if !status.is_success() {
            return Err(Error::network(status_failure_message(status, &body)));
        }

        let envelope: VerboseTranscription = serde_json::from_str(&body).map_err(|err| {
            Error::response_format(format!("transcription response is not valid JSON: {err}"))
        })?;

        debug!(
            language = envelope.language.as_deref().unwrap_or("unknown"),
            duration = envelope.duration.unwrap_or_default(),
            segments = envelope.segments.as_ref().map_or(0, Vec::len),
            "transcription response received"
        );

        Ok(envelope)
    }
}

/// Compose the surfaced message for a non-2xx response.
///
/// The status code and reason phrase are always included verbatim; the body
/// contributes its `error.message` when it parses, and a generic detail
/// otherwise.
fn status_failure_message(status: StatusCode, body: &str) -> String {
    let detail = error_detail(body).unwrap_or_else(|| "unknown error".to_owned());
    format!(
        "transcription request failed: {} {}: {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown"),
        detail
    )
}

/// Best-effort extraction of `error.message` from an API error body.
fn error_detail(body: &str) -> Option<String> {
    let envelope: ApiErrorEnvelope = serde_json::from_str(body).ok()?;
    envelope.error?.message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_detail_extracts_the_api_message() {
        let body = r#"{"error":{"message":"invalid api key","type":"invalid_request_error"}}"#;
        assert_eq!(error_detail(body).as_deref(), Some("invalid api key"));
    }

    #[test]
    fn error_detail_tolerates_unparseable_bodies() {
        assert_eq!(error_detail("<html>nope</html>"), None);
        assert_eq!(error_detail(""), None);
        assert_eq!(error_detail(r#"{"error":"flat string"}"#), None);
    }

    #[test]
    fn status_failure_message_includes_status_and_detail() {
        let msg = status_failure_message(
            StatusCode::UNAUTHORIZED,
            r#"{"error":{"message":"invalid api key"}}"#,
        );
        assert!(msg.contains("401"));
        assert!(msg.contains("Unauthorized"));
        assert!(msg.contains("invalid api key"));
    }

    #[test]
    fn status_failure_message_falls_back_to_unknown_error() {
        let msg = status_failure_message(StatusCode::INTERNAL_SERVER_ERROR, "not json");
        assert!(msg.contains("500"));
        assert!(msg.contains("unknown error"));
    }

    #[test]
    fn verbose_envelope_tolerates_missing_segments() -> anyhow::Result<()> {
        let envelope: VerboseTranscription =
            serde_json::from_str(r#"{"text":"hello there"}"#)?;
        assert_eq!(envelope.text.as_deref(), Some("hello there"));
        assert!(envelope.segments.is_none());
        Ok(())
    }

    #[test]
    fn build_form_rejects_garbage_content_type() {
        let opts = Opts::default();
        let client = HttpTranscriptionClient::new(&opts).expect("client should build");
        let request = TranscriptionRequest {
            audio: b"bytes".to_vec(),
            file_name: "talk.mp3".to_owned(),
            content_type: Some("not a mime".to_owned()),
            model: Model::default(),
            language: None,
        };
        let err = client.build_form(&request).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
