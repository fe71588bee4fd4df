use async_trait::async_trait;

use crate::Result;
use crate::client::{TranscriptionRequest, VerboseTranscription};

/// Transport port used by [`crate::pipeline::Pipeline`].
///
/// A backend is responsible for turning a [`TranscriptionRequest`] into the
/// API's `verbose_json` envelope, surfacing transport failures and non-2xx
/// statuses as [`crate::Error::Network`]. The pipeline never talks to the
/// network directly; it only sees this trait.
///
/// Keeping the seam here means tests can substitute a scripted backend, and
/// callers that want retry/backoff can wrap a backend without touching the
/// pipeline contract.
#[async_trait]
pub trait TranscriptionBackend {
    /// Perform a single transcription request. No retries.
    async fn transcribe(
        &self,
        request: &TranscriptionRequest,
        credential: &str,
    ) -> Result<VerboseTranscription>;
}
