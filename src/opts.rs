use std::time::Duration;

use crate::client::GROQ_TRANSCRIPTIONS_URL;

/// Default request timeout. Remote transcription of long audio is slow, so
/// this is generous; callers with tighter latency needs should lower it.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Options that control how the transcription client is configured.
///
/// This struct represents *library-level configuration*, not CLI flags
/// directly. The CLI is responsible for mapping user input into this type so
/// that:
/// - the library remains reusable outside of a CLI context
/// - other frontends (services, tests, batch jobs) can construct options
///   programmatically
#[derive(Debug, Clone)]
pub struct Opts {
    /// The transcription endpoint to POST to.
    ///
    /// Defaults to Groq's OpenAI-compatible endpoint; overridable for
    /// self-hosted compatible servers and for tests.
    pub endpoint: String,

    /// How long a single request may run before the HTTP client gives up.
    pub request_timeout: Duration,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            endpoint: GROQ_TRANSCRIPTIONS_URL.to_owned(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}
