use thiserror::Error;

/// Srtify's crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Srtify's crate-wide error type.
///
/// Each variant corresponds to one failure class of the transcription
/// pipeline, so callers can branch on *where* a submission died without
/// parsing message strings. This is intentionally decoupled from `anyhow`
/// so downstream libraries aren't forced to adopt `anyhow` in their own
/// public APIs.
#[derive(Debug, Error)]
pub enum Error {
    /// The submission was rejected before any network activity
    /// (blank credential, empty file, unsupported audio type).
    #[error("{0}")]
    Validation(String),

    /// Transport failure or a non-2xx response from the transcription API.
    ///
    /// For HTTP failures the message carries the status code and reason
    /// phrase verbatim, plus whatever detail the response body offered.
    #[error("{0}")]
    Network(String),

    /// A 2xx response whose body did not contain usable segments.
    #[error("{0}")]
    ResponseFormat(String),

    /// Segments arrived but none survived filtering, or encoding produced
    /// empty output.
    #[error("{0}")]
    Encoding(String),

    /// I/O failure while writing encoded output.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// The failure class a dead submission is reported under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    Validation,
    Network,
    ResponseFormat,
    Encoding,
}

impl Error {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub(crate) fn response_format(message: impl Into<String>) -> Self {
        Self::ResponseFormat(message.into())
    }

    pub(crate) fn encoding(message: impl Into<String>) -> Self {
        Self::Encoding(message.into())
    }

    /// Classify this error by failure stage.
    ///
    /// Writer failures surface while encoding, so `Io` maps to
    /// [`FailureStage::Encoding`].
    pub fn stage(&self) -> FailureStage {
        match self {
            Self::Validation(_) => FailureStage::Validation,
            Self::Network(_) => FailureStage::Network,
            Self::ResponseFormat(_) => FailureStage::ResponseFormat,
            Self::Encoding(_) | Self::Io(_) => FailureStage::Encoding,
        }
    }
}
