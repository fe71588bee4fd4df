//! Checks performed before any network call.
//!
//! Browsers and shell tooling frequently omit or mis-report MIME types for
//! audio files, so acceptance is an OR: a file passes if *either* its
//! reported MIME type is in the allowlist *or* its extension matches. The
//! gate runs entirely locally; a rejected submission never reaches the API.

use crate::client::TranscriptionRequest;
use crate::{Error, Result};

/// MIME types accepted for upload.
pub static ACCEPTED_AUDIO_MIME_TYPES: &[&str] = &[
    "audio/mpeg",
    "audio/wav",
    "audio/mp3",
    "audio/x-m4a",
    "audio/m4a",
    "audio/ogg",
    "audio/flac",
    "audio/opus",
];

/// File extensions accepted when the MIME type is missing or unrecognized.
/// Matched case-insensitively.
pub static ACCEPTED_AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "m4a", "ogg", "flac", "opus"];

/// Whether a file is acceptable audio, by reported MIME type or extension.
pub fn is_accepted_audio(content_type: Option<&str>, file_name: &str) -> bool {
    if content_type.is_some_and(|mime| ACCEPTED_AUDIO_MIME_TYPES.contains(&mime)) {
        return true;
    }

    match file_name.rsplit_once('.') {
        Some((_, ext)) => ACCEPTED_AUDIO_EXTENSIONS
            .iter()
            .any(|accepted| ext.eq_ignore_ascii_case(accepted)),
        None => false,
    }
}

/// Validate a submission before it costs a network round trip.
///
/// Order matters for error reporting: credential, then file presence, then
/// file type.
pub(crate) fn validate(request: &TranscriptionRequest, credential: &str) -> Result<()> {
    if credential.trim().is_empty() {
        return Err(Error::validation("API credential must be provided"));
    }

    if request.audio.is_empty() {
        return Err(Error::validation(format!(
            "audio file '{}' is empty",
            request.file_name
        )));
    }

    if !is_accepted_audio(request.content_type.as_deref(), &request.file_name) {
        return Err(Error::validation(format!(
            "'{}' is not a supported audio file (expected one of: {})",
            request.file_name,
            ACCEPTED_AUDIO_EXTENSIONS.join(", ")
        )));
    }

    Ok(())
}
