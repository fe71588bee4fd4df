//! High-level API for turning one audio submission into subtitle text.
//!
//! We expose a single, ergonomic entry point (`Pipeline`) that sequences the
//! stages of a submission:
//! - pre-flight validation (no network cost for obviously bad input)
//! - the transcription request itself
//! - response filtering and subtitle encoding
//!
//! The pipeline owns a small state machine so callers (a CLI, a UI bridge, a
//! service) can observe where a submission currently is and where a failed
//! one died. Each `submit` is independent: no caching, no retries, no state
//! shared between runs beyond the backend connection pool.

use std::io::{BufWriter, Write};

use tracing::debug;

use crate::backend::TranscriptionBackend;
use crate::client::{HttpTranscriptionClient, TranscriptionRequest};
use crate::json_array_encoder::JsonArrayEncoder;
use crate::opts::Opts;
use crate::output_type::OutputType;
use crate::preflight;
use crate::segment_encoder::SegmentEncoder;
use crate::segments::{Segment, valid_segments};
use crate::srt_encoder::{SrtEncoder, encode_to_string};
use crate::{Error, Result};

/// Where the current (or most recent) submission is in its lifecycle.
///
/// `Succeeded` and `Failed` are terminal for one submission; a new `submit`
/// restarts from the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineState {
    #[default]
    Idle,
    Validating,
    Requesting,
    Transcribing,
    Succeeded,
    Failed,
}

/// The main transcription-to-subtitle entry point.
///
/// `Pipeline` is generic over its transport so tests and retry wrappers can
/// substitute their own [`TranscriptionBackend`]; most callers use the
/// default HTTP client via [`Pipeline::new`].
///
/// `submit` takes `&mut self`, which makes one-run-at-a-time a compile-time
/// guarantee: overlapping submissions require separate `Pipeline` values.
pub struct Pipeline<B: TranscriptionBackend = HttpTranscriptionClient> {
    backend: B,
    state: PipelineState,
}

impl Pipeline<HttpTranscriptionClient> {
    /// Create a pipeline backed by the HTTP transcription client.
    pub fn new(opts: &Opts) -> Result<Self> {
        Ok(Self::with_backend(HttpTranscriptionClient::new(opts)?))
    }
}

impl<B: TranscriptionBackend> Pipeline<B> {
    /// Create a pipeline using a custom backend.
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            state: PipelineState::Idle,
        }
    }

    /// The current lifecycle state.
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Access the configured backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Run one submission to completion and return the SRT text.
    ///
    /// On failure the state lands in `Failed` and the returned error's
    /// [`crate::Error::stage`] says which stage killed the run. The pipeline
    /// itself performs no retries and no user-facing messaging; both belong
    /// to the caller.
    pub async fn submit(
        &mut self,
        request: &TranscriptionRequest,
        credential: &str,
    ) -> Result<String> {
        let outcome = self.run(request, credential).await;
        self.finish(outcome.is_ok());
        outcome
    }

    /// Run one submission and stream the encoded output into a writer.
    ///
    /// This is the format-selecting variant: `Srt` writes subtitle blocks,
    /// `Json` writes the validated segments as a JSON array. The state
    /// machine and failure classification are identical to [`Self::submit`].
    pub async fn transcribe_to<W: Write>(
        &mut self,
        request: &TranscriptionRequest,
        credential: &str,
        w: W,
        output_type: &OutputType,
    ) -> Result<()> {
        let outcome = self.run_to(request, credential, w, output_type).await;
        self.finish(outcome.is_ok());
        outcome
    }

    async fn run(&mut self, request: &TranscriptionRequest, credential: &str) -> Result<String> {
        let segments = self.collect_segments(request, credential).await?;
        let srt = encode_to_string(&segments)?;
        if srt.trim().is_empty() {
            return Err(Error::encoding("generated subtitle output is empty"));
        }
        Ok(srt)
    }

    async fn run_to<W: Write>(
        &mut self,
        request: &TranscriptionRequest,
        credential: &str,
        w: W,
        output_type: &OutputType,
    ) -> Result<()> {
        let segments = self.collect_segments(request, credential).await?;

        // Buffer output for efficiency (especially important for stdout).
        let writer = BufWriter::new(w);

        // Select an encoder based on the requested output type.
        // We keep this explicit (no trait objects) to avoid lifetime surprises.
        match output_type {
            OutputType::Srt => {
                let mut encoder = SrtEncoder::new(writer);
                let run_res = write_all(&segments, &mut encoder);
                merge_run_and_close(run_res, encoder.close())
            }
            OutputType::Json => {
                let mut encoder = JsonArrayEncoder::new(writer);
                let run_res = write_all(&segments, &mut encoder);
                merge_run_and_close(run_res, encoder.close())
            }
        }
    }

    /// Drive the submission through `Validating → Requesting → Transcribing`
    /// and return the segments that survived filtering.
    async fn collect_segments(
        &mut self,
        request: &TranscriptionRequest,
        credential: &str,
    ) -> Result<Vec<Segment>> {
        self.transition(PipelineState::Validating);
        preflight::validate(request, credential)?;

        self.transition(PipelineState::Requesting);
        let envelope = self.backend.transcribe(request, credential).await?;

        // Missing and empty are the same condition: the request succeeded but
        // the body carries nothing usable.
        let raw = match envelope.segments {
            Some(raw) if !raw.is_empty() => raw,
            _ => {
                return Err(Error::response_format(
                    "transcription response contained no segments",
                ));
            }
        };

        self.transition(PipelineState::Transcribing);
        let segments = valid_segments(raw);
        if segments.is_empty() {
            return Err(Error::encoding(
                "no usable segments in transcription; nothing to encode",
            ));
        }

        Ok(segments)
    }

    fn transition(&mut self, next: PipelineState) {
        debug!(from = ?self.state, to = ?next, "pipeline state change");
        self.state = next;
    }

    fn finish(&mut self, succeeded: bool) {
        self.transition(if succeeded {
            PipelineState::Succeeded
        } else {
            PipelineState::Failed
        });
    }
}

fn write_all<E: SegmentEncoder>(segments: &[Segment], encoder: &mut E) -> Result<()> {
    for seg in segments {
        encoder.write_segment(seg)?;
    }
    Ok(())
}

fn merge_run_and_close(run_res: Result<()>, close_res: Result<()>) -> Result<()> {
    match (run_res, close_res) {
        (Ok(()), Ok(())) => Ok(()),
        (Ok(()), Err(close_err)) => Err(close_err),
        // When both fail, the run error is the one worth reporting.
        (Err(err), _) => Err(err),
    }
}
