//! `srtify` — transcribe audio through the Groq API and turn the result into
//! SubRip (SRT) subtitles.
//!
//! This crate provides:
//! - A multipart HTTP client for OpenAI-compatible transcription endpoints
//! - Tolerant filtering of the `verbose_json` segment payload
//! - Streaming SRT and JSON segment encoders
//! - A pipeline state machine that classifies failures by stage
//!
//! The library is designed to be used by both CLI tools and long-running
//! services, with an emphasis on clarity, explicit failure handling, and
//! minimal surprises: one submission means at most one outbound request, and
//! every way a submission can die is a distinct error class.

// High-level API (most consumers should start here).
pub mod opts;
pub mod pipeline;

// Transport: the backend seam and the HTTP client behind it.
pub mod backend;
pub mod client;

// Segment data structures and validation.
pub mod segments;

// Pre-flight input checks (run before any network call).
pub mod preflight;

// Output selection and encoder interfaces.
pub mod output_type;
pub mod segment_encoder;

// Output encoders that serialize segments into various formats.
pub mod json_array_encoder;
pub mod srt_encoder;

// Model selection and output naming conventions.
pub mod model;
pub mod output_name;

// Logging configuration and control.
#[cfg(feature = "logging")]
pub mod logging;

mod error;

pub use error::{Error, FailureStage, Result};
