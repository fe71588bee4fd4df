use std::io::Write;

use crate::Result;
use crate::segment_encoder::SegmentEncoder;
use crate::segments::Segment;

/// A `SegmentEncoder` that writes segments in SubRip (SRT) format.
///
/// Design:
/// - We stream output directly to a `Write` implementation.
/// - The encoder owns the block counter, so numbering is always the 1-based
///   rank of the segments actually written. A caller that filters its input
///   first still gets contiguous numbers with no gaps.
/// - Blocks are separated by exactly one blank line and the output ends with
///   a single trailing newline. Zero segments produce zero bytes; callers
///   must treat empty output as "nothing to show", not as a subtitle file.
pub struct SrtEncoder<W: Write> {
    /// The underlying writer we stream SRT into.
    w: W,

    /// Number of blocks written so far; also the last block number emitted.
    written: u64,

    /// Whether the encoder has been closed.
    closed: bool,
}

impl<W: Write> SrtEncoder<W> {
    /// Create a new SRT encoder that writes to the provided writer.
    pub fn new(w: W) -> Self {
        Self {
            w,
            written: 0,
            closed: false,
        }
    }
}

impl<W: Write> SegmentEncoder for SrtEncoder<W> {
    /// Write a single numbered SRT block.
    fn write_segment(&mut self, seg: &Segment) -> Result<()> {
        if self.closed {
            return Err(crate::Error::encoding(
                "cannot write segment: encoder is already closed",
            ));
        }

        // Blank line separates blocks; the first block is not preceded by one.
        if self.written > 0 {
            writeln!(&mut self.w)?;
        }
        self.written += 1;

        // SRT timestamps use `HH:MM:SS,mmm`.
        let start = format_timestamp_srt(seg.start_seconds);
        let end = format_timestamp_srt(seg.end_seconds);

        writeln!(&mut self.w, "{}", self.written)?;
        writeln!(&mut self.w, "{start} --> {end}")?;
        writeln!(&mut self.w, "{}", seg.text)?;

        // Flush so streaming consumers (stdout, pipes, sockets) see output promptly.
        self.w.flush()?;

        Ok(())
    }

    /// Flush the underlying writer. This is idempotent.
    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        self.w.flush()?;
        self.closed = true;

        Ok(())
    }
}

/// Encode an already-validated segment sequence into an SRT string.
///
/// Empty input yields the empty string.
pub fn encode_to_string(segments: &[Segment]) -> Result<String> {
    let mut out = Vec::new();
    let mut encoder = SrtEncoder::new(&mut out);
    for seg in segments {
        encoder.write_segment(seg)?;
    }
    encoder.close()?;

    String::from_utf8(out)
        .map_err(|err| crate::Error::encoding(format!("encoded output is not UTF-8: {err}")))
}

/// Format seconds into an SRT timestamp (`HH:MM:SS,mmm`).
///
/// Rounding policy:
/// - We round to the nearest millisecond; decomposing the rounded total keeps
///   carry into seconds/minutes/hours correct (59.9996 → `00:01:00,000`).
/// - The hours field grows past two digits for inputs ≥ 100 hours.
/// - Negative input clamps to zero.
fn format_timestamp_srt(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;

    let ms = total_ms % 1000;
    let total_s = total_ms / 1000;

    let s = total_s % 60;
    let total_m = total_s / 60;

    let m = total_m % 60;
    let h = total_m / 60;

    format!("{h:02}:{m:02}:{s:02},{ms:03}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(start: f64, end: f64, text: &str) -> Segment {
        Segment {
            start_seconds: start,
            end_seconds: end,
            text: text.to_string(),
        }
    }

    #[test]
    fn close_without_segments_emits_nothing() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let mut enc = SrtEncoder::new(&mut out);
        enc.close()?;
        assert_eq!(std::str::from_utf8(&out)?, "");
        Ok(())
    }

    #[test]
    fn single_block_matches_expected_bytes() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let mut enc = SrtEncoder::new(&mut out);
        enc.write_segment(&seg(0.0, 1.0, "Hi"))?;
        enc.close()?;
        assert_eq!(
            std::str::from_utf8(&out)?,
            "1\n00:00:00,000 --> 00:00:01,000\nHi\n"
        );
        Ok(())
    }

    #[test]
    fn blocks_are_blank_line_separated_with_single_trailing_newline() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let mut enc = SrtEncoder::new(&mut out);
        enc.write_segment(&seg(0.0, 1.5, "hello"))?;
        enc.write_segment(&seg(61.2, 62.0, "world"))?;
        enc.close()?;

        let s = std::str::from_utf8(&out)?;
        assert_eq!(
            s,
            "1\n00:00:00,000 --> 00:00:01,500\nhello\n\n2\n00:01:01,200 --> 00:01:02,000\nworld\n"
        );
        assert!(!s.ends_with("\n\n"));
        Ok(())
    }

    #[test]
    fn numbering_is_contiguous_for_prefiltered_streams() -> anyhow::Result<()> {
        // Simulates the validator having dropped a middle segment: the
        // encoder numbers the survivors 1, 2 — never 1, 3.
        let segments = vec![seg(0.0, 1.0, "one"), seg(2.0, 3.0, "three")];
        let srt = encode_to_string(&segments)?;
        assert!(srt.starts_with("1\n"));
        assert!(srt.contains("\n\n2\n"));
        assert!(!srt.contains("\n3\n"));
        Ok(())
    }

    #[test]
    fn encoding_is_byte_identical_across_runs() -> anyhow::Result<()> {
        let segments = vec![seg(0.0, 1.25, "a"), seg(1.25, 9999.9, "b")];
        let first = encode_to_string(&segments)?;
        let second = encode_to_string(&segments)?;
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn write_after_close_errors() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let mut enc = SrtEncoder::new(&mut out);
        enc.close()?;
        let err = enc.write_segment(&seg(0.0, 1.0, "nope")).unwrap_err();
        assert!(err.to_string().contains("already closed"));
        Ok(())
    }

    #[test]
    fn format_timestamp_zero() {
        assert_eq!(format_timestamp_srt(0.0), "00:00:00,000");
    }

    #[test]
    fn format_timestamp_splits_fields() {
        assert_eq!(format_timestamp_srt(3661.5), "01:01:01,500");
    }

    #[test]
    fn format_timestamp_carries_millisecond_overflow() {
        // 999.6 ms must carry into the seconds field, not render as ",1000".
        assert_eq!(format_timestamp_srt(59.9996), "00:01:00,000");
        assert_eq!(format_timestamp_srt(3599.9999), "01:00:00,000");
    }

    #[test]
    fn format_timestamp_rounds_to_nearest_millisecond() {
        assert_eq!(format_timestamp_srt(0.0004), "00:00:00,000");
        assert_eq!(format_timestamp_srt(0.0006), "00:00:00,001");
        assert_eq!(format_timestamp_srt(2.0006), "00:00:02,001");
    }

    #[test]
    fn format_timestamp_grows_hours_past_two_digits() {
        // 100 hours even.
        assert_eq!(format_timestamp_srt(360_000.0), "100:00:00,000");
    }

    #[test]
    fn format_timestamp_clamps_negative_input() {
        assert_eq!(format_timestamp_srt(-0.5), "00:00:00,000");
    }
}
