use std::io::Write;

use crate::Result;
use crate::segment_encoder::SegmentEncoder;
use crate::segments::Segment;

/// A `SegmentEncoder` that writes segments as a single JSON array.
///
/// The array is emitted incrementally: the opening bracket is deferred until
/// the first write (or close), commas are placed between elements, and
/// `close` seals the array. Zero segments still produce valid JSON (`[]`),
/// which is deliberately different from the SRT encoder's empty output —
/// JSON consumers get a parseable document either way.
pub struct JsonArrayEncoder<W: Write> {
    w: W,

    /// Whether the opening `[` has been written.
    started: bool,

    /// Whether the next element is the first (controls comma placement).
    first: bool,

    closed: bool,
}

impl<W: Write> JsonArrayEncoder<W> {
    pub fn new(w: W) -> Self {
        Self {
            w,
            started: false,
            first: true,
            closed: false,
        }
    }

    fn start_if_needed(&mut self) -> Result<()> {
        if !self.started {
            self.w.write_all(b"[")?;
            self.started = true;
        }
        Ok(())
    }
}

impl<W: Write> SegmentEncoder for JsonArrayEncoder<W> {
    fn write_segment(&mut self, seg: &Segment) -> Result<()> {
        if self.closed {
            return Err(crate::Error::encoding(
                "cannot write segment: encoder is already closed",
            ));
        }

        self.start_if_needed()?;

        if !self.first {
            self.w.write_all(b",")?;
        }
        self.first = false;

        serde_json::to_writer(&mut self.w, seg)
            .map_err(|err| crate::Error::encoding(format!("failed to serialize segment: {err}")))?;

        // Flush so streaming consumers (stdout, pipes) see output promptly.
        self.w.flush()?;

        Ok(())
    }

    /// Seal the array and flush. Idempotent; writes `[]` if nothing was
    /// written before closing.
    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        self.start_if_needed()?;
        self.w.write_all(b"]")?;
        self.w.flush()?;

        self.closed = true;
        Ok(())
    }
}
