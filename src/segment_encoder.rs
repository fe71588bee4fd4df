use crate::Result;
use crate::segments::Segment;

/// Sink for validated segments.
///
/// Encoders are stateful streams: segments are written one at a time and
/// `close` finalizes the output. Callers own the encoder lifecycle and must
/// call `close` exactly when the stream ends.
pub trait SegmentEncoder {
    fn write_segment(&mut self, seg: &Segment) -> Result<()>;
    fn close(&mut self) -> Result<()>;
}
