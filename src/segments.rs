use serde::{Deserialize, Deserializer, Serialize};

/// One segment as it appears in the API's `verbose_json` response.
///
/// The remote service is not fully trusted here: fields can be missing, and
/// tooling in front of the API has been observed to mangle types. Every field
/// deserializes leniently — a wrong-typed value becomes `None` rather than
/// failing the whole response — and [`valid_segments`] decides what is
/// actually usable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSegment {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub start: Option<f64>,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub end: Option<f64>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub text: Option<String>,
}

/// A validated, timed utterance ready for subtitle encoding.
///
/// `text` is stored already trimmed; encoders write it verbatim.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Segment {
    #[serde(rename = "start")]
    pub start_seconds: f64,

    #[serde(rename = "end")]
    pub end_seconds: f64,

    pub text: String,
}

/// Filter raw segments down to the well-formed, non-empty ones.
///
/// A segment is kept iff both timestamps are numeric and its text trims
/// non-empty. Everything else is dropped silently — this is a tolerant
/// filter, not a validation gate — and input order is preserved. An empty
/// result is a normal outcome the caller must account for.
pub fn valid_segments(raw: Vec<RawSegment>) -> Vec<Segment> {
    raw.into_iter()
        .filter_map(|seg| {
            let start_seconds = seg.start?;
            let end_seconds = seg.end?;
            let text = seg.text?;
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return None;
            }

            Some(Segment {
                start_seconds,
                end_seconds,
                text: trimmed.to_owned(),
            })
        })
        .collect()
}

/// Accept any JSON value; yield `Some` only for finite numbers.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64().filter(|n| n.is_finite()))
}

/// Accept any JSON value; yield `Some` only for strings.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_str().map(str::to_owned))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(start: Option<f64>, end: Option<f64>, text: Option<&str>) -> RawSegment {
        RawSegment {
            start,
            end,
            text: text.map(str::to_owned),
        }
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(valid_segments(Vec::new()).is_empty());
    }

    #[test]
    fn whitespace_only_text_is_dropped() {
        let out = valid_segments(vec![raw(Some(1.0), Some(2.0), Some("  "))]);
        assert!(out.is_empty());
    }

    #[test]
    fn missing_fields_are_dropped_without_error() {
        let out = valid_segments(vec![
            raw(None, Some(2.0), Some("no start")),
            raw(Some(1.0), None, Some("no end")),
            raw(Some(1.0), Some(2.0), None),
        ]);
        assert!(out.is_empty());
    }

    #[test]
    fn kept_segments_preserve_order_and_trim_text() {
        let out = valid_segments(vec![
            raw(Some(0.0), Some(1.0), Some("  first  ")),
            raw(Some(1.0), Some(2.0), Some("\t")),
            raw(Some(2.0), Some(3.0), Some("second")),
        ]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].text, "first");
        assert_eq!(out[1].text, "second");
        assert_eq!(out[0].start_seconds, 0.0);
        assert_eq!(out[1].end_seconds, 3.0);
    }

    #[test]
    fn wrong_typed_fields_deserialize_to_none() -> anyhow::Result<()> {
        let seg: RawSegment = serde_json::from_value(serde_json::json!({
            "start": "not a number",
            "end": 2.5,
            "text": "hello",
        }))?;
        assert_eq!(seg.start, None);
        assert_eq!(seg.end, Some(2.5));
        assert_eq!(seg.text.as_deref(), Some("hello"));

        let seg: RawSegment = serde_json::from_value(serde_json::json!({
            "start": 0.0,
            "end": 1.0,
            "text": 42,
        }))?;
        assert_eq!(seg.text, None);
        Ok(())
    }

    #[test]
    fn extra_response_fields_are_ignored() -> anyhow::Result<()> {
        let seg: RawSegment = serde_json::from_value(serde_json::json!({
            "id": 3,
            "seek": 1200,
            "start": 1.0,
            "end": 2.0,
            "text": "ok",
            "avg_logprob": -0.12,
        }))?;
        let out = valid_segments(vec![seg]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text, "ok");
        Ok(())
    }

    #[test]
    fn segment_serializes_with_wire_names() -> anyhow::Result<()> {
        let seg = Segment {
            start_seconds: 0.5,
            end_seconds: 1.5,
            text: "hi".to_owned(),
        };
        let value = serde_json::to_value(&seg)?;
        assert_eq!(value["start"], 0.5);
        assert_eq!(value["end"], 1.5);
        assert_eq!(value["text"], "hi");
        Ok(())
    }
}
