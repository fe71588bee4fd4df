/// Suggest a `.srt` file name for a transcription's output.
///
/// The suggestion is the original file name with its final extension
/// stripped, plus `.srt`. When stripping leaves nothing (empty input, or a
/// bare dotfile like `.mp3`), we fall back to `output.srt`.
pub fn suggested_output_name(file_name: &str) -> String {
    let stem = match file_name.rsplit_once('.') {
        Some((stem, ext)) if !ext.is_empty() && !ext.contains('/') => stem,
        _ => file_name,
    };

    if stem.is_empty() {
        "output.srt".to_owned()
    } else {
        format!("{stem}.srt")
    }
}
