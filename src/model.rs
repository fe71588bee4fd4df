/// The Whisper models offered by the transcription API.
///
/// We keep an explicit allowlist instead of a free-form string so the CLI and
/// library agree on which model ids are known-good, and so a typo fails at
/// argument parsing rather than as a confusing remote error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Model {
    /// Whisper Large V3 (default).
    #[default]
    LargeV3,

    /// Whisper Large V3 Turbo.
    LargeV3Turbo,
}

impl Model {
    /// The model id sent in the request form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LargeV3 => "whisper-large-v3",
            Self::LargeV3Turbo => "whisper-large-v3-turbo",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_ids_match_the_remote_api() {
        assert_eq!(Model::LargeV3.as_str(), "whisper-large-v3");
        assert_eq!(Model::LargeV3Turbo.as_str(), "whisper-large-v3-turbo");
        assert_eq!(Model::default(), Model::LargeV3);
    }
}
