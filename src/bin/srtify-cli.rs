use anyhow::{Context, Result};
use clap::Parser;

use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use srtify::client::TranscriptionRequest;
use srtify::model::Model;
use srtify::opts::Opts;
use srtify::output_name::suggested_output_name;
use srtify::output_type::OutputType;
use srtify::pipeline::Pipeline;

#[tokio::main]
async fn main() -> Result<()> {
    srtify::logging::init();
    let params = get_params()?;

    let audio = fs::read(&params.audio_path)
        .with_context(|| format!("failed to read '{}'", params.audio_path.display()))?;
    let file_name = params
        .audio_path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("audio")
        .to_owned();

    let credential = params
        .api_key
        .clone()
        .or_else(|| std::env::var("GROQ_API_KEY").ok())
        .unwrap_or_default();

    let mut opts = Opts::default();
    opts.request_timeout = Duration::from_secs(params.timeout_secs);
    if let Some(endpoint) = params.endpoint.clone() {
        opts.endpoint = endpoint;
    }

    let request = TranscriptionRequest {
        audio,
        file_name: file_name.clone(),
        // The extension fallback covers type acceptance for local files.
        content_type: None,
        model: params.model,
        language: params.language.clone(),
    };

    let mut pipeline = Pipeline::new(&opts)?;

    let target = params.output.clone().map(|path| {
        if path.is_dir() {
            path.join(suggested_output_name(&file_name))
        } else {
            path
        }
    });

    let run = match &target {
        Some(path) => {
            let file = fs::File::create(path)
                .with_context(|| format!("failed to create '{}'", path.display()))?;
            pipeline
                .transcribe_to(&request, &credential, file, &params.output_type)
                .await
        }
        None => {
            let stdout = io::stdout();
            pipeline
                .transcribe_to(&request, &credential, stdout.lock(), &params.output_type)
                .await
        }
    };

    run.map_err(|err| anyhow::anyhow!("{:?} failure: {err}", err.stage()))?;

    if let Some(path) = target {
        eprintln!("wrote {}", path.display());
    }

    Ok(())
}

#[derive(Parser, Debug)]
#[command(name = "srtify")]
#[command(about = "Transcribe audio to SRT subtitles through the Groq API")]
struct Params {
    /// Audio file to transcribe (.mp3, .wav, .m4a, .ogg, .flac, .opus).
    #[arg(short = 'a', long = "audio")]
    pub audio_path: PathBuf,

    /// Groq API key; falls back to the GROQ_API_KEY environment variable.
    #[arg(short = 'k', long = "api-key")]
    pub api_key: Option<String>,

    #[arg(
        short = 'm',
        long = "model",
        value_enum,
        default_value_t = Model::LargeV3
    )]
    pub model: Model,

    /// ISO language hint (e.g. "en"); omit for auto-detection.
    #[arg(short = 'l', long = "language")]
    pub language: Option<String>,

    #[arg(
        short = 'o',
        long = "output-type",
        value_enum,
        default_value_t = OutputType::Srt
    )]
    pub output_type: OutputType,

    /// Write output here instead of stdout. A directory gets the suggested
    /// `<input>.srt` name.
    #[arg(long = "output")]
    pub output: Option<PathBuf>,

    /// Request timeout in seconds.
    #[arg(long = "timeout-secs", default_value_t = 300)]
    pub timeout_secs: u64,

    /// Override the transcription endpoint (OpenAI-compatible servers).
    #[arg(long = "endpoint")]
    pub endpoint: Option<String>,
}

fn get_params() -> Result<Params> {
    Ok(Params::parse())
}
