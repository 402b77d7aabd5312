use std::path::PathBuf;

use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use futures_util::StreamExt;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use playht_stream::config::{DebugSettings, SdkSettings};
use playht_stream::core::tts::playht::voices::PLAY_DIALOG_TURBO_VOICES;
use playht_stream::{PlayHtAudioFormat, PlayHtClient, PlayHtModel, StreamOptions};

/// Play.ht streaming text-to-speech
#[derive(Parser, Debug)]
#[command(name = "playht-stream")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Synthesize text and stream the audio into a file
    Speak {
        /// Text to synthesize
        #[arg(short = 't', long)]
        text: String,

        /// Voice identifier (S3 manifest URL, or a turbo voice name)
        #[arg(short = 'v', long)]
        voice: String,

        /// Voice engine (e.g. Play3.0-mini, PlayDialog-turbo)
        #[arg(short = 'e', long)]
        engine: Option<String>,

        /// Output format (mp3, wav, mulaw, flac, ogg, raw)
        #[arg(short = 'f', long)]
        format: Option<String>,

        #[arg(long)]
        quality: Option<String>,

        #[arg(long)]
        speed: Option<f32>,

        #[arg(long)]
        sample_rate: Option<u32>,

        /// Language of the text (PlayDialog-turbo only)
        #[arg(long)]
        language: Option<String>,

        /// Turbo voice id, overrides --voice for PlayDialog-turbo
        #[arg(long)]
        voice_id: Option<String>,

        /// Log one line per request
        #[arg(long)]
        debug: bool,

        /// File the audio is written to
        #[arg(short = 'o', long, value_name = "FILE")]
        output: PathBuf,
    },

    /// List voice engines and PlayDialog-turbo voices
    Voices,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists (must be done before config loading)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Voices => {
            println!("Voice engines:");
            for model in PlayHtModel::all() {
                println!("  {}", model);
            }
            println!("PlayDialog-turbo voices:");
            for voice in PLAY_DIALOG_TURBO_VOICES {
                println!("  {}", voice);
            }
            Ok(())
        }
        Commands::Speak {
            text,
            voice,
            engine,
            format,
            quality,
            speed,
            sample_rate,
            language,
            voice_id,
            debug,
            output,
        } => {
            let mut settings = if let Some(config_path) = cli.config {
                println!("Loading configuration from {}", config_path.display());
                SdkSettings::from_file(&config_path).map_err(|e| anyhow!(e.to_string()))?
            } else {
                SdkSettings::from_env().map_err(|e| anyhow!(e.to_string()))?
            };
            if debug {
                settings = settings.with_debug(DebugSettings::enabled());
            }

            let mut options = StreamOptions::default();
            if let Some(engine) = engine {
                let model = PlayHtModel::parse(&engine)
                    .ok_or_else(|| anyhow!("Unknown voice engine '{}'", engine))?;
                options = options.with_voice_engine(model);
            }
            if let Some(format) = format {
                let format = PlayHtAudioFormat::parse(&format)
                    .ok_or_else(|| anyhow!("Unknown output format '{}'", format))?;
                options = options.with_output_format(format);
            }
            options.quality = quality;
            options.speed = speed;
            options.sample_rate = sample_rate;
            options.language = language;
            options.voice_id = voice_id;

            let cancel = CancellationToken::new();
            let on_signal = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    warn!("Interrupted, cancelling request");
                    on_signal.cancel();
                }
            });

            let client = PlayHtClient::new(settings);
            let mut audio = client
                .stream_with_cancel(&text, &voice, &options, cancel)
                .await?;

            let mut file = File::create(&output)
                .await
                .with_context(|| format!("Failed to create {}", output.display()))?;
            let mut written = 0usize;
            while let Some(chunk) = audio.next().await {
                let chunk = match chunk {
                    Ok(chunk) => chunk,
                    Err(e) if e.is_cancelled() => {
                        file.flush().await?;
                        anyhow::bail!(
                            "Cancelled after {} bytes; {} is incomplete",
                            written,
                            output.display()
                        );
                    }
                    Err(e) => return Err(e.into()),
                };
                file.write_all(&chunk).await?;
                written += chunk.len();
            }
            file.flush().await?;

            info!(bytes = written, path = %output.display(), "Audio written");
            println!("Wrote {} bytes to {}", written, output.display());
            Ok(())
        }
    }
}
