//! Command-line arguments

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use domain::ProviderId;

/// VoiceRelay CLI
#[derive(Debug, Parser)]
#[command(name = "voicerelay")]
#[command(author, version, about = "Multi-provider voice pipeline (STT, AI, TTS)", long_about = None)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Settings file (defaults to ./voicerelay.toml when present)
    #[arg(short, long, global = true, env = "VOICERELAY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Dotenv file holding provider keys (defaults to ./.env when present)
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run one conversation turn on a recorded audio file
    ///
    /// Example: voicerelay turn question.webm --transcript "what time is it" --output reply.mp3
    Turn {
        /// Recorded audio (webm, ogg, wav, mp3, flac or m4a)
        audio: PathBuf,

        /// Transcript used when cloud transcription is unavailable
        #[arg(short, long)]
        transcript: Option<String>,

        /// Where the synthesized reply is written
        #[arg(short, long, default_value = "reply.mp3")]
        output: PathBuf,

        /// STT provider for this turn only (e.g. "Deepgram")
        #[arg(long)]
        stt: Option<ProviderId>,

        /// AI provider for this turn only (e.g. "Gemini")
        #[arg(long)]
        ai: Option<ProviderId>,

        /// TTS provider for this turn only (e.g. "Amazon Polly")
        #[arg(long)]
        tts: Option<ProviderId>,

        /// Local speech program used for fallback speech (e.g. "espeak")
        #[arg(long, env = "VOICERELAY_SAY")]
        say: Option<String>,
    },

    /// List providers with their availability
    Providers,

    /// Encrypt a configuration value with the configured crypto key
    ///
    /// The output can be stored in the environment or .env file in place
    /// of the plaintext value.
    Encrypt {
        /// Plaintext value; read from stdin when omitted
        value: Option<String>,
    },

    /// Show or change stored preferences
    Prefs {
        #[command(subcommand)]
        action: Option<PrefsAction>,
    },
}

#[derive(Debug, Subcommand)]
pub enum PrefsAction {
    /// Print the stored preferences
    Show,

    /// Change one or more preferences
    Set {
        /// Display name used in replies
        #[arg(long)]
        name: Option<String>,

        /// Provider to select; repeat for several stages
        #[arg(long = "provider")]
        providers: Vec<ProviderId>,

        /// ElevenLabs voice id (empty for the default voice)
        #[arg(long)]
        elevenlabs_voice: Option<String>,

        /// Murf voice id (empty for the default voice)
        #[arg(long)]
        murf_voice: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    #![allow(clippy::panic)]

    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(args)
    }

    #[test]
    fn turn_takes_audio_and_overrides() {
        let cli = parse(&[
            "voicerelay",
            "turn",
            "clip.webm",
            "--transcript",
            "hello",
            "--stt",
            "OpenAI Whisper API",
            "--tts",
            "Amazon Polly",
        ])
        .unwrap();

        let Commands::Turn {
            audio,
            transcript,
            output,
            stt,
            ai,
            tts,
            ..
        } = cli.command
        else {
            panic!("Expected Turn command");
        };
        assert_eq!(audio, PathBuf::from("clip.webm"));
        assert_eq!(transcript.as_deref(), Some("hello"));
        assert_eq!(output, PathBuf::from("reply.mp3"));
        assert_eq!(stt, Some(ProviderId::OpenAiWhisper));
        assert_eq!(ai, None);
        assert_eq!(tts, Some(ProviderId::AmazonPolly));
    }

    #[test]
    fn unknown_provider_is_rejected() {
        assert!(parse(&["voicerelay", "turn", "clip.webm", "--ai", "Clippy"]).is_err());
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = parse(&["voicerelay", "providers", "-vv", "--config", "relay.toml"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("relay.toml")));
        assert!(matches!(cli.command, Commands::Providers));
    }

    #[test]
    fn prefs_set_collects_providers() {
        let cli = parse(&[
            "voicerelay",
            "prefs",
            "set",
            "--name",
            "Ada",
            "--provider",
            "Deepgram",
            "--provider",
            "Gemini",
        ])
        .unwrap();

        let Commands::Prefs {
            action: Some(PrefsAction::Set { name, providers, .. }),
        } = cli.command
        else {
            panic!("Expected prefs set");
        };
        assert_eq!(name.as_deref(), Some("Ada"));
        assert_eq!(providers, vec![ProviderId::Deepgram, ProviderId::Gemini]);
    }

    #[test]
    fn prefs_defaults_to_show() {
        let cli = parse(&["voicerelay", "prefs"]).unwrap();
        assert!(matches!(cli.command, Commands::Prefs { action: None }));
    }

    #[test]
    fn encrypt_value_is_optional() {
        let cli = parse(&["voicerelay", "encrypt"]).unwrap();
        assert!(matches!(cli.command, Commands::Encrypt { value: None }));
    }
}
