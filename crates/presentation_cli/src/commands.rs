//! Subcommand implementations
//!
//! Each command returns the text to print so it can be tested without a
//! terminal.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, ensure};
use application::{ConversationPipeline, PreferencesService, TurnInput};
use domain::{LogEntry, ProviderId, Stage};
use infrastructure::{
    AppSettings, CommandVoice, FileAudioSink, FileCaptureDevice, FilePreferencesStore,
    SharedTranscriptRecognizer, build_registry,
};
use secure_config::{
    CRYPTO_KEY_NAME, ConfigAccessor, ConfigSource, CredentialGate, EnvConfigSource, ProviderFlags,
};
use tracing::{info, warn};

/// Settings plus the key/value configuration every command reads through
#[derive(Debug)]
pub struct Runtime {
    settings: AppSettings,
    accessor: Arc<ConfigAccessor>,
}

impl Runtime {
    pub fn new(settings: AppSettings, source: Arc<dyn ConfigSource>) -> anyhow::Result<Self> {
        let accessor = Arc::new(ConfigAccessor::new(source));
        let settings = settings
            .with_overrides(&accessor)
            .context("Failed to apply configuration overrides")?;
        Ok(Self { settings, accessor })
    }

    fn gate(&self) -> CredentialGate {
        CredentialGate::new(Arc::clone(&self.accessor))
    }

    fn flags(&self) -> ProviderFlags {
        ProviderFlags::new(Arc::clone(&self.accessor))
    }

    fn preferences(&self) -> PreferencesService {
        PreferencesService::new(
            Arc::new(FilePreferencesStore::new(self.settings.preferences_file())),
            self.flags().stage_options(),
            self.settings.voice_defaults(),
        )
    }
}

/// Process environment, merged over `env_file` when given
pub fn config_source(env_file: Option<&Path>) -> anyhow::Result<EnvConfigSource> {
    match env_file {
        Some(path) => EnvConfigSource::with_dotenv(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => Ok(EnvConfigSource::discover()),
    }
}

/// Arguments of the `turn` command
#[derive(Debug, Clone)]
pub struct TurnArgs {
    pub audio: PathBuf,
    pub transcript: Option<String>,
    pub output: PathBuf,
    pub stt: Option<ProviderId>,
    pub ai: Option<ProviderId>,
    pub tts: Option<ProviderId>,
    pub say: Option<String>,
}

/// Run one turn; per-turn provider overrides are not saved
pub async fn turn(runtime: &Runtime, args: TurnArgs) -> anyhow::Result<String> {
    let service = runtime.preferences();
    let mut preferences = service.load().await;
    for (stage, chosen) in [(Stage::Stt, args.stt), (Stage::Ai, args.ai), (Stage::Tts, args.tts)] {
        if let Some(id) = chosen {
            ensure!(id.stage() == stage, "{id} is not a {stage} provider");
            ensure!(service.options().contains(id), "{id} is disabled in the configuration");
            preferences.select(id);
        }
    }
    let input = TurnInput::from_preferences(&preferences)?;

    let registry = build_registry(&runtime.settings, runtime.gate())?;
    let voice = args
        .say
        .map_or_else(CommandVoice::silent, |program| CommandVoice::new(program, Vec::new()));
    let mut pipeline = ConversationPipeline::new(
        Arc::new(registry),
        Arc::new(FileAudioSink::new(&args.output)),
        Arc::new(voice),
    );

    let device = FileCaptureDevice::new(&args.audio);
    let recognizer = Arc::new(SharedTranscriptRecognizer::new(args.transcript.unwrap_or_default()));
    let seen = pipeline.log().len();

    let session = pipeline.start_recording(&device, recognizer).await?;
    let turn = pipeline.finish_recording(session, &input).await?;

    let mut out = render_entries(pipeline.log().since(seen));
    if turn.audio_rendered() == Some(true) {
        let _ = writeln!(out, "Reply audio written to {}", args.output.display());
    }
    info!(turn = %turn.id, "Turn finished");
    Ok(out)
}

fn render_entries(entries: &[LogEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(
            out,
            "[{}] {}: {}",
            entry.time.format("%H:%M:%S"),
            entry.source,
            entry.content
        );
    }
    out
}

/// Catalog grouped by stage with each provider's readiness
pub fn providers(runtime: &Runtime) -> String {
    let gate = runtime.gate();
    let flags = runtime.flags();
    let mut out = String::new();

    for stage in [Stage::Stt, Stage::Ai, Stage::Tts] {
        let _ = writeln!(out, "{stage}");
        for id in ProviderId::for_stage(stage) {
            let status = if flags.is_enabled(id) {
                gate.readiness_note(id.descriptor())
            } else {
                format!("Disabled by {}.", id.descriptor().enable_key)
            };
            let _ = writeln!(out, "  {:<22} {status}", id.name());
        }
    }
    out
}

/// Encrypt `plaintext` into an `enc:v1:` value
pub fn encrypt(runtime: &Runtime, plaintext: &str) -> anyhow::Result<String> {
    ensure!(!plaintext.is_empty(), "Nothing to encrypt");
    if runtime.accessor.uses_fallback_key() {
        warn!("{CRYPTO_KEY_NAME} is not set; encrypting with the built-in fallback key");
    }
    Ok(runtime.accessor.cipher().encrypt(plaintext)?)
}

pub async fn show_preferences(runtime: &Runtime) -> anyhow::Result<String> {
    let preferences = runtime.preferences().load().await;
    Ok(serde_json::to_string_pretty(&preferences)?)
}

/// Changes requested by `prefs set`
#[derive(Debug, Clone, Default)]
pub struct PreferenceChanges {
    pub name: Option<String>,
    pub providers: Vec<ProviderId>,
    pub elevenlabs_voice: Option<String>,
    pub murf_voice: Option<String>,
}

pub async fn update_preferences(runtime: &Runtime, changes: PreferenceChanges) -> anyhow::Result<String> {
    let service = runtime.preferences();
    for id in &changes.providers {
        ensure!(service.options().contains(*id), "{id} is disabled in the configuration");
    }

    let preferences = service
        .update(move |prefs| {
            if let Some(name) = changes.name {
                prefs.user_name = name;
            }
            for id in changes.providers {
                prefs.select(id);
            }
            if let Some(voice) = changes.elevenlabs_voice {
                prefs.eleven_labs_voice_id = voice;
            }
            if let Some(voice) = changes.murf_voice {
                prefs.murf_tts_voice_id = voice;
            }
        })
        .await?;
    Ok(serde_json::to_string_pretty(&preferences)?)
}
