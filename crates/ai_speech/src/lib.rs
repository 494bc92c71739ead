//! AI Speech - Speech-to-Text and Text-to-Speech adapters
//!
//! Provides the stage traits and one adapter per cloud provider:
//! - `SpeechToText` - Transcribe recorded audio (STT)
//! - `TextToSpeech` - Synthesize speech from text (TTS)
//!
//! # Architecture
//!
//! This crate follows the ports & adapters pattern:
//! - `ports` module defines the traits (ports)
//! - `providers` module contains concrete implementations (adapters)
//! - `aws` module holds request signing plus the S3 and Transcribe clients
//!
//! Every adapter reads its keys through [`secure_config::CredentialGate`]
//! right before calling out, so encrypted configuration values are
//! decrypted transparently and missing keys fail before any request.
//!
//! # Supported Providers
//!
//! - STT: Azure, Google Cloud, Deepgram, AWS Transcribe (batch job),
//!   OpenAI Whisper, ElevenLabs Scribe, Murf Falcon
//! - TTS: Azure, Google Cloud, OpenAI, ElevenLabs, Amazon Polly, Murf
//!
//! # Example
//!
//! ```ignore
//! use ai_speech::{AudioPayload, ProviderContext, SpeechConfig, SpeechToText, WhisperProvider};
//!
//! let ctx = ProviderContext::from_config(SpeechConfig::default(), gate)?;
//! let whisper = WhisperProvider::new(ctx);
//!
//! let audio = AudioPayload::new(bytes, "audio/webm");
//! let transcription = whisper.transcribe(&audio).await?;
//! println!("Transcribed: {}", transcription.text);
//! ```

pub mod aws;
pub mod config;
pub mod error;
pub mod http;
pub mod ports;
pub mod providers;
pub mod types;

pub use aws::{AwsCredentials, AwsError, JobSnapshot, S3ObjectStore, TranscribeJobClient, TranscriptionJobRequest};
pub use config::{SpeechConfig, TranscribeConfig};
pub use error::{SetupError, SynthesisError, TranscriptionError};
pub use http::build_client;
pub use ports::{ObjectStore, SpeechToText, TextToSpeech, TranscriptionJobs};
pub use providers::{
    AwsTranscribeProvider, AzureSttProvider, AzureTtsProvider, DeepgramProvider,
    ElevenLabsSttProvider, ElevenLabsTtsProvider, GoogleSttProvider, GoogleTtsProvider,
    MurfFalconProvider, MurfTtsProvider, OpenAiTtsProvider, PollyProvider, ProviderContext,
    WhisperProvider, stt_adapter, tts_adapter,
};
pub use types::{AudioFormat, AudioPayload, SynthesisRequest, SynthesizedAudio, Transcription};
