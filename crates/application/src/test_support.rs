//! Mocks and fakes shared by the unit tests

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use ai_core::{GeneratedReply, GenerationError, GenerationRequest, ResponseGenerator};
use ai_speech::{
    AudioPayload, SpeechToText, SynthesisError, SynthesisRequest, SynthesizedAudio, TextToSpeech,
    Transcription, TranscriptionError,
};
use async_trait::async_trait;
use domain::ProviderId;
use mockall::mock;
use secure_config::{ConfigAccessor, CredentialGate, MapConfigSource};

use crate::error::CaptureError;
use crate::ports::{CaptureDevice, CaptureStream};

mock! {
    pub Stt {}

    #[async_trait]
    impl SpeechToText for Stt {
        fn provider(&self) -> ProviderId;
        async fn transcribe(&self, audio: &AudioPayload) -> Result<Transcription, TranscriptionError>;
    }
}

mock! {
    pub Generator {}

    #[async_trait]
    impl ResponseGenerator for Generator {
        fn provider(&self) -> ProviderId;
        async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedReply, GenerationError>;
    }
}

mock! {
    pub Tts {}

    #[async_trait]
    impl TextToSpeech for Tts {
        fn provider(&self) -> ProviderId;
        async fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesizedAudio, SynthesisError>;
    }
}

pub fn gate(keys: &[(&str, &str)]) -> CredentialGate {
    let source: MapConfigSource = keys.iter().copied().collect();
    CredentialGate::new(Arc::new(ConfigAccessor::new(Arc::new(source))))
}

pub fn stt_mock(id: ProviderId) -> MockStt {
    let mut mock = MockStt::new();
    mock.expect_provider().return_const(id);
    mock
}

pub fn generator_mock(id: ProviderId) -> MockGenerator {
    let mut mock = MockGenerator::new();
    mock.expect_provider().return_const(id);
    mock
}

pub fn tts_mock(id: ProviderId) -> MockTts {
    let mut mock = MockTts::new();
    mock.expect_provider().return_const(id);
    mock
}

pub fn audio(len: usize) -> AudioPayload {
    AudioPayload::new(vec![7_u8; len], "audio/webm")
}

pub fn http_500(provider: &'static str) -> TranscriptionError {
    TranscriptionError::Http {
        provider,
        status: 500,
        detail: None,
    }
}

/// Counts how the recording session uses the device
#[derive(Debug, Default)]
pub struct DeviceCounters {
    pub opened: AtomicUsize,
    pub released: AtomicUsize,
}

impl DeviceCounters {
    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

/// Capture device whose stream can be told to fail at any step
#[derive(Debug, Default)]
pub struct FakeDevice {
    pub counters: Arc<DeviceCounters>,
    pub deny: bool,
    pub fail_begin: bool,
    pub fail_finish: bool,
    pub bytes: Vec<u8>,
}

struct FakeStream {
    counters: Arc<DeviceCounters>,
    fail_begin: bool,
    fail_finish: bool,
    bytes: Vec<u8>,
}

#[async_trait]
impl CaptureDevice for FakeDevice {
    async fn open(&self) -> Result<Box<dyn CaptureStream>, CaptureError> {
        if self.deny {
            return Err(CaptureError::PermissionDenied);
        }
        self.counters.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeStream {
            counters: Arc::clone(&self.counters),
            fail_begin: self.fail_begin,
            fail_finish: self.fail_finish,
            bytes: self.bytes.clone(),
        }))
    }
}

#[async_trait]
impl CaptureStream for FakeStream {
    async fn begin(&mut self) -> Result<(), CaptureError> {
        if self.fail_begin {
            return Err(CaptureError::Recording("no input tracks".to_string()));
        }
        Ok(())
    }

    async fn finish(&mut self) -> Result<AudioPayload, CaptureError> {
        if self.fail_finish {
            return Err(CaptureError::Recording("encoder crashed".to_string()));
        }
        Ok(AudioPayload::new(self.bytes.clone(), "audio/webm"))
    }

    fn release(&mut self) {
        self.counters.released.fetch_add(1, Ordering::SeqCst);
    }
}
