//! Conversation pipeline - One turn from audio to spoken reply

use std::sync::Arc;

use ai_speech::AudioPayload;
use domain::{
    ConversationLog, ConversationTurn, DomainError, PipelineState, Preferences, ProviderId, Stage,
};
use tracing::{info, instrument, warn};

use super::recording::RecordingSession;
use super::response::ResponseOrchestrator;
use super::synthesis::SynthesisOrchestrator;
use super::transcription::TranscriptionOrchestrator;
use crate::error::PipelineError;
use crate::ports::{AudioSink, CaptureDevice, LocalRecognizer, LocalVoice};
use crate::registry::ProviderRegistry;

/// Providers and user details fixed for the duration of one turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnInput {
    pub stt: ProviderId,
    pub ai: ProviderId,
    pub tts: ProviderId,
    pub user_name: String,
    pub voice_id: Option<String>,
}

impl TurnInput {
    /// Snapshot the current selection; every stage needs a provider
    pub fn from_preferences(preferences: &Preferences) -> Result<Self, PipelineError> {
        let pick = |stage: Stage| {
            preferences
                .selection(stage)
                .ok_or(PipelineError::NoProviderSelected(stage))
        };
        let tts = pick(Stage::Tts)?;
        Ok(Self {
            stt: pick(Stage::Stt)?,
            ai: pick(Stage::Ai)?,
            tts,
            user_name: preferences.display_name().to_string(),
            voice_id: preferences.voice_override(tts).map(ToString::to_string),
        })
    }
}

/// Runs the three stages strictly in sequence, one turn at a time
#[derive(Debug)]
pub struct ConversationPipeline {
    transcription: TranscriptionOrchestrator,
    response: ResponseOrchestrator,
    synthesis: SynthesisOrchestrator,
    state: PipelineState,
    history: Vec<PipelineState>,
    log: ConversationLog,
}

impl ConversationPipeline {
    pub fn new(registry: Arc<ProviderRegistry>, sink: Arc<dyn AudioSink>, voice: Arc<dyn LocalVoice>) -> Self {
        Self {
            transcription: TranscriptionOrchestrator::new(Arc::clone(&registry)),
            response: ResponseOrchestrator::new(Arc::clone(&registry)),
            synthesis: SynthesisOrchestrator::new(registry, sink, voice),
            state: PipelineState::Idle,
            history: vec![PipelineState::Idle],
            log: ConversationLog::new(),
        }
    }

    pub const fn state(&self) -> PipelineState {
        self.state
    }

    /// States visited by the current or most recent turn
    pub fn history(&self) -> &[PipelineState] {
        &self.history
    }

    pub const fn log(&self) -> &ConversationLog {
        &self.log
    }

    /// Acquire the capture device and move to `Listening`
    #[instrument(skip_all)]
    pub async fn start_recording(
        &mut self,
        device: &dyn CaptureDevice,
        recognizer: Arc<dyn LocalRecognizer>,
    ) -> Result<RecordingSession, PipelineError> {
        self.begin_turn()?;
        self.transition(PipelineState::Listening)?;
        match RecordingSession::start(device, recognizer).await {
            Ok(session) => Ok(session),
            Err(e) => Err(self.fail(e.into())),
        }
    }

    /// Abandon `session` without running a turn and return to `Idle`
    #[instrument(skip_all)]
    pub fn cancel_recording(&mut self, session: RecordingSession) -> Result<(), PipelineError> {
        session.cancel();
        if self.state != PipelineState::Listening {
            return Err(DomainError::InvalidTransition {
                from: self.state,
                to: PipelineState::Idle,
            }
            .into());
        }
        self.transition(PipelineState::Idle)?;
        info!("Recording cancelled");
        Ok(())
    }

    /// Stop `session` and run the stages on what it captured
    pub async fn finish_recording(
        &mut self,
        session: RecordingSession,
        input: &TurnInput,
    ) -> Result<ConversationTurn, PipelineError> {
        if self.state != PipelineState::Listening {
            return Err(DomainError::InvalidTransition {
                from: self.state,
                to: PipelineState::Transcribing,
            }
            .into());
        }
        match session.stop().await {
            Ok(utterance) => {
                self.run_stages(&utterance.audio, &utterance.local_transcript, input)
                    .await
            },
            Err(e) => Err(self.fail(e.into())),
        }
    }

    /// Run one turn on audio captured elsewhere
    pub async fn run_turn(
        &mut self,
        audio: &AudioPayload,
        local_transcript: &str,
        input: &TurnInput,
    ) -> Result<ConversationTurn, PipelineError> {
        self.begin_turn()?;
        self.run_stages(audio, local_transcript, input).await
    }

    #[instrument(skip(self, audio, local_transcript, input), fields(stt = %input.stt, ai = %input.ai, tts = %input.tts))]
    async fn run_stages(
        &mut self,
        audio: &AudioPayload,
        local_transcript: &str,
        input: &TurnInput,
    ) -> Result<ConversationTurn, PipelineError> {
        let mut turn = ConversationTurn::new();

        self.advance(PipelineState::Transcribing)?;
        let transcript = match self
            .transcription
            .transcribe(input.stt, audio, local_transcript)
            .await
        {
            Ok(output) => output,
            Err(e) => return Err(self.fail(e)),
        };
        if let Some(notice) = &transcript.notice {
            self.log.push_system(notice.as_str());
        }
        let recorded = turn.set_transcript(transcript.text.as_str(), transcript.source);
        self.check(recorded)?;
        self.log
            .push_user(transcript.text.as_str(), transcript.source.label());

        self.advance(PipelineState::Generating)?;
        let reply = match self
            .response
            .respond(input.ai, &transcript.text, &input.user_name)
            .await
        {
            Ok(output) => output,
            Err(e) => return Err(self.fail(e)),
        };
        let recorded = turn.set_reply(reply.text.as_str(), reply.source);
        self.check(recorded)?;
        self.log.push_assistant(reply.text.as_str(), reply.source.label());

        self.advance(PipelineState::Synthesizing)?;
        let outcome = self
            .synthesis
            .speak(input.tts, &reply.text, input.voice_id.as_deref())
            .await;
        if let Some(notice) = outcome.notice {
            self.log.push_system(notice);
        }
        let recorded = turn.set_audio_rendered(outcome.rendered);
        self.check(recorded)?;
        self.advance(PipelineState::Done)?;
        info!(transcript_source = %transcript.source, rendered = outcome.rendered, "Turn complete");
        Ok(turn)
    }

    fn begin_turn(&mut self) -> Result<(), PipelineError> {
        if !self.state.accepts_new_turn() {
            return Err(PipelineError::Busy(self.state));
        }
        self.history = vec![self.state];
        Ok(())
    }

    fn transition(&mut self, next: PipelineState) -> Result<(), DomainError> {
        if !self.state.can_transition_to(next) {
            return Err(DomainError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        self.history.push(next);
        Ok(())
    }

    /// Transition inside a turn; a refused transition ends the turn
    fn advance(&mut self, next: PipelineState) -> Result<(), PipelineError> {
        let moved = self.transition(next);
        self.check(moved)
    }

    fn check(&mut self, result: Result<(), DomainError>) -> Result<(), PipelineError> {
        result.map_err(|e| self.fail(e.into()))
    }

    /// Pass through `Errored` back to `Idle`, dropping the partial turn
    fn fail(&mut self, err: PipelineError) -> PipelineError {
        warn!(error = %err, state = %self.state, "Turn failed");
        // Synthesizing never enters Errored
        if self.state.can_transition_to(PipelineState::Errored) {
            self.history.push(PipelineState::Errored);
        }
        self.history.push(PipelineState::Idle);
        self.state = PipelineState::Idle;
        err
    }
}
