//! Conversation turn entity

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::DomainError;
use crate::value_objects::TurnSource;

/// One utterance, its reply and whether the reply was rendered as cloud audio.
///
/// Built incrementally by the pipeline; every field is write-once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationTurn {
    /// Unique identifier
    pub id: Uuid,
    /// When the turn began
    pub started_at: DateTime<Utc>,
    transcript: Option<String>,
    transcript_source: Option<TurnSource>,
    reply: Option<String>,
    reply_source: Option<TurnSource>,
    audio_rendered: Option<bool>,
}

impl ConversationTurn {
    /// Start an empty turn
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            transcript: None,
            transcript_source: None,
            reply: None,
            reply_source: None,
            audio_rendered: None,
        }
    }

    /// Record the transcript and who produced it
    pub fn set_transcript(
        &mut self,
        text: impl Into<String>,
        source: TurnSource,
    ) -> Result<(), DomainError> {
        if self.transcript.is_some() {
            return Err(DomainError::FieldAlreadySet("transcript"));
        }
        self.transcript = Some(text.into());
        self.transcript_source = Some(source);
        Ok(())
    }

    /// Record the reply and who produced it
    pub fn set_reply(&mut self, text: impl Into<String>, source: TurnSource) -> Result<(), DomainError> {
        if self.reply.is_some() {
            return Err(DomainError::FieldAlreadySet("reply"));
        }
        self.reply = Some(text.into());
        self.reply_source = Some(source);
        Ok(())
    }

    /// Record whether cloud audio was played for the reply
    pub fn set_audio_rendered(&mut self, rendered: bool) -> Result<(), DomainError> {
        if self.audio_rendered.is_some() {
            return Err(DomainError::FieldAlreadySet("audio_rendered"));
        }
        self.audio_rendered = Some(rendered);
        Ok(())
    }

    #[must_use]
    pub fn transcript(&self) -> Option<&str> {
        self.transcript.as_deref()
    }

    #[must_use]
    pub const fn transcript_source(&self) -> Option<TurnSource> {
        self.transcript_source
    }

    #[must_use]
    pub fn reply(&self) -> Option<&str> {
        self.reply.as_deref()
    }

    #[must_use]
    pub const fn reply_source(&self) -> Option<TurnSource> {
        self.reply_source
    }

    /// `Some(true)` when cloud audio played, `Some(false)` when the local voice spoke
    #[must_use]
    pub const fn audio_rendered(&self) -> Option<bool> {
        self.audio_rendered
    }

    /// All three stages have written their results
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.transcript.is_some() && self.reply.is_some() && self.audio_rendered.is_some()
    }
}

impl Default for ConversationTurn {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::ProviderId;

    #[test]
    fn fields_are_write_once() {
        let mut turn = ConversationTurn::new();
        turn.set_transcript("hello", TurnSource::LocalFallback).unwrap();
        let err = turn
            .set_transcript("again", TurnSource::Provider(ProviderId::Deepgram))
            .unwrap_err();
        assert_eq!(err, DomainError::FieldAlreadySet("transcript"));
        assert_eq!(turn.transcript(), Some("hello"));
        assert_eq!(turn.transcript_source(), Some(TurnSource::LocalFallback));

        turn.set_audio_rendered(false).unwrap();
        assert!(turn.set_audio_rendered(true).is_err());
        assert_eq!(turn.audio_rendered(), Some(false));
    }

    #[test]
    fn completes_after_all_stages() {
        let mut turn = ConversationTurn::new();
        assert!(!turn.is_complete());
        turn.set_transcript("hi", TurnSource::Provider(ProviderId::OpenAiWhisper))
            .unwrap();
        turn.set_reply("hello back", TurnSource::Provider(ProviderId::OpenAiApi))
            .unwrap();
        assert!(!turn.is_complete());
        turn.set_audio_rendered(true).unwrap();
        assert!(turn.is_complete());
        assert_eq!(turn.reply_source(), Some(TurnSource::Provider(ProviderId::OpenAiApi)));
    }

    #[test]
    fn serializes_sources_by_label() {
        let mut turn = ConversationTurn::new();
        turn.set_transcript("hi", TurnSource::LocalFallback).unwrap();
        let json = serde_json::to_value(&turn).unwrap();
        assert_eq!(json["transcript_source"], "local fallback");
        assert!(json["reply"].is_null());
    }
}
