//! States of the conversation pipeline

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where the pipeline is within a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    /// Nothing in flight
    #[default]
    Idle,
    /// Capture device is recording
    Listening,
    /// Speech-to-text stage running
    Transcribing,
    /// Response generation stage running
    Generating,
    /// Speech synthesis stage running
    Synthesizing,
    /// Last turn completed
    Done,
    /// Last turn failed without a usable fallback
    Errored,
}

impl PipelineState {
    /// Whether a new turn may begin from this state
    #[must_use]
    pub const fn accepts_new_turn(self) -> bool {
        matches!(self, Self::Idle | Self::Done | Self::Errored)
    }

    /// Whether a stage or recording is in flight
    #[must_use]
    pub const fn is_busy(self) -> bool {
        !self.accepts_new_turn()
    }

    /// Whether `next` is a legal successor of this state.
    ///
    /// `Errored` is reachable from `Listening`, `Transcribing` and `Generating`
    /// only; synthesis failures are always absorbed.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        match self {
            Self::Idle | Self::Done => matches!(
                next,
                Self::Listening | Self::Transcribing | Self::Idle
            ),
            Self::Listening => matches!(next, Self::Transcribing | Self::Errored | Self::Idle),
            Self::Transcribing => matches!(next, Self::Generating | Self::Errored),
            Self::Generating => matches!(next, Self::Synthesizing | Self::Errored),
            Self::Synthesizing => matches!(next, Self::Done),
            Self::Errored => matches!(next, Self::Idle | Self::Listening | Self::Transcribing),
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::Listening => "listening",
            Self::Transcribing => "transcribing",
            Self::Generating => "generating",
            Self::Synthesizing => "synthesizing",
            Self::Done => "done",
            Self::Errored => "errored",
        };
        f.write_str(label)
    }
}
