//! Conversation log entity

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Source label of entries written by the pipeline itself
pub const SYSTEM_SOURCE: &str = "System";

/// First entry of every fresh log
pub const GREETING: &str =
    "Choose your STT, AI and TTS providers, then click Start Recording to begin.";

/// Role of the message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message from the user
    User,
    /// Message from the assistant (including system notices)
    Assistant,
}

/// A single entry in the conversation log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Role of the sender
    pub role: MessageRole,
    /// Entry text
    pub content: String,
    /// Provider label, `local fallback` or `System`
    pub source: String,
    /// Local wall-clock time the entry was appended
    pub time: DateTime<Local>,
}

impl LogEntry {
    fn new(role: MessageRole, content: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            source: source.into(),
            time: Local::now(),
        }
    }

    /// Whether the pipeline wrote this entry as a notice
    #[must_use]
    pub fn is_system(&self) -> bool {
        self.role == MessageRole::Assistant && self.source == SYSTEM_SOURCE
    }
}

/// Append-only log of a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationLog {
    entries: Vec<LogEntry>,
}

impl ConversationLog {
    /// A log holding only the greeting
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: vec![LogEntry::new(MessageRole::Assistant, GREETING, SYSTEM_SOURCE)],
        }
    }

    pub fn push_user(&mut self, content: impl Into<String>, source: impl Into<String>) {
        self.entries.push(LogEntry::new(MessageRole::User, content, source));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>, source: impl Into<String>) {
        self.entries
            .push(LogEntry::new(MessageRole::Assistant, content, source));
    }

    /// Append a pipeline notice
    pub fn push_system(&mut self, content: impl Into<String>) {
        self.entries
            .push(LogEntry::new(MessageRole::Assistant, content, SYSTEM_SOURCE));
    }

    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries written after the first `offset`
    #[must_use]
    pub fn since(&self, offset: usize) -> &[LogEntry] {
        self.entries.get(offset..).unwrap_or_default()
    }
}

impl Default for ConversationLog {
    fn default() -> Self {
        Self::new()
    }
}
