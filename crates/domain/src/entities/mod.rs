//! Domain entities

mod conversation_log;
mod conversation_turn;
mod preferences;
mod provider_descriptor;

pub use conversation_log::{ConversationLog, GREETING, LogEntry, MessageRole, SYSTEM_SOURCE};
pub use conversation_turn::ConversationTurn;
pub use preferences::{DEFAULT_USER_NAME, PREFERENCES_STORAGE_KEY, Preferences, VoiceDefaults};
pub use provider_descriptor::{CATALOG, ProviderDescriptor, StageOptions};
