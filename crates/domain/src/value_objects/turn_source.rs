//! Where a turn's transcript or reply came from

use std::fmt;

use serde::{Serialize, Serializer};

use crate::value_objects::ProviderId;

/// Producer of a transcript or reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnSource {
    /// Produced by the named provider (including its canned reply)
    Provider(ProviderId),
    /// Substituted from the on-device recognizer
    LocalFallback,
}

impl TurnSource {
    /// Label shown in the conversation log
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Provider(id) => id.name(),
            Self::LocalFallback => "local fallback",
        }
    }

    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::LocalFallback)
    }
}

impl fmt::Display for TurnSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for TurnSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}
