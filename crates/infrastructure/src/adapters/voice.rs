//! Local speech through an external command such as `espeak` or `say`

use application::LocalVoice;
use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Speaks text with a local program; without one the text is only logged.
///
/// The text is passed as the last argument.
#[derive(Debug, Clone, Default)]
pub struct CommandVoice {
    program: Option<String>,
    args: Vec<String>,
}

impl CommandVoice {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: Some(program.into()),
            args,
        }
    }

    /// Voice that only logs what it would say
    pub fn silent() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LocalVoice for CommandVoice {
    async fn speak(&self, text: &str) {
        let Some(program) = &self.program else {
            info!(text, "Local speech");
            return;
        };

        match Command::new(program).args(&self.args).arg(text).status().await {
            Ok(status) if status.success() => debug!(program, "Local speech played"),
            Ok(status) => warn!(program, %status, "Local speech command failed"),
            Err(e) => warn!(program, error = %e, "Local speech command could not run"),
        }
    }
}
