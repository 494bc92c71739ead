//! Per-provider enable flags

use std::sync::Arc;

use domain::{ProviderId, StageOptions};
use tracing::warn;

use crate::accessor::ConfigAccessor;

/// Values that switch a provider off, compared case-insensitively
const DISABLED_VALUES: [&str; 4] = ["false", "0", "no", "off"];

/// Reads `ENABLE_<PROVIDER>` flags; absent or blank means enabled
#[derive(Debug, Clone)]
pub struct ProviderFlags {
    accessor: Arc<ConfigAccessor>,
}

impl ProviderFlags {
    pub fn new(accessor: Arc<ConfigAccessor>) -> Self {
        Self { accessor }
    }

    pub fn is_enabled(&self, id: ProviderId) -> bool {
        let key = id.descriptor().enable_key;
        match self.accessor.get_trimmed(key) {
            Ok(Some(value)) => !DISABLED_VALUES
                .iter()
                .any(|off| value.eq_ignore_ascii_case(off)),
            Ok(None) => true,
            Err(e) => {
                warn!(error = %e, "Unreadable enable flag, keeping provider enabled");
                true
            },
        }
    }

    /// Enabled providers per stage, in catalog order
    pub fn stage_options(&self) -> StageOptions {
        StageOptions::from_enabled(ProviderId::ALL.into_iter().filter(|id| self.is_enabled(*id)))
    }
}
