//! Property-based tests for the provider catalog and preferences
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::{Preferences, ProviderId, Stage, StageOptions, VoiceDefaults};
use proptest::prelude::*;

fn voices() -> VoiceDefaults {
    VoiceDefaults {
        eleven_labs_voice_id: "default-eleven".to_string(),
        murf_tts_voice_id: "default-murf".to_string(),
    }
}

fn enabled_subset() -> impl Strategy<Value = Vec<ProviderId>> {
    proptest::sample::subsequence(ProviderId::ALL.to_vec(), 0..=ProviderId::ALL.len())
}

proptest! {
    #[test]
    fn arbitrary_records_never_select_disabled_providers(
        raw in ".*",
        enabled in enabled_subset(),
    ) {
        let options = StageOptions::from_enabled(enabled);
        let prefs = Preferences::from_stored(&raw, &options, &voices());
        for stage in Stage::ALL {
            match prefs.selection(stage) {
                Some(id) => prop_assert!(options.for_stage(stage).contains(&id)),
                None => prop_assert!(options.for_stage(stage).is_empty()),
            }
        }
        prop_assert!(!prefs.eleven_labs_voice_id.trim().is_empty());
    }

    #[test]
    fn stored_selection_survives_when_enabled(
        index in 0usize..ProviderId::ALL.len(),
        name in "[A-Za-z ]{0,16}",
    ) {
        let id = ProviderId::ALL[index];
        let field = match id.stage() {
            Stage::Stt => "sttService",
            Stage::Ai => "aiService",
            Stage::Tts => "ttsService",
        };
        let raw = serde_json::json!({ field: id.name(), "userName": name }).to_string();
        let prefs = Preferences::from_stored(&raw, &StageOptions::all(), &voices());
        prop_assert_eq!(prefs.selection(id.stage()), Some(id));
        prop_assert_eq!(prefs.user_name, name);
    }

    #[test]
    fn names_parse_back_in_any_case(index in 0usize..ProviderId::ALL.len(), upper in any::<bool>()) {
        let id = ProviderId::ALL[index];
        let name = if upper { id.name().to_uppercase() } else { id.name().to_lowercase() };
        prop_assert_eq!(ProviderId::from_name(&name), Some(id));
    }
}
