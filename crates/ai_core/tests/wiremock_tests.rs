//! Integration tests for the response generators using WireMock

use std::sync::Arc;

use ai_core::{GenerationError, GenerationRequest, InferenceConfig, generator_for};
use domain::ProviderId;
use secure_config::{CRYPTO_KEY_NAME, ConfigAccessor, CredentialGate, MapConfigSource};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

// =============================================================================
// Test Helpers
// =============================================================================

fn config_for_mock(base_url: &str) -> InferenceConfig {
    InferenceConfig {
        openai_base_url: base_url.to_string(),
        gemini_base_url: base_url.to_string(),
        timeout_ms: 5000,
        ..Default::default()
    }
}

fn gate(source: MapConfigSource) -> CredentialGate {
    CredentialGate::new(Arc::new(ConfigAccessor::new(Arc::new(source))))
}

// =============================================================================
// Adapter selection
// =============================================================================

mod selection {
    use super::*;

    #[tokio::test]
    async fn openai_generator_answers_through_port() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{ "message": { "content": "Hello there" } }]
            })))
            .mount(&mock_server)
            .await;

        let generator = generator_for(
            ProviderId::OpenAiApi,
            &config_for_mock(&mock_server.uri()),
            &gate(MapConfigSource::from_iter([("OPENAI_API_KEY", "sk")])),
        )
        .unwrap()
        .unwrap();

        let reply = generator.generate(&GenerationRequest::new("hi", "Guest")).await.unwrap();
        assert_eq!(reply.text, "Hello there");
    }

    #[test]
    fn speech_providers_have_no_generator() {
        let generator = generator_for(
            ProviderId::Deepgram,
            &InferenceConfig::default(),
            &gate(MapConfigSource::new()),
        )
        .unwrap();
        assert!(generator.is_none());
    }
}

// =============================================================================
// Encrypted credentials
// =============================================================================

mod encrypted_keys {
    use super::*;

    #[tokio::test]
    async fn encrypted_key_is_decrypted_before_sending() {
        let keyed = ConfigAccessor::new(Arc::new(MapConfigSource::from_iter([(CRYPTO_KEY_NAME, "passphrase")])));
        let encrypted = keyed.cipher().encrypt("sk-secret").unwrap();

        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("authorization", "Bearer sk-secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{ "message": { "content": "ok" } }]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let source = MapConfigSource::from_iter([
            ("OPENAI_API_KEY", encrypted.as_str()),
            (CRYPTO_KEY_NAME, "passphrase"),
        ]);
        let generator = generator_for(ProviderId::OpenAiApi, &config_for_mock(&mock_server.uri()), &gate(source))
            .unwrap()
            .unwrap();

        let reply = generator.generate(&GenerationRequest::new("hi", "Guest")).await.unwrap();
        assert_eq!(reply.text, "ok");
    }

    #[tokio::test]
    async fn undecryptable_key_names_the_key() {
        let source = MapConfigSource::from_iter([("GEMINI_API_KEY", "enc:v1:not-valid")]);
        let generator = generator_for(ProviderId::Gemini, &InferenceConfig::default(), &gate(source))
            .unwrap()
            .unwrap();

        let err = generator
            .generate(&GenerationRequest::new("hi", "Guest"))
            .await
            .unwrap_err();
        match err {
            GenerationError::Decrypt(e) => assert_eq!(e.key, "GEMINI_API_KEY"),
            other => panic!("unexpected error: {other}"),
        }
    }
}

// =============================================================================
// Transport failures
// =============================================================================

mod transport {
    use super::*;

    #[tokio::test]
    async fn unreachable_server_is_connection_failure() {
        let generator = generator_for(
            ProviderId::OpenAiApi,
            &config_for_mock("http://127.0.0.1:1"),
            &gate(MapConfigSource::from_iter([("OPENAI_API_KEY", "sk")])),
        )
        .unwrap()
        .unwrap();

        let err = generator
            .generate(&GenerationRequest::new("hi", "Guest"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GenerationError::ConnectionFailed(_) | GenerationError::RequestFailed(_)
        ));
    }

    #[tokio::test]
    async fn server_error_reports_status() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let generator = generator_for(
            ProviderId::OpenAiApi,
            &config_for_mock(&mock_server.uri()),
            &gate(MapConfigSource::from_iter([("OPENAI_API_KEY", "sk")])),
        )
        .unwrap()
        .unwrap();

        let err = generator
            .generate(&GenerationRequest::new("hi", "Guest"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "OpenAI API request failed (503)");
    }
}
