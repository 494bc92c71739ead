//! AWS Transcribe batch adapter
//!
//! Uploads the recording to S3, starts a transcription job that writes its
//! output back into the same bucket, polls the job and reads the transcript.
//! Each step's failure is reported with the step that failed.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use domain::ProviderId;
use secure_config::CredentialGate;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::{ProviderContext, ensure_audio};
use crate::aws::{
    AwsCredentials, MediaLocation, S3ObjectStore, TRANSCRIBE_BUCKET, TranscribeJobClient,
    TranscriptionJobRequest,
};
use crate::config::TranscribeConfig;
use crate::error::TranscriptionError;
use crate::http::text_at;
use crate::ports::{ObjectStore, SpeechToText, TranscriptionJobs};
use crate::types::{AudioPayload, Transcription};

const DEFAULT_FAILURE: &str = "AWS Transcribe job failed.";

pub struct AwsTranscribeProvider {
    gate: CredentialGate,
    config: TranscribeConfig,
    language: String,
    store: Arc<dyn ObjectStore>,
    jobs: Arc<dyn TranscriptionJobs>,
}

impl std::fmt::Debug for AwsTranscribeProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsTranscribeProvider")
            .field("config", &self.config)
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

fn random_token(len: usize) -> String {
    Uuid::new_v4().simple().to_string().chars().take(len).collect()
}

impl AwsTranscribeProvider {
    /// Adapter over explicit storage and job clients
    pub fn new(
        ctx: &ProviderContext,
        store: Arc<dyn ObjectStore>,
        jobs: Arc<dyn TranscriptionJobs>,
    ) -> Self {
        Self {
            gate: ctx.gate().clone(),
            config: ctx.config().transcribe.clone(),
            language: ctx.config().language.clone(),
            store,
            jobs,
        }
    }

    /// Adapter over S3 and the Transcribe JSON API
    pub fn with_aws_clients(ctx: &ProviderContext) -> Self {
        let transcribe = &ctx.config().transcribe;
        let store = transcribe
            .s3_endpoint
            .as_ref()
            .map_or_else(S3ObjectStore::new, S3ObjectStore::with_endpoint);
        let jobs = TranscribeJobClient::new(ctx.client().clone(), transcribe.endpoint.clone());
        Self::new(ctx, Arc::new(store), Arc::new(jobs))
    }

    async fn read_transcript(
        &self,
        credentials: &AwsCredentials,
        bucket: &str,
        key: &str,
    ) -> Result<Transcription, TranscriptionError> {
        let fetch_error = |detail: String| TranscriptionError::TranscriptFetch {
            location: format!("s3://{bucket}/{key}"),
            detail,
        };

        let body = self
            .store
            .get_object(credentials, bucket, key)
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        let value: Value = if body.is_empty() {
            Value::Object(serde_json::Map::new())
        } else {
            serde_json::from_slice(&body).map_err(|e| fetch_error(e.to_string()))?
        };

        Ok(Transcription::new(text_at(&value, "/results/transcripts/0/transcript")))
    }
}

#[async_trait]
impl SpeechToText for AwsTranscribeProvider {
    fn provider(&self) -> ProviderId {
        ProviderId::AwsTranscribe
    }

    #[instrument(skip(self, audio), fields(audio_size = audio.len()))]
    async fn transcribe(&self, audio: &AudioPayload) -> Result<Transcription, TranscriptionError> {
        let resolved = self.gate.resolve(self.provider().descriptor())?;
        ensure_audio(audio)?;
        let credentials = AwsCredentials::from_resolved(&resolved);
        let bucket = resolved.get(TRANSCRIBE_BUCKET);
        let prefix = self.config.normalized_prefix();
        let format = audio.format();

        let media_key = format!(
            "{prefix}/{}-{}.{}",
            Utc::now().timestamp_millis(),
            random_token(10),
            format.extension()
        );
        self.store
            .put_object(
                &credentials,
                bucket,
                &media_key,
                audio.bytes(),
                audio.content_type(format.mime_type()),
            )
            .await
            .map_err(|e| TranscriptionError::Upload(e.to_string()))?;

        let job_name = format!(
            "frontend-transcribe-{}-{}",
            Utc::now().timestamp_millis(),
            random_token(6)
        );
        let output_key = format!("{prefix}/transcripts/{job_name}.json");
        let request = TranscriptionJobRequest {
            job_name: job_name.clone(),
            language_code: self.language.clone(),
            media_format: format.extension().to_string(),
            media: MediaLocation {
                media_file_uri: format!("s3://{bucket}/{media_key}"),
            },
            output_bucket_name: bucket.to_string(),
            output_key: output_key.clone(),
        };
        self.jobs
            .start_job(&credentials, &request)
            .await
            .map_err(|e| TranscriptionError::JobStart(e.to_string()))?;
        info!(job = %job_name, "Started transcription job");

        let interval = Duration::from_millis(self.config.poll_interval_ms);
        let mut last_status = None;
        for attempt in 1..=self.config.max_poll_attempts {
            tokio::time::sleep(interval).await;

            let snapshot = self
                .jobs
                .job_status(&credentials, &job_name)
                .await
                .map_err(|e| TranscriptionError::JobStatus(e.to_string()))?;
            debug!(attempt, status = %snapshot.status, "Polled transcription job");

            if snapshot.is_completed() {
                return self.read_transcript(&credentials, bucket, &output_key).await;
            }
            if snapshot.is_failed() {
                return Err(TranscriptionError::JobFailed(
                    snapshot
                        .failure_reason
                        .unwrap_or_else(|| DEFAULT_FAILURE.to_string()),
                ));
            }
            if !snapshot.status.is_empty() {
                last_status = Some(snapshot.status);
            }
        }

        warn!(job = %job_name, ?last_status, "Transcription job did not finish in time");
        Err(TranscriptionError::Timeout { last_status })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_tokens_have_requested_length() {
        assert_eq!(random_token(6).len(), 6);
        assert_eq!(random_token(10).len(), 10);
        assert!(random_token(6).chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
