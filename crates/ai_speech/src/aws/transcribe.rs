//! AWS Transcribe JSON API client

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument};

use super::signing::sign_request;
use super::{AwsCredentials, AwsError, JobSnapshot, TranscriptionJobRequest};
use crate::ports::TranscriptionJobs;

const SERVICE: &str = "transcribe";
const CONTENT_TYPE: &str = "application/x-amz-json-1.1";

/// Signed client for `StartTranscriptionJob` / `GetTranscriptionJob`
#[derive(Debug, Clone)]
pub struct TranscribeJobClient {
    client: Client,
    endpoint: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GetJobResponse {
    #[serde(rename = "TranscriptionJob")]
    job: Option<JobBody>,
}

#[derive(Debug, Default, Deserialize)]
struct JobBody {
    #[serde(rename = "TranscriptionJobStatus", default)]
    status: Option<String>,
    #[serde(rename = "FailureReason", default)]
    failure_reason: Option<String>,
}

/// AWS JSON protocol error body; the message key casing varies by service
#[derive(Debug, Deserialize)]
struct ServiceError {
    #[serde(rename = "__type", default)]
    kind: Option<String>,
    #[serde(alias = "Message", default)]
    message: Option<String>,
}

impl TranscribeJobClient {
    /// Client for the regional endpoint, or `endpoint` when set
    pub fn new(client: Client, endpoint: Option<String>) -> Self {
        Self { client, endpoint }
    }

    fn url(&self, region: &str) -> Result<Url, AwsError> {
        let raw = self
            .endpoint
            .clone()
            .unwrap_or_else(|| format!("https://transcribe.{region}.amazonaws.com/"));
        Url::parse(&raw).map_err(|e| AwsError::Signing(format!("invalid endpoint '{raw}': {e}")))
    }

    async fn call(
        &self,
        credentials: &AwsCredentials,
        target: &str,
        body: serde_json::Value,
    ) -> Result<serde_json::Value, AwsError> {
        let url = self.url(&credentials.region)?;
        let payload = serde_json::to_vec(&body).map_err(|e| AwsError::InvalidResponse(e.to_string()))?;
        let signed = sign_request(
            credentials,
            SERVICE,
            "POST",
            &url,
            &[("content-type", CONTENT_TYPE), ("x-amz-target", target)],
            &payload,
            Utc::now(),
        )?;

        let response = self
            .client
            .post(url)
            .header("content-type", CONTENT_TYPE)
            .header("x-amz-target", target)
            .header("x-amz-date", signed.amz_date)
            .header("authorization", signed.authorization)
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(AwsError::Http {
                status: status.as_u16(),
                message: service_error_message(&text),
            });
        }

        serde_json::from_str(&text).map_err(|e| AwsError::InvalidResponse(e.to_string()))
    }
}

pub(crate) fn service_error_message(body: &str) -> String {
    match serde_json::from_str::<ServiceError>(body) {
        Ok(ServiceError {
            message: Some(message),
            ..
        }) => message,
        Ok(ServiceError {
            kind: Some(kind), ..
        }) => kind.rsplit('#').next().unwrap_or(&kind).to_string(),
        _ if body.trim().is_empty() => "unknown error".to_string(),
        _ => body.trim().to_string(),
    }
}

#[async_trait]
impl TranscriptionJobs for TranscribeJobClient {
    #[instrument(skip(self, credentials, request), fields(job = %request.job_name))]
    async fn start_job(
        &self,
        credentials: &AwsCredentials,
        request: &TranscriptionJobRequest,
    ) -> Result<(), AwsError> {
        let body = serde_json::to_value(request).map_err(|e| AwsError::InvalidResponse(e.to_string()))?;
        self.call(credentials, "Transcribe.StartTranscriptionJob", body)
            .await?;
        debug!("Transcription job started");
        Ok(())
    }

    #[instrument(skip(self, credentials))]
    async fn job_status(
        &self,
        credentials: &AwsCredentials,
        job_name: &str,
    ) -> Result<JobSnapshot, AwsError> {
        let value = self
            .call(
                credentials,
                "Transcribe.GetTranscriptionJob",
                json!({ "TranscriptionJobName": job_name }),
            )
            .await?;

        let response: GetJobResponse =
            serde_json::from_value(value).map_err(|e| AwsError::InvalidResponse(e.to_string()))?;
        let job = response.job.unwrap_or_default();

        Ok(JobSnapshot {
            status: job.status.unwrap_or_default(),
            failure_reason: job.failure_reason.filter(|r| !r.trim().is_empty()),
        })
    }
}
