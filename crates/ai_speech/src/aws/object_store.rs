//! S3 object store backed by `rust-s3`

use async_trait::async_trait;
use bytes::Bytes;
use s3::creds::Credentials;
use s3::{Bucket, Region};
use tracing::{debug, instrument};

use super::{AwsCredentials, AwsError};
use crate::ports::ObjectStore;

/// Object store talking to S3 or an S3-compatible endpoint
#[derive(Debug, Clone, Default)]
pub struct S3ObjectStore {
    endpoint: Option<String>,
}

impl S3ObjectStore {
    /// Store using the regional AWS endpoint
    pub fn new() -> Self {
        Self::default()
    }

    /// Store using a custom endpoint with path-style addressing
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: Some(endpoint.into()),
        }
    }

    fn bucket(&self, credentials: &AwsCredentials, name: &str) -> Result<Box<Bucket>, AwsError> {
        let creds = Credentials::new(
            Some(credentials.access_key_id.as_str()),
            Some(credentials.secret_access_key.as_str()),
            None,
            None,
            None,
        )
        .map_err(|e| AwsError::Storage(e.to_string()))?;

        let region = match &self.endpoint {
            Some(endpoint) => Region::Custom {
                region: credentials.region.clone(),
                endpoint: endpoint.clone(),
            },
            None => credentials
                .region
                .parse::<Region>()
                .map_err(|e| AwsError::Storage(format!("invalid region: {e}")))?,
        };

        let bucket = Bucket::new(name, region, creds).map_err(|e| AwsError::Storage(e.to_string()))?;
        Ok(if self.endpoint.is_some() {
            bucket.with_path_style()
        } else {
            bucket
        })
    }
}

fn check_status(status: u16, body: &[u8]) -> Result<(), AwsError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(AwsError::Http {
            status,
            message: String::from_utf8_lossy(body).trim().to_string(),
        })
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    #[instrument(skip(self, credentials, body), fields(size = body.len()))]
    async fn put_object(
        &self,
        credentials: &AwsCredentials,
        bucket: &str,
        key: &str,
        body: &[u8],
        content_type: &str,
    ) -> Result<(), AwsError> {
        let response = self
            .bucket(credentials, bucket)?
            .put_object_with_content_type(key, body, content_type)
            .await
            .map_err(|e| AwsError::Storage(e.to_string()))?;

        check_status(response.status_code(), response.as_slice())?;
        debug!("Uploaded media object");
        Ok(())
    }

    #[instrument(skip(self, credentials))]
    async fn get_object(
        &self,
        credentials: &AwsCredentials,
        bucket: &str,
        key: &str,
    ) -> Result<Bytes, AwsError> {
        let response = self
            .bucket(credentials, bucket)?
            .get_object(key)
            .await
            .map_err(|e| AwsError::Storage(e.to_string()))?;

        check_status(response.status_code(), response.as_slice())?;
        Ok(Bytes::copy_from_slice(response.as_slice()))
    }
}
