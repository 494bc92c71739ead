//! AWS Signature Version 4 for JSON service calls

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use reqwest::Url;
use sha2::{Digest, Sha256};

use super::{AwsCredentials, AwsError};

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// Headers to attach to a signed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    /// Value for `x-amz-date`
    pub amz_date: String,
    /// Value for `Authorization`
    pub authorization: String,
}

/// Sign a request for `service`.
///
/// `headers` are the extra headers that will be sent; `host` and
/// `x-amz-date` are added to the signature here.
pub fn sign_request(
    credentials: &AwsCredentials,
    service: &str,
    method: &str,
    url: &Url,
    headers: &[(&str, &str)],
    payload: &[u8],
    timestamp: DateTime<Utc>,
) -> Result<SignedHeaders, AwsError> {
    let amz_date = timestamp.format("%Y%m%dT%H%M%SZ").to_string();
    let date = timestamp.format("%Y%m%d").to_string();

    let host = match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{host}:{port}"),
        (Some(host), None) => host.to_string(),
        (None, _) => return Err(AwsError::Signing(format!("URL has no host: {url}"))),
    };

    let mut canonical_headers: Vec<(String, String)> = headers
        .iter()
        .map(|(name, value)| (name.to_ascii_lowercase(), value.trim().to_string()))
        .collect();
    canonical_headers.push(("host".to_string(), host));
    canonical_headers.push(("x-amz-date".to_string(), amz_date.clone()));
    canonical_headers.sort();

    let signed_headers = canonical_headers
        .iter()
        .map(|(name, _)| name.as_str())
        .collect::<Vec<_>>()
        .join(";");
    let header_block: String = canonical_headers
        .iter()
        .map(|(name, value)| format!("{name}:{value}\n"))
        .collect();

    let canonical_request = format!(
        "{method}\n{}\n{}\n{header_block}\n{signed_headers}\n{}",
        canonical_uri(url),
        canonical_query(url),
        hex::encode(Sha256::digest(payload)),
    );

    let scope = format!("{date}/{}/{service}/aws4_request", credentials.region);
    let string_to_sign = format!(
        "{ALGORITHM}\n{amz_date}\n{scope}\n{}",
        hex::encode(Sha256::digest(canonical_request.as_bytes()))
    );

    let key = signing_key(&credentials.secret_access_key, &date, &credentials.region, service)?;
    let signature = hex::encode(hmac(&key, string_to_sign.as_bytes())?);

    Ok(SignedHeaders {
        authorization: format!(
            "{ALGORITHM} Credential={}/{scope}, SignedHeaders={signed_headers}, Signature={signature}",
            credentials.access_key_id
        ),
        amz_date,
    })
}

/// Derive the per-day signing key
pub fn signing_key(
    secret: &str,
    date: &str,
    region: &str,
    service: &str,
) -> Result<Vec<u8>, AwsError> {
    let k_date = hmac(format!("AWS4{secret}").as_bytes(), date.as_bytes())?;
    let k_region = hmac(&k_date, region.as_bytes())?;
    let k_service = hmac(&k_region, service.as_bytes())?;
    hmac(&k_service, b"aws4_request")
}

fn hmac(key: &[u8], data: &[u8]) -> Result<Vec<u8>, AwsError> {
    let mut mac =
        HmacSha256::new_from_slice(key).map_err(|e| AwsError::Signing(e.to_string()))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

fn canonical_uri(url: &Url) -> &str {
    match url.path() {
        "" => "/",
        path => path,
    }
}

fn canonical_query(url: &Url) -> String {
    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (uri_encode(&k), uri_encode(&v)))
        .collect();
    pairs.sort();
    pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

fn uri_encode(input: &str) -> String {
    let mut encoded = String::with_capacity(input.len());
    for byte in input.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            encoded.push(char::from(byte));
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    const SECRET: &str = "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY";

    #[test]
    fn derives_published_signing_key() {
        let key = signing_key(SECRET, "20120215", "us-east-1", "iam").unwrap();
        assert_eq!(
            hex::encode(key),
            "f4780e2d9f65fa895f9c67b32ce1baf0b0d8a43505a000a1a9e090d414db404d"
        );
    }

    #[test]
    fn signs_published_list_users_request() {
        let credentials = AwsCredentials::new("AKIDEXAMPLE", SECRET, "us-east-1");
        let url = Url::parse("https://iam.amazonaws.com/?Action=ListUsers&Version=2010-05-08").unwrap();
        let timestamp = Utc.with_ymd_and_hms(2015, 8, 30, 12, 36, 0).unwrap();

        let signed = sign_request(
            &credentials,
            "iam",
            "GET",
            &url,
            &[("Content-Type", "application/x-www-form-urlencoded; charset=utf-8")],
            b"",
            timestamp,
        )
        .unwrap();

        assert_eq!(signed.amz_date, "20150830T123600Z");
        assert_eq!(
            signed.authorization,
            "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20150830/us-east-1/iam/aws4_request, \
             SignedHeaders=content-type;host;x-amz-date, \
             Signature=5d672d79c15b13162d9279b0855cfba6789a8edb4c82c400e06b5924a6f2b5d7"
        );
    }

    #[test]
    fn host_includes_explicit_port() {
        let credentials = AwsCredentials::new("AKID", SECRET, "us-east-1");
        let url = Url::parse("http://127.0.0.1:4566/").unwrap();
        let timestamp = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();

        let a = sign_request(&credentials, "transcribe", "POST", &url, &[], b"{}", timestamp).unwrap();
        let other = Url::parse("http://127.0.0.1:4567/").unwrap();
        let b = sign_request(&credentials, "transcribe", "POST", &other, &[], b"{}", timestamp).unwrap();

        assert_ne!(a.authorization, b.authorization);
    }

    #[test]
    fn query_is_sorted_and_encoded() {
        let url = Url::parse("https://example.com/?b=2&a=hello%20world").unwrap();
        assert_eq!(canonical_query(&url), "a=hello%20world&b=2");
    }
}
