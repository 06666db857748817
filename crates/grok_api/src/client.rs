use std::path::Path;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use tracing::debug;

use crate::config::GrokApiConfig;
use crate::error::GrokApiError;
use crate::headers::{build_headers, CONTENT_TYPE_JSON};
use crate::multipart::{MultipartBody, UPLOAD_PURPOSE};
use crate::payload::GrokRequest;
use crate::response::parse_file_id;
use crate::url::{files_url, responses_url};

/// Thin async client for the files and responses endpoints.
///
/// Every method performs at most one HTTP round trip. Non-success statuses
/// come back as [`GrokApiError::Status`] with the body text intact.
#[derive(Debug)]
pub struct GrokApiClient {
    http: Client,
    config: GrokApiConfig,
}

impl GrokApiClient {
    pub fn new(config: GrokApiConfig) -> Result<Self, GrokApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &GrokApiConfig {
        &self.config
    }

    pub fn files_endpoint(&self) -> String {
        files_url(&self.config.base_url)
    }

    pub fn responses_endpoint(&self) -> String {
        responses_url(&self.config.base_url)
    }

    pub fn build_headers(&self, content_type: &str) -> Result<HeaderMap, GrokApiError> {
        let headers = build_headers(&self.config, content_type)?;
        let mut out = HeaderMap::new();
        for (key, value) in headers {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|error| {
                GrokApiError::InvalidHeader {
                    name: key.clone(),
                    reason: error.to_string(),
                }
            })?;
            let value = HeaderValue::from_str(&value).map_err(|error| {
                GrokApiError::InvalidHeader {
                    name: key.clone(),
                    reason: error.to_string(),
                }
            })?;
            out.insert(name, value);
        }
        Ok(out)
    }

    /// Builds the multipart upload request for one file's bytes.
    pub fn build_upload_request(
        &self,
        filename: &str,
        data: &[u8],
    ) -> Result<RequestBuilder, GrokApiError> {
        let body = MultipartBody::file_upload(filename, data, UPLOAD_PURPOSE);
        let headers = self.build_headers(&body.content_type())?;
        Ok(self
            .http
            .post(self.files_endpoint())
            .headers(headers)
            .body(body.into_bytes()))
    }

    /// Builds the JSON request for the responses endpoint.
    pub fn build_response_request(
        &self,
        request: &GrokRequest,
    ) -> Result<RequestBuilder, GrokApiError> {
        let headers = self.build_headers(CONTENT_TYPE_JSON)?;
        let body = serde_json::to_vec(request).map_err(|source| GrokApiError::InvalidJson {
            body: String::new(),
            source,
        })?;
        Ok(self
            .http
            .post(self.responses_endpoint())
            .headers(headers)
            .body(body))
    }

    /// Uploads one file and returns the backend-issued file id.
    pub async fn upload_file(&self, path: &Path) -> Result<String, GrokApiError> {
        let data = std::fs::read(path).map_err(|source| GrokApiError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        debug!(file = %path.display(), bytes = data.len(), "uploading file");
        let response = self.build_upload_request(&filename, &data)?.send().await?;
        let body = success_body(response).await?;
        parse_file_id(&body)
    }

    /// Sends one responses request and returns the decoded JSON body.
    pub async fn create_response(&self, request: &GrokRequest) -> Result<Value, GrokApiError> {
        debug!(
            model = %request.model,
            items = request.input.len(),
            "sending responses request"
        );
        let response = self.build_response_request(request)?.send().await?;
        let body = success_body(response).await?;
        serde_json::from_str(&body).map_err(|source| GrokApiError::InvalidJson { body, source })
    }
}

async fn success_body(response: Response) -> Result<String, GrokApiError> {
    let status = response.status();
    let bytes = response.bytes().await?;
    let body = String::from_utf8_lossy(&bytes).into_owned();
    debug!(status = status.as_u16(), bytes = bytes.len(), "received response");

    if status.is_success() {
        Ok(body)
    } else {
        Err(GrokApiError::Status { status, body })
    }
}
