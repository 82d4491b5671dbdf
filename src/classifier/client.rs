// SPDX-License-Identifier: MPL-2.0
//! HTTP client for the inference service.

use super::types::{
    ClassificationResult, ModelInfo, ModelInfoResponse, TestPrediction, TestPredictionResponse,
    UploadResponse,
};
use crate::upload::UploadedImage;
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;

const MODEL_INFO_PATH: &str = "/api/model-info";
const UPLOAD_PATH: &str = "/api/upload";
const TEST_PREDICTION_PATH: &str = "/api/test-prediction";

/// Multipart field carrying the image in `POST /api/upload`.
pub const UPLOAD_FIELD: &str = "file";

/// Errors that can occur while talking to the inference service.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced a response (connection refused, timeout, ...).
    Transport(String),
    /// The service answered with a non-success status and no usable body.
    Status(u16),
    /// The body could not be decoded or lacks required fields.
    InvalidResponse(String),
    /// The service reported `success: false`.
    Rejected(String),
}

impl ApiError {
    /// Returns the i18n message key for this error type.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            ApiError::Transport(_) => "error-api-transport",
            ApiError::Status(_) => "error-api-status",
            ApiError::InvalidResponse(_) => "error-api-invalid-response",
            ApiError::Rejected(_) => "error-api-rejected",
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "{msg}"),
            ApiError::Status(code) => write!(f, "HTTP status {code}"),
            ApiError::InvalidResponse(msg) => write!(f, "invalid response: {msg}"),
            ApiError::Rejected(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::InvalidResponse(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// Client for the three endpoints of the inference service.
///
/// Cheap to clone: the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Builds a client for the service at `base_url` (e.g. `http://127.0.0.1:5000`).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("CifarLens/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetches model status and class metadata.
    pub async fn model_info(&self) -> Result<ModelInfo, ApiError> {
        let url = self.endpoint(MODEL_INFO_PATH);
        tracing::debug!(%url, "fetching model info");
        let response = self.http.get(&url).send().await?;
        decode::<ModelInfoResponse>(response)
            .await?
            .into_model_info()
    }

    /// Checks that the service answers at all.
    ///
    /// Any HTTP response counts as reachable, error statuses included; only
    /// transport failures are reported.
    pub async fn ping(&self) -> Result<(), ApiError> {
        let response = self.http.get(self.endpoint(MODEL_INFO_PATH)).send().await?;
        if !response.status().is_success() {
            tracing::debug!(status = response.status().as_u16(), "service answered with an error status");
        }
        Ok(())
    }

    /// Uploads an image and returns the classification.
    pub async fn classify(&self, image: &UploadedImage) -> Result<ClassificationResult, ApiError> {
        let url = self.endpoint(UPLOAD_PATH);
        tracing::debug!(%url, file = %image.file_name(), size = image.len(), "uploading image");

        let part = reqwest::multipart::Part::bytes(image.bytes().to_vec())
            .file_name(image.file_name().to_string())
            .mime_str(image.mime_type())?;
        let form = reqwest::multipart::Form::new().part(UPLOAD_FIELD, part);

        let response = self.http.post(&url).multipart(form).send().await?;
        decode::<UploadResponse>(response).await?.into_result()
    }

    /// Requests a synthetic prediction that does not depend on any image.
    pub async fn test_prediction(&self) -> Result<TestPrediction, ApiError> {
        let url = self.endpoint(TEST_PREDICTION_PATH);
        tracing::debug!(%url, "requesting test prediction");
        let response = self.http.get(&url).send().await?;
        decode::<TestPredictionResponse>(response)
            .await?
            .into_prediction()
    }

    /// Downloads a sample image from an arbitrary URL.
    pub async fn fetch_sample(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        tracing::debug!(%url, "downloading sample image");
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status().as_u16()));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

/// Decodes a JSON body.
///
/// Error statuses still carry a JSON body with `success: false` and an
/// `error` message, so the body is decoded first and the status is only
/// reported when the body is unusable.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.bytes().await?;
    match serde_json::from_slice::<T>(&body) {
        Ok(value) => Ok(value),
        Err(_) if !status.is_success() => Err(ApiError::Status(status.as_u16())),
        Err(err) => Err(ApiError::InvalidResponse(err.to_string())),
    }
}
