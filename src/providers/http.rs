use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, error};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use super::DocumentService;
use crate::app_config::{ServiceConfig, VideoMode};
use crate::errors::ServiceError;
use crate::language_utils::TargetLanguage;
use crate::workflow::SourceFile;

/// HTTP client for the recognition service
#[derive(Debug, Clone)]
pub struct HttpDocumentService {
    /// HTTP client for making requests
    client: Client,
    /// Base URL, always ending with a slash
    base_url: Url,
    /// Tesseract language for image OCR
    ocr_language: String,
    /// Tesseract page segmentation mode
    page_segmentation_mode: String,
    /// How videos are turned into text
    video_mode: VideoMode,
}

/// Body of the video-by-URL request
#[derive(Debug, Serialize)]
struct VideoUrlRequest<'a> {
    url: &'a str,
}

/// Body of the translation request
#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    text: &'a str,
    target: &'a str,
}

/// Every endpoint answers with either `text` or `error`
#[derive(Debug, Deserialize)]
struct ServiceReply {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl HttpDocumentService {
    /// Create a client from the service configuration
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let mut base_url = Url::parse(&config.endpoint)
            .with_context(|| format!("Invalid service endpoint: {}", config.endpoint))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url,
            ocr_language: config.ocr_language.clone(),
            page_segmentation_mode: config.page_segmentation_mode.clone(),
            video_mode: config.video_mode,
        })
    }

    /// Absolute URL of `path` relative to the service base, with query parameters
    pub fn endpoint_url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, ServiceError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| ServiceError::Transport(format!("Invalid endpoint path {}: {}", path, e)))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    fn upload_form(file: &SourceFile) -> Form {
        let part = Part::bytes(file.bytes.to_vec()).file_name(file.name.clone());
        Form::new().part("file", part)
    }

    async fn send(&self, request: RequestBuilder, endpoint: &str) -> Result<String, ServiceError> {
        let response = request.send().await.map_err(|e| {
            error!("Request to {} failed: {}", endpoint, e);
            ServiceError::Transport(e.to_string())
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ServiceError::Transport(format!("Failed to read response body: {}", e)))?;
        debug!("{} answered {} ({} bytes)", endpoint, status, body.len());

        interpret_reply(status, &body)
    }
}

/// Turn a raw HTTP answer into extracted text or a service error
pub(crate) fn interpret_reply(status: StatusCode, body: &str) -> Result<String, ServiceError> {
    let reply = serde_json::from_str::<ServiceReply>(body);

    if !status.is_success() {
        // Error pages that are not JSON still count as a rejection without a message
        let message = reply.ok().and_then(|r| r.error).unwrap_or_default();
        return Err(ServiceError::Rejected(message));
    }

    let reply = reply.map_err(|e| ServiceError::Parse(e.to_string()))?;
    if let Some(message) = reply.error {
        return Err(ServiceError::Rejected(message));
    }
    reply
        .text
        .ok_or_else(|| ServiceError::Parse("response has no text field".to_string()))
}

#[async_trait]
impl DocumentService for HttpDocumentService {
    async fn extract_image(&self, file: &SourceFile) -> Result<String, ServiceError> {
        let url = self.endpoint_url(
            "upload",
            &[
                ("lang", self.ocr_language.as_str()),
                ("psm", self.page_segmentation_mode.as_str()),
            ],
        )?;
        debug!("Uploading image {} ({} bytes)", file.name, file.bytes.len());
        let request = self.client.post(url).multipart(Self::upload_form(file));
        self.send(request, "upload").await
    }

    async fn extract_video_file(&self, file: &SourceFile) -> Result<String, ServiceError> {
        let url = self.endpoint_url("upload_video", &[("mode", self.video_mode.as_str())])?;
        debug!("Uploading video {} ({} bytes)", file.name, file.bytes.len());
        let request = self.client.post(url).multipart(Self::upload_form(file));
        self.send(request, "upload_video").await
    }

    async fn extract_video_url(&self, video_url: &str) -> Result<String, ServiceError> {
        let url = self.endpoint_url("video_from_url", &[("mode", self.video_mode.as_str())])?;
        debug!("Requesting extraction for video URL {}", video_url);
        let request = self
            .client
            .post(url)
            .json(&VideoUrlRequest { url: video_url });
        self.send(request, "video_from_url").await
    }

    async fn translate(&self, text: &str, target: TargetLanguage) -> Result<String, ServiceError> {
        let url = self.endpoint_url("translate", &[])?;
        debug!("Translating {} chars to {}", text.chars().count(), target);
        let request = self.client.post(url).json(&TranslateRequest {
            text,
            target: target.code(),
        });
        self.send(request, "translate").await
    }
}
