/*!
 * Client implementations for the extraction and translation service.
 *
 * - `http`: reqwest client for the recognition service's HTTP API
 * - `mock`: in-memory service for tests and dry runs
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ServiceError;
use crate::language_utils::TargetLanguage;
use crate::workflow::SourceFile;

/// Common trait for every extraction/translation service
///
/// Each call corresponds to one request/response round trip. Success
/// yields the plain text, failure the service's error payload or a
/// transport failure.
#[async_trait]
pub trait DocumentService: Send + Sync + Debug {
    /// Recognize text in an image
    async fn extract_image(&self, file: &SourceFile) -> Result<String, ServiceError>;

    /// Transcribe or OCR an uploaded video
    async fn extract_video_file(&self, file: &SourceFile) -> Result<String, ServiceError>;

    /// Download a remote video and extract its text
    async fn extract_video_url(&self, url: &str) -> Result<String, ServiceError>;

    /// Translate `text` into `target`
    async fn translate(&self, text: &str, target: TargetLanguage) -> Result<String, ServiceError>;
}

pub mod http;
pub mod mock;

pub use self::http::HttpDocumentService;
pub use self::mock::{MockBehavior, MockService, ServiceCall};
