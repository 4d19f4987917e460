/*!
 * Mock service implementation for testing.
 *
 * This module provides a mock service that simulates different behaviors:
 * - `MockService::working()` - Always succeeds with canned text
 * - `MockService::failing()` - Always answers with an error payload
 * - `MockService::offline()` - Always fails at the transport layer
 * - `MockService::scripted()` - Replays queued replies, optionally held
 *   back until the test releases them
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::oneshot;

use super::DocumentService;
use crate::errors::ServiceError;
use crate::language_utils::TargetLanguage;
use crate::workflow::SourceFile;

/// Text returned by a working mock for every extraction
pub const DEFAULT_EXTRACTED_TEXT: &str = "The mitochondria is the powerhouse of the cell. \
Photosynthesis converts sunlight into chemical energy inside chloroplasts. \
Water boils at one hundred degrees Celsius at sea level.";

/// A call received by the mock, in arrival order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceCall {
    ExtractImage { name: String },
    ExtractVideoFile { name: String },
    ExtractVideoUrl { url: String },
    Translate { text: String, target: TargetLanguage },
}

/// Behavior mode for the mock service
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds
    Working,
    /// Always answers with an error payload carrying a message
    Failing,
    /// Answers with an error payload that has no message
    SilentFailure,
    /// Never reaches the service
    Offline,
    /// Succeeds with empty text
    Empty,
    /// Succeeds after a delay
    Slow { delay_ms: u64 },
    /// Replays queued replies, falling back to `Working` when the queue is empty
    Scripted,
}

/// A queued reply, optionally held until its gate is released
#[derive(Debug)]
struct ScriptedReply {
    result: Result<String, ServiceError>,
    gate: Option<oneshot::Receiver<()>>,
}

/// Mock service for exercising the workflow without a network
#[derive(Debug, Clone)]
pub struct MockService {
    /// Behavior mode
    behavior: MockBehavior,
    /// Text returned by successful extractions
    extracted_text: String,
    /// Every call received, shared between clones
    calls: Arc<Mutex<Vec<ServiceCall>>>,
    /// Replies for `Scripted` mode
    script: Arc<Mutex<VecDeque<ScriptedReply>>>,
}

impl MockService {
    /// Create a new mock service with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            extracted_text: DEFAULT_EXTRACTED_TEXT.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
            script: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Create a working mock service that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock that always answers with an error payload
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock whose error payloads carry no message
    pub fn silent_failure() -> Self {
        Self::new(MockBehavior::SilentFailure)
    }

    /// Create a mock that fails at the transport layer
    pub fn offline() -> Self {
        Self::new(MockBehavior::Offline)
    }

    /// Create a mock that returns empty text
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Create a mock that answers after `delay_ms`
    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Create a mock that replays queued replies
    pub fn scripted() -> Self {
        Self::new(MockBehavior::Scripted)
    }

    /// Set the text returned by successful extractions
    pub fn with_extracted_text(mut self, text: impl Into<String>) -> Self {
        self.extracted_text = text.into();
        self
    }

    /// Queue a reply that is returned immediately
    pub fn push_reply(&self, result: Result<String, ServiceError>) {
        self.script.lock().push_back(ScriptedReply { result, gate: None });
    }

    /// Queue a reply that is held until the returned sender fires (or is dropped)
    pub fn push_gated_reply(&self, result: Result<String, ServiceError>) -> oneshot::Sender<()> {
        let (release, gate) = oneshot::channel();
        self.script.lock().push_back(ScriptedReply {
            result,
            gate: Some(gate),
        });
        release
    }

    /// Number of calls received so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Every call received so far
    pub fn calls(&self) -> Vec<ServiceCall> {
        self.calls.lock().clone()
    }

    /// Translated text produced by a working mock
    pub fn translated(text: &str, target: TargetLanguage) -> String {
        format!("[TRANSLATED to {}] {}", target.code(), text)
    }

    async fn respond(&self, call: ServiceCall) -> Result<String, ServiceError> {
        let success = match &call {
            ServiceCall::Translate { text, target } => Self::translated(text, *target),
            _ => self.extracted_text.clone(),
        };
        self.calls.lock().push(call);

        match self.behavior {
            MockBehavior::Working => Ok(success),

            MockBehavior::Failing => {
                Err(ServiceError::Rejected("Simulated service failure".to_string()))
            }

            MockBehavior::SilentFailure => Err(ServiceError::Rejected(String::new())),

            MockBehavior::Offline => Err(ServiceError::Transport(
                "Simulated connection refused".to_string(),
            )),

            MockBehavior::Empty => Ok(String::new()),

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
                Ok(success)
            }

            MockBehavior::Scripted => {
                // Pop before awaiting so replies map to calls in arrival order
                let next = self.script.lock().pop_front();
                match next {
                    Some(ScriptedReply { result, gate }) => {
                        if let Some(gate) = gate {
                            let _ = gate.await;
                        }
                        result
                    }
                    None => Ok(success),
                }
            }
        }
    }
}

#[async_trait]
impl DocumentService for MockService {
    async fn extract_image(&self, file: &SourceFile) -> Result<String, ServiceError> {
        self.respond(ServiceCall::ExtractImage {
            name: file.name.clone(),
        })
        .await
    }

    async fn extract_video_file(&self, file: &SourceFile) -> Result<String, ServiceError> {
        self.respond(ServiceCall::ExtractVideoFile {
            name: file.name.clone(),
        })
        .await
    }

    async fn extract_video_url(&self, url: &str) -> Result<String, ServiceError> {
        self.respond(ServiceCall::ExtractVideoUrl {
            url: url.to_string(),
        })
        .await
    }

    async fn translate(&self, text: &str, target: TargetLanguage) -> Result<String, ServiceError> {
        self.respond(ServiceCall::Translate {
            text: text.to_string(),
            target,
        })
        .await
    }
}
