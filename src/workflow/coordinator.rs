/*!
 * Document workflow coordinator.
 *
 * The coordinator owns the single `DocumentWorkflow` record and is the
 * only writer. Each operation applies one transition before its external
 * call and one after it; the lock is never held across the call, so
 * overlapping operations interleave at those two points only.
 */

use log::{debug, error, info, warn};
use parking_lot::Mutex;
use std::sync::Arc;

use super::state::{
    DocumentSource, DocumentWorkflow, ExtractionResult, Operation, SourceFile, Transition,
    TranslationResult, WorkflowStatus,
};
use crate::app_config::{Config, ExportConfig, ResponsePolicy};
use crate::clipboard::Clipboard;
use crate::errors::{ExportError, ServiceError, WorkflowError};
use crate::export::{self, ExportArtifact, ExportFormat};
use crate::language_utils::TargetLanguage;
use crate::providers::DocumentService;
use crate::text::{HighlightRenderer, QuizGenerator, QuizItem};

pub const EMPTY_URL_MESSAGE: &str = "Enter a video URL first";
pub const NO_TEXT_TO_TRANSLATE_MESSAGE: &str = "No extracted text to translate";
pub const NO_TEXT_TO_COPY_MESSAGE: &str = "No text to copy";
pub const COPY_FAILED_MESSAGE: &str = "Failed to copy text";

/// State plus the counters needed to judge late responses
#[derive(Debug, Default)]
struct Ledger {
    state: DocumentWorkflow,
    /// Token of the most recently issued request
    latest_token: u64,
    /// Bumped on every applied extraction
    extraction_revision: u64,
}

impl Ledger {
    fn commit(&mut self, transition: Transition) {
        let state = std::mem::take(&mut self.state);
        self.state = state.apply(transition);
    }

    fn issue_token(&mut self) -> u64 {
        self.latest_token += 1;
        self.latest_token
    }
}

/// Coordinates extraction, translation and derived views for one document
#[derive(Debug)]
pub struct Coordinator {
    service: Arc<dyn DocumentService>,
    policy: ResponsePolicy,
    quiz: QuizGenerator,
    export_config: ExportConfig,
    ledger: Mutex<Ledger>,
}

impl Coordinator {
    /// Coordinator with default policy, quiz limits and page geometry
    pub fn new(service: Arc<dyn DocumentService>) -> Self {
        Self {
            service,
            policy: ResponsePolicy::default(),
            quiz: QuizGenerator::new(),
            export_config: ExportConfig::default(),
            ledger: Mutex::new(Ledger::default()),
        }
    }

    /// Coordinator configured from the application configuration
    pub fn with_config(service: Arc<dyn DocumentService>, config: &Config) -> Self {
        Self {
            policy: config.workflow.response_policy,
            quiz: QuizGenerator::new().max_items(config.workflow.quiz_max_items),
            export_config: config.export.clone(),
            ..Self::new(service)
        }
    }

    /// Override the race policy
    pub fn with_policy(mut self, policy: ResponsePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> ResponsePolicy {
        self.policy
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> DocumentWorkflow {
        self.ledger.lock().state.clone()
    }

    pub fn status(&self) -> WorkflowStatus {
        self.ledger.lock().state.status.clone()
    }

    /// Extract text from an image
    pub async fn submit_image(&self, file: SourceFile) -> Result<ExtractionResult, WorkflowError> {
        self.extract(DocumentSource::Image(file)).await
    }

    /// Extract text from an uploaded video
    pub async fn submit_video_file(
        &self,
        file: SourceFile,
    ) -> Result<ExtractionResult, WorkflowError> {
        self.extract(DocumentSource::VideoFile(file)).await
    }

    /// Extract text from a remote video; blank URLs are rejected without a call
    pub async fn submit_video_url(&self, url: &str) -> Result<ExtractionResult, WorkflowError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(self.reject(EMPTY_URL_MESSAGE));
        }
        self.extract(DocumentSource::VideoUrl(url.to_string())).await
    }

    /// Translate the current extraction (never a previous translation)
    pub async fn translate(
        &self,
        target: TargetLanguage,
    ) -> Result<TranslationResult, WorkflowError> {
        let (token, revision, text) = {
            let mut ledger = self.ledger.lock();
            let Some(text) = ledger.state.extracted_text().map(str::to_string) else {
                drop(ledger);
                return Err(self.reject(NO_TEXT_TO_TRANSLATE_MESSAGE));
            };
            let token = ledger.issue_token();
            ledger.commit(Transition::Started { source: None });
            (token, ledger.extraction_revision, text)
        };

        info!("Translating extracted text to {}", target.name());
        let outcome = self.service.translate(&text, target).await;

        let mut ledger = self.ledger.lock();
        if self.is_superseded(&ledger, token, Operation::Translate) {
            return self.unapplied(outcome, Operation::Translate).map(|text| TranslationResult {
                text,
                target_language: target,
            });
        }

        match outcome {
            Ok(translated) => {
                let result = TranslationResult {
                    text: translated,
                    target_language: target,
                };
                if ledger.extraction_revision != revision {
                    warn!("Discarding translation of text that has since been replaced");
                    return Ok(result);
                }
                ledger.commit(Transition::Translated(result.clone()));
                info!("Translation to {} complete", target.name());
                Ok(result)
            }
            Err(err) => Err(Self::fail(&mut ledger, err, Operation::Translate)),
        }
    }

    /// Reset everything to the initial state
    pub fn clear(&self) {
        let mut ledger = self.ledger.lock();
        // Outstanding requests become stale under LatestRequestOnly
        ledger.issue_token();
        // In-flight translations no longer have a source text
        ledger.extraction_revision += 1;
        ledger.commit(Transition::Cleared);
        debug!("Workflow cleared");
    }

    /// Build a cloze quiz from the raw extracted text
    pub fn generate_quiz(&self) -> Result<Vec<QuizItem>, WorkflowError> {
        let mut ledger = self.ledger.lock();
        let text = ledger
            .state
            .extraction
            .as_ref()
            .map(|e| e.text.clone())
            .unwrap_or_default();

        match self.quiz.generate(&text) {
            Ok(items) => {
                info!("Generated {} quiz item(s)", items.len());
                ledger.commit(Transition::QuizGenerated(items.clone()));
                Ok(items)
            }
            Err(err) => {
                let message = err.to_string();
                ledger.commit(Transition::Failed(message.clone()));
                Err(WorkflowError::InputValidation(message))
            }
        }
    }

    /// Flip quiz answer visibility, returning the new value
    pub fn toggle_answers(&self) -> bool {
        let mut ledger = self.ledger.lock();
        let visible = !ledger.state.answers_visible;
        ledger.commit(Transition::AnswersVisible(visible));
        visible
    }

    pub fn set_answers_visible(&self, visible: bool) {
        self.ledger.lock().commit(Transition::AnswersVisible(visible));
    }

    /// Set the highlight keyword
    pub fn set_keyword(&self, keyword: impl Into<String>) {
        self.ledger.lock().commit(Transition::KeywordChanged(keyword.into()));
    }

    /// Text currently in view
    pub fn display_text(&self) -> Option<String> {
        self.ledger.lock().state.display_text().map(str::to_string)
    }

    /// Display text rendered as HTML with the keyword highlighted
    pub fn highlighted_view(&self) -> Option<String> {
        let ledger = self.ledger.lock();
        let text = ledger.state.display_text()?;
        Some(HighlightRenderer::new(&ledger.state.keyword).render(text))
    }

    /// Export the text in view; refused while nothing has been extracted
    pub fn export(&self, format: ExportFormat) -> Result<ExportArtifact, ExportError> {
        let (text, translated) = {
            let ledger = self.ledger.lock();
            if !ledger.state.can_export() {
                return Err(ExportError::NoText);
            }
            (
                ledger.state.display_text().unwrap_or_default().to_string(),
                ledger.state.is_translated(),
            )
        };

        let artifact = export::export_text(format, &text, translated, &self.export_config)?;
        info!("Prepared {} ({} bytes)", artifact.file_name, artifact.bytes.len());
        Ok(artifact)
    }

    /// Copy the text in view to `clipboard`
    pub fn copy_text(&self, clipboard: &mut dyn Clipboard) -> Result<(), WorkflowError> {
        let Some(text) = self.display_text().filter(|text| !text.is_empty()) else {
            return Err(self.reject(NO_TEXT_TO_COPY_MESSAGE));
        };

        clipboard.set_text(&text).map_err(|err| {
            error!("Copy failed: {}", err);
            self.ledger
                .lock()
                .commit(Transition::Failed(COPY_FAILED_MESSAGE.to_string()));
            WorkflowError::Clipboard(COPY_FAILED_MESSAGE.to_string())
        })
    }

    async fn extract(&self, source: DocumentSource) -> Result<ExtractionResult, WorkflowError> {
        let operation = Operation::for_source(&source);
        let source_description = source.describe();

        let token = {
            let mut ledger = self.ledger.lock();
            let token = ledger.issue_token();
            ledger.commit(Transition::Started {
                source: Some(source.clone()),
            });
            token
        };

        info!("Starting {} ({})", operation, source_description);
        let outcome = match &source {
            DocumentSource::Image(file) => self.service.extract_image(file).await,
            DocumentSource::VideoFile(file) => self.service.extract_video_file(file).await,
            DocumentSource::VideoUrl(url) => self.service.extract_video_url(url).await,
        };

        let mut ledger = self.ledger.lock();
        if self.is_superseded(&ledger, token, operation) {
            return self.unapplied(outcome, operation).map(|text| ExtractionResult {
                text,
                source_description,
            });
        }

        match outcome {
            Ok(text) => {
                let result = ExtractionResult {
                    text,
                    source_description,
                };
                ledger.extraction_revision += 1;
                ledger.commit(Transition::Extracted(result.clone()));
                info!(
                    "{} complete: {} characters",
                    operation,
                    result.text.chars().count()
                );
                Ok(result)
            }
            Err(err) => Err(Self::fail(&mut ledger, err, operation)),
        }
    }

    /// Record an input validation failure; no external call is made
    fn reject(&self, message: &str) -> WorkflowError {
        warn!("{}", message);
        self.ledger
            .lock()
            .commit(Transition::Failed(message.to_string()));
        WorkflowError::InputValidation(message.to_string())
    }

    fn fail(ledger: &mut Ledger, err: ServiceError, operation: Operation) -> WorkflowError {
        match &err {
            ServiceError::Rejected(_) => warn!("{} rejected by service: {}", operation, err),
            _ => error!("{} failed: {}", operation, err),
        }
        let failure = WorkflowError::from_service(err, operation.fallback_message());
        ledger.commit(Transition::Failed(failure.user_message()));
        failure
    }

    fn is_superseded(&self, ledger: &Ledger, token: u64, operation: Operation) -> bool {
        let superseded =
            self.policy == ResponsePolicy::LatestRequestOnly && token != ledger.latest_token;
        if superseded {
            warn!(
                "Discarding {} response for request #{} (latest is #{})",
                operation, token, ledger.latest_token
            );
        }
        superseded
    }

    /// Outcome of a discarded response, reported to the caller but never applied
    fn unapplied(
        &self,
        outcome: Result<String, ServiceError>,
        operation: Operation,
    ) -> Result<String, WorkflowError> {
        outcome.map_err(|err| WorkflowError::from_service(err, operation.fallback_message()))
    }
}
