/*!
 * Workflow state record and its transitions.
 *
 * `DocumentWorkflow` is replaced as a whole on every transition through
 * [`DocumentWorkflow::apply`]; nothing else mutates it.
 */

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::language_utils::TargetLanguage;
use crate::text::QuizItem;

/// An uploaded file: its display name and raw payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub bytes: Bytes,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

/// The document currently selected for extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    Image(SourceFile),
    VideoFile(SourceFile),
    VideoUrl(String),
}

impl DocumentSource {
    /// Human-readable provenance recorded with the extraction
    pub fn describe(&self) -> String {
        match self {
            Self::Image(file) => format!("Image file: {}", file.name),
            Self::VideoFile(file) => format!("Video file: {}", file.name),
            Self::VideoUrl(url) => format!("Video URL: {}", url),
        }
    }
}

/// Text returned by a successful extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub text: String,
    pub source_description: String,
}

/// Translation of the current extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub text: String,
    pub target_language: TargetLanguage,
}

/// Loading/error indicator
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WorkflowStatus {
    #[default]
    Idle,
    Loading,
    Error(String),
}

impl WorkflowStatus {
    /// Message of an `Error` status
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

/// External operations, used for logging and fallback messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ExtractImage,
    ExtractVideoFile,
    ExtractVideoUrl,
    Translate,
}

impl Operation {
    /// Operation that extracts text from `source`
    pub fn for_source(source: &DocumentSource) -> Self {
        match source {
            DocumentSource::Image(_) => Self::ExtractImage,
            DocumentSource::VideoFile(_) => Self::ExtractVideoFile,
            DocumentSource::VideoUrl(_) => Self::ExtractVideoUrl,
        }
    }

    /// Message shown when the service gives no usable error message
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::ExtractImage => "Failed to process image",
            Self::ExtractVideoFile => "Failed to process video file",
            Self::ExtractVideoUrl => "Failed to process video URL",
            Self::Translate => "Failed to translate text",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::ExtractImage => "image extraction",
            Self::ExtractVideoFile => "video file extraction",
            Self::ExtractVideoUrl => "video URL extraction",
            Self::Translate => "translation",
        };
        write!(f, "{}", label)
    }
}

/// Everything that can happen to the workflow state
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// An external call was issued; a submit also selects its source
    Started { source: Option<DocumentSource> },
    /// Extraction succeeded
    Extracted(ExtractionResult),
    /// Translation succeeded
    Translated(TranslationResult),
    /// An operation failed with a user-facing message
    Failed(String),
    /// A quiz was generated from the current extraction
    QuizGenerated(Vec<QuizItem>),
    /// Show or hide quiz answers
    AnswersVisible(bool),
    /// Highlight keyword changed
    KeywordChanged(String),
    /// Back to the initial state
    Cleared,
}

/// Complete state of the single in-memory document
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentWorkflow {
    pub source: Option<DocumentSource>,
    pub extraction: Option<ExtractionResult>,
    pub translation: Option<TranslationResult>,
    pub quiz: Vec<QuizItem>,
    pub answers_visible: bool,
    pub keyword: String,
    pub status: WorkflowStatus,
}

impl DocumentWorkflow {
    /// Initial empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce the state that follows `transition`
    pub fn apply(self, transition: Transition) -> Self {
        match transition {
            Transition::Started { source } => Self {
                source: source.or(self.source),
                status: WorkflowStatus::Loading,
                ..self
            },
            // Translation and quiz refer to the old text
            Transition::Extracted(extraction) => Self {
                extraction: Some(extraction),
                translation: None,
                quiz: Vec::new(),
                answers_visible: false,
                status: WorkflowStatus::Idle,
                ..self
            },
            // A translation needs the extraction it was computed from
            Transition::Translated(_) if self.extraction.is_none() => self,
            Transition::Translated(translation) => Self {
                translation: Some(translation),
                status: WorkflowStatus::Idle,
                ..self
            },
            Transition::Failed(message) => Self {
                status: WorkflowStatus::Error(message),
                ..self
            },
            // Quiz generation is local; an outstanding request keeps `Loading`
            Transition::QuizGenerated(quiz) => Self {
                quiz,
                answers_visible: false,
                status: if self.is_loading() {
                    WorkflowStatus::Loading
                } else {
                    WorkflowStatus::Idle
                },
                ..self
            },
            Transition::AnswersVisible(answers_visible) => Self {
                answers_visible,
                ..self
            },
            Transition::KeywordChanged(keyword) => Self { keyword, ..self },
            Transition::Cleared => Self::default(),
        }
    }

    /// Text currently in view: the translation if present, else the extraction
    pub fn display_text(&self) -> Option<&str> {
        self.translation
            .as_ref()
            .map(|t| t.text.as_str())
            .or_else(|| self.extraction.as_ref().map(|e| e.text.as_str()))
    }

    /// Whether the text in view is a translation
    pub fn is_translated(&self) -> bool {
        self.translation.is_some()
    }

    /// Extracted text, if any non-blank text exists
    pub fn extracted_text(&self) -> Option<&str> {
        self.extraction
            .as_ref()
            .map(|e| e.text.as_str())
            .filter(|text| !text.trim().is_empty())
    }

    pub fn is_loading(&self) -> bool {
        self.status == WorkflowStatus::Loading
    }

    pub fn can_export(&self) -> bool {
        self.extraction.is_some()
    }

    pub fn can_translate(&self) -> bool {
        self.extracted_text().is_some() && !self.is_loading()
    }

    pub fn can_generate_quiz(&self) -> bool {
        self.extracted_text().is_some()
    }

    pub fn can_copy(&self) -> bool {
        self.display_text().is_some_and(|text| !text.is_empty())
    }
}
