/*!
 * # docuflow - Document text extraction and study aids
 *
 * A Rust library that drives an external OCR/transcription service and
 * works with the text it returns.
 *
 * ## Features
 *
 * - Extract text from images, uploaded videos and video URLs
 * - Translate the extraction to Hindi or Marathi
 * - Highlight a keyword in an HTML-safe view
 * - Generate fill-in-the-blank (cloze) quizzes without a language model
 * - Export the text in view to PDF or DOCX
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `workflow`: State record, transitions and the coordinator:
 *   - `workflow::state`: `DocumentWorkflow` and its reducer
 *   - `workflow::coordinator`: Sequencing of external calls and race handling
 * - `text`: Pure text processing:
 *   - `text::sanitizer`: HTML escaping
 *   - `text::highlight`: Keyword highlighting
 *   - `text::tokenizer`: Sentence and candidate-word splitting
 *   - `text::quiz`: Cloze quiz generation
 * - `export`: PDF (lopdf) and DOCX (zip) adapters
 * - `providers`: Client implementations for the extraction service:
 *   - `providers::http`: HTTP API client
 *   - `providers::mock`: In-memory service for tests
 * - `app_config`: Configuration management
 * - `app_controller`: Command-line processing flow
 * - `clipboard`: Copy destinations
 * - `file_utils`: File system operations
 * - `language_utils`: Translation target languages
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod clipboard;
pub mod errors;
pub mod export;
pub mod file_utils;
pub mod language_utils;
pub mod providers;
pub mod text;
pub mod workflow;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{ExportError, QuizError, ServiceError, WorkflowError};
pub use export::{ExportArtifact, ExportFormat};
pub use language_utils::{get_language_name, TargetLanguage};
pub use providers::{DocumentService, HttpDocumentService, MockService};
pub use text::{generate_quiz, highlight, QuizItem};
pub use workflow::{Coordinator, DocumentWorkflow, WorkflowStatus};
