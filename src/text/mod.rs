/*!
 * Text views derived from extracted text.
 *
 * - `sanitizer`: HTML escaping for safe embedding
 * - `highlight`: keyword highlighting over escaped text
 * - `tokenizer`: sentence and word segmentation
 * - `quiz`: cloze (fill-in-the-blank) quiz generation
 */

// Re-export main types for easier usage
pub use self::highlight::{HighlightRenderer, highlight};
pub use self::quiz::{BLANK_MARKER, MAX_QUIZ_ITEMS, QuizGenerator, QuizItem, generate_quiz};
pub use self::sanitizer::escape_html;
pub use self::tokenizer::{PatternTokenizer, Tokenizer};

// Submodules
pub mod highlight;
pub mod quiz;
pub mod sanitizer;
pub mod tokenizer;
