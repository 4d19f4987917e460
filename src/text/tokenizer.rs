/*!
 * Sentence and word segmentation used by the quiz generator.
 *
 * The default implementation is plain pattern matching; a linguistic
 * tokenizer can replace it by implementing [`Tokenizer`].
 */

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

static SENTENCE_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]\s+").expect("sentence boundary pattern is valid"));

// ASCII word boundaries, so an accented letter separates words
static CANDIDATE_WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u:\b)[A-Za-z][A-Za-z'\-]{3,}(?-u:\b)")
        .expect("candidate word pattern is valid")
});

/// Segmentation seam for the quiz generator
pub trait Tokenizer: Send + Sync {
    /// Collapse every whitespace run to a single space and trim the ends
    fn normalize(&self, text: &str) -> String {
        WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
    }

    /// Split normalized text into sentences, keeping terminal punctuation
    fn sentences<'a>(&self, text: &'a str) -> Vec<&'a str>;

    /// Words in `sentence` that are eligible to be blanked out
    fn candidate_words<'a>(&self, sentence: &'a str) -> Vec<&'a str>;
}

/// Regex-based tokenizer
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternTokenizer;

impl PatternTokenizer {
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for PatternTokenizer {
    fn sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut sentences = Vec::new();
        let mut start = 0;

        for boundary in SENTENCE_BOUNDARY.find_iter(text) {
            // Punctuation is a single ASCII byte and stays with its sentence
            let end = boundary.start() + 1;
            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            start = boundary.end();
        }

        let tail = text[start..].trim();
        if !tail.is_empty() {
            sentences.push(tail);
        }

        sentences
    }

    fn candidate_words<'a>(&self, sentence: &'a str) -> Vec<&'a str> {
        CANDIDATE_WORD
            .find_iter(sentence)
            .map(|m| m.as_str())
            .collect()
    }
}
