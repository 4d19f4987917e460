/*!
 * Cloze quiz generation.
 *
 * Every eligible sentence yields at most one item: its longest candidate
 * word is blanked out and becomes the answer. Longer words are usually
 * content words, so no language model is needed to pick meaningful blanks.
 */

use regex::{NoExpand, RegexBuilder};
use serde::{Deserialize, Serialize};

use super::tokenizer::{PatternTokenizer, Tokenizer};
use crate::errors::QuizError;

/// Marker substituted for the answer in a prompt
pub const BLANK_MARKER: &str = "_____";

/// Default cap on the number of generated items
pub const MAX_QUIZ_ITEMS: usize = 5;

/// Sentences shorter than this many tokens are not quizzed
const MIN_SENTENCE_TOKENS: usize = 5;

/// A sentence with one word blanked out, paired with that word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizItem {
    /// Sentence containing the blank marker
    pub prompt: String,
    /// Removed word, in its original case
    pub answer: String,
}

/// Cloze quiz generator over a pluggable tokenizer
#[derive(Debug, Clone)]
pub struct QuizGenerator<T: Tokenizer = PatternTokenizer> {
    tokenizer: T,
    max_items: usize,
    blank: String,
}

impl Default for QuizGenerator<PatternTokenizer> {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizGenerator<PatternTokenizer> {
    /// Generator with the pattern tokenizer and default limits
    pub fn new() -> Self {
        Self::with_tokenizer(PatternTokenizer::new())
    }
}

impl<T: Tokenizer> QuizGenerator<T> {
    /// Generator backed by a custom tokenizer
    pub fn with_tokenizer(tokenizer: T) -> Self {
        Self {
            tokenizer,
            max_items: MAX_QUIZ_ITEMS,
            blank: BLANK_MARKER.to_string(),
        }
    }

    /// Override the item cap (values below one are treated as one)
    pub fn max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items.max(1);
        self
    }

    /// Override the blank marker
    pub fn blank_marker(mut self, blank: impl Into<String>) -> Self {
        self.blank = blank.into();
        self
    }

    /// Derive up to `max_items` cloze items from raw extracted text
    pub fn generate(&self, text: &str) -> Result<Vec<QuizItem>, QuizError> {
        let normalized = self.tokenizer.normalize(text);
        if normalized.is_empty() {
            return Err(QuizError::NoText);
        }

        let mut items = Vec::new();
        for sentence in self.tokenizer.sentences(&normalized) {
            if items.len() >= self.max_items {
                break;
            }
            if sentence.split(' ').filter(|t| !t.is_empty()).count() < MIN_SENTENCE_TOKENS {
                continue;
            }
            if let Some(item) = self.blank_sentence(sentence) {
                items.push(item);
            }
        }

        if items.is_empty() {
            return Err(QuizError::NoCandidates);
        }
        Ok(items)
    }

    fn blank_sentence(&self, sentence: &str) -> Option<QuizItem> {
        let answer = longest_word(&self.tokenizer.candidate_words(sentence))?;

        // First case-insensitive occurrence, which may sit inside another word
        let pattern = RegexBuilder::new(&regex::escape(answer))
            .case_insensitive(true)
            .build()
            .ok()?;
        let prompt = pattern.replacen(sentence, 1, NoExpand(&self.blank)).into_owned();

        Some(QuizItem {
            prompt,
            answer: answer.to_string(),
        })
    }
}

/// Longest word by character count; the earliest one wins ties
fn longest_word<'a>(words: &[&'a str]) -> Option<&'a str> {
    let mut best: Option<&'a str> = None;
    for word in words {
        match best {
            Some(current) if current.chars().count() >= word.chars().count() => {}
            _ => best = Some(*word),
        }
    }
    best
}

/// Generate a quiz with the default tokenizer and limits
pub fn generate_quiz(text: &str) -> Result<Vec<QuizItem>, QuizError> {
    QuizGenerator::new().generate(text)
}
