use log::warn;
use regex::{Regex, RegexBuilder};

use super::sanitizer::escape_html;

/// Markup used for a highlighted keyword occurrence
const MARK_OPEN: &str = "<mark>";
const MARK_CLOSE: &str = "</mark>";
const LINE_BREAK: &str = "<br/>";

/// Compiled size cap for keyword patterns
const KEYWORD_SIZE_LIMIT: usize = 1 << 20;

/// Renders display text as markup-safe HTML with keyword occurrences marked
#[derive(Debug, Clone)]
pub struct HighlightRenderer {
    pattern: Option<Regex>,
}

impl HighlightRenderer {
    /// Build a renderer for `keyword`; blank keywords disable highlighting
    pub fn new(keyword: &str) -> Self {
        let keyword = keyword.trim();
        let pattern = if keyword.is_empty() {
            None
        } else {
            // Escaped keyword: literal, case-insensitive substring match
            match RegexBuilder::new(&regex::escape(keyword))
                .case_insensitive(true)
                .size_limit(KEYWORD_SIZE_LIMIT)
                .build()
            {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    warn!("Highlighting disabled, keyword cannot be matched: {}", e);
                    None
                }
            }
        };
        Self { pattern }
    }

    /// Whether this renderer marks anything at all
    pub fn has_keyword(&self) -> bool {
        self.pattern.is_some()
    }

    /// Escape `text`, wrap every keyword occurrence, then render line breaks
    pub fn render(&self, text: &str) -> String {
        let marked = match &self.pattern {
            None => escape_html(text),
            Some(pattern) => {
                let mut out = String::with_capacity(text.len() + 16);
                let mut last = 0;
                for found in pattern.find_iter(text) {
                    out.push_str(&escape_html(&text[last..found.start()]));
                    out.push_str(MARK_OPEN);
                    out.push_str(&escape_html(found.as_str()));
                    out.push_str(MARK_CLOSE);
                    last = found.end();
                }
                out.push_str(&escape_html(&text[last..]));
                out
            }
        };

        marked.replace('\n', LINE_BREAK)
    }

    /// Number of keyword occurrences in `text`
    pub fn count_matches(&self, text: &str) -> usize {
        self.pattern
            .as_ref()
            .map_or(0, |pattern| pattern.find_iter(text).count())
    }
}

/// Render `text` with every case-insensitive occurrence of `keyword` highlighted
pub fn highlight(text: &str, keyword: &str) -> String {
    HighlightRenderer::new(keyword).render(text)
}
