use anyhow::{Result, anyhow};
use isolang::Language;
use serde::{Deserialize, Serialize};

/// Language utilities for translation targets
///
/// The translation service accepts a closed set of target languages,
/// addressed on the wire by their ISO 639-1 code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetLanguage {
    /// Hindi (`hi`)
    Hindi,
    /// Marathi (`mr`)
    Marathi,
}

impl TargetLanguage {
    /// Every supported target, in selector order
    pub const ALL: [TargetLanguage; 2] = [TargetLanguage::Hindi, TargetLanguage::Marathi];

    /// ISO 639-1 code sent to the translation endpoint
    pub fn code(&self) -> &'static str {
        match self {
            Self::Hindi => "hi",
            Self::Marathi => "mr",
        }
    }

    /// English language name
    pub fn name(&self) -> String {
        get_language_name(self.code()).unwrap_or_else(|_| self.code().to_string())
    }

    /// Parse a target from an ISO 639-1/639-3 code or an English name
    pub fn from_code(code: &str) -> Result<Self> {
        let normalized = code.trim().to_lowercase();

        let part1 = match normalized.len() {
            2 => Language::from_639_1(&normalized).and_then(|lang| lang.to_639_1()),
            3 => Language::from_639_3(&normalized).and_then(|lang| lang.to_639_1()),
            _ => Language::from_name(&capitalize(&normalized)).and_then(|lang| lang.to_639_1()),
        };

        match part1 {
            Some("hi") => Ok(Self::Hindi),
            Some("mr") => Ok(Self::Marathi),
            _ => Err(anyhow!(
                "Unsupported target language: {} (allowed: hi, mr)",
                code
            )),
        }
    }
}

impl std::fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for TargetLanguage {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_code(s)
    }
}

/// Get the English language name from an ISO 639-1 or 639-3 code
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized = code.trim().to_lowercase();
    let lang = match normalized.len() {
        2 => Language::from_639_1(&normalized),
        3 => Language::from_639_3(&normalized),
        _ => None,
    }
    .ok_or_else(|| anyhow!("Invalid language code: {}", code))?;

    Ok(lang.to_name().to_string())
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
