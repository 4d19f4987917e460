use anyhow::{Context, Result, anyhow};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use url::Url;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Extraction/translation service settings
    #[serde(default)]
    pub service: ServiceConfig,

    /// Workflow behaviour
    #[serde(default)]
    pub workflow: WorkflowConfig,

    /// Export page geometry
    #[serde(default)]
    pub export: ExportConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// How the service should turn a video into text
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum VideoMode {
    // @mode: Transcribe the audio track
    #[default]
    Speech,
    // @mode: OCR sampled frames
    Frames,
}

impl VideoMode {
    // @returns: Query parameter value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Speech => "speech",
            Self::Frames => "frames",
        }
    }
}

impl std::fmt::Display for VideoMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for VideoMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "speech" => Ok(Self::Speech),
            "frames" => Ok(Self::Frames),
            _ => Err(anyhow!("Invalid video mode: {}", s)),
        }
    }
}

/// Extraction service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServiceConfig {
    /// Base URL of the extraction service
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// OCR language passed to the image endpoint (tesseract code, e.g. "eng")
    #[serde(default = "default_ocr_language")]
    pub ocr_language: String,

    /// OCR page segmentation mode passed to the image endpoint
    #[serde(default = "default_page_segmentation_mode")]
    pub page_segmentation_mode: String,

    /// Video extraction mode
    #[serde(default)]
    pub video_mode: VideoMode,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            ocr_language: default_ocr_language(),
            page_segmentation_mode: default_page_segmentation_mode(),
            video_mode: VideoMode::default(),
        }
    }
}

/// What to do with a response that arrives after a newer request was issued
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResponsePolicy {
    /// Every completion is applied when it arrives
    #[default]
    LastWriteWins,
    /// Only the completion of the most recently issued request is applied
    LatestRequestOnly,
}

/// Workflow configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WorkflowConfig {
    /// Race policy for overlapping operations
    #[serde(default)]
    pub response_policy: ResponsePolicy,

    /// Maximum number of quiz items generated
    #[serde(default = "default_quiz_max_items")]
    pub quiz_max_items: usize,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            response_policy: ResponsePolicy::default(),
            quiz_max_items: default_quiz_max_items(),
        }
    }
}

/// Export page geometry (millimetres unless stated otherwise)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ExportConfig {
    #[serde(default = "default_page_width_mm")]
    pub page_width_mm: f32,

    #[serde(default = "default_page_height_mm")]
    pub page_height_mm: f32,

    /// Left and top margin where text starts
    #[serde(default = "default_margin_mm")]
    pub margin_mm: f32,

    /// Width available to wrapped lines
    #[serde(default = "default_content_width_mm")]
    pub content_width_mm: f32,

    /// Font size in points
    #[serde(default = "default_font_size_pt")]
    pub font_size_pt: f32,

    /// Line height as a multiple of the font size
    #[serde(default = "default_line_height_factor")]
    pub line_height_factor: f32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            page_width_mm: default_page_width_mm(),
            page_height_mm: default_page_height_mm(),
            margin_mm: default_margin_mm(),
            content_width_mm: default_content_width_mm(),
            font_size_pt: default_font_size_pt(),
            line_height_factor: default_line_height_factor(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Matching filter for the `log` facade
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_endpoint() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_timeout_secs() -> u64 {
    120 // video downloads and transcription are slow
}

fn default_ocr_language() -> String {
    "eng".to_string()
}

fn default_page_segmentation_mode() -> String {
    "6".to_string()
}

fn default_quiz_max_items() -> usize {
    5
}

fn default_page_width_mm() -> f32 {
    210.0
}

fn default_page_height_mm() -> f32 {
    297.0
}

fn default_margin_mm() -> f32 {
    10.0
}

fn default_content_width_mm() -> f32 {
    180.0
}

fn default_font_size_pt() -> f32 {
    12.0
}

fn default_line_height_factor() -> f32 {
    1.15
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let endpoint = Url::parse(&self.service.endpoint)
            .with_context(|| format!("Invalid service endpoint: {}", self.service.endpoint))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(anyhow!(
                "Service endpoint must use http or https: {}",
                self.service.endpoint
            ));
        }

        if self.service.timeout_secs == 0 {
            return Err(anyhow!("Service timeout must be greater than zero"));
        }

        if self.service.ocr_language.trim().is_empty() {
            return Err(anyhow!("OCR language cannot be empty"));
        }

        if self.workflow.quiz_max_items == 0 {
            return Err(anyhow!("Quiz item limit must be greater than zero"));
        }

        self.export.validate()?;

        Ok(())
    }

    /// Load the configuration at `path`, writing defaults there first if it does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {:?}", path))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            return Ok(config);
        }

        warn!("Config file not found at {:?}, creating default config.", path);
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {:?}", path))?;
        Ok(())
    }
}

impl ExportConfig {
    /// Check that the text area fits on the page
    pub fn validate(&self) -> Result<()> {
        if self.page_width_mm <= 0.0 || self.page_height_mm <= 0.0 {
            return Err(anyhow!("Page dimensions must be positive"));
        }
        if self.font_size_pt <= 0.0 || self.line_height_factor <= 0.0 {
            return Err(anyhow!("Font size and line height must be positive"));
        }
        if self.margin_mm < 0.0 || self.content_width_mm <= 0.0 {
            return Err(anyhow!("Margin must be non-negative and content width positive"));
        }
        if self.margin_mm + self.content_width_mm > self.page_width_mm {
            return Err(anyhow!(
                "Content width {}mm plus margin {}mm exceeds page width {}mm",
                self.content_width_mm,
                self.margin_mm,
                self.page_width_mm
            ));
        }
        if self.margin_mm * 2.0 >= self.page_height_mm {
            return Err(anyhow!("Margins leave no room for text on the page"));
        }
        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            service: ServiceConfig::default(),
            workflow: WorkflowConfig::default(),
            export: ExportConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
