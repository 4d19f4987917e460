use anyhow::{Result, Context, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::clipboard::Clipboard;
use crate::export::ExportFormat;
use crate::file_utils::{FileManager, FileType};
use crate::language_utils::TargetLanguage;
use crate::providers::{DocumentService, HttpDocumentService};
use crate::text::QuizItem;
use crate::workflow::Coordinator;

// @module: Application controller for one-shot document processing

/// Where the document comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceInput {
    Image(PathBuf),
    VideoFile(PathBuf),
    VideoUrl(String),
}

impl SourceInput {
    /// Pick the upload kind for a local file from its extension
    pub fn from_path(path: PathBuf) -> Result<Self> {
        match FileManager::detect_file_type(&path) {
            FileType::Image => Ok(Self::Image(path)),
            FileType::Video => Ok(Self::VideoFile(path)),
            FileType::Unknown => Err(anyhow!(
                "Cannot tell whether {:?} is an image or a video; use the image or video command",
                path
            )),
        }
    }
}

/// What to do with the extracted text
#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    // @field: Translate the extraction into this language
    pub translate: Option<TargetLanguage>,
    // @field: Keyword to highlight in the HTML view
    pub keyword: Option<String>,
    // @field: Generate a cloze quiz
    pub quiz: bool,
    // @field: Reveal quiz answers
    pub show_answers: bool,
    // @field: Render the highlighted HTML view
    pub html: bool,
    // @field: Export formats to write
    pub exports: Vec<ExportFormat>,
    // @field: Directory for exported files
    pub output_dir: PathBuf,
    // @field: Copy the text in view
    pub copy: bool,
}

/// Outcome of a processing run
#[derive(Debug, Clone)]
pub struct ProcessReport {
    pub source_description: String,
    /// Text in view after all steps (translation if requested)
    pub text: String,
    pub translated_to: Option<TargetLanguage>,
    pub html: Option<String>,
    pub quiz: Vec<QuizItem>,
    pub answers_visible: bool,
    pub exported: Vec<PathBuf>,
    pub copied: bool,
    pub elapsed: Duration,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Workflow driven by this controller
    coordinator: Coordinator,
    // @field: Show spinners while waiting on the service
    show_progress: bool,
}

impl Controller {
    // @method: Create a controller talking to the configured HTTP service
    pub fn with_config(config: Config) -> Result<Self> {
        let service = HttpDocumentService::new(&config.service)
            .context("Failed to create document service")?;
        Ok(Self::with_service(config, Arc::new(service)).with_progress(true))
    }

    /// Create a controller over any service implementation
    pub fn with_service(config: Config, service: Arc<dyn DocumentService>) -> Self {
        let coordinator = Coordinator::with_config(service, &config);
        Self {
            config,
            coordinator,
            show_progress: false,
        }
    }

    /// Enable or disable progress spinners
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    /// Extract, then apply every requested step in order
    pub async fn run(
        &self,
        input: SourceInput,
        options: &ProcessOptions,
        clipboard: &mut dyn Clipboard,
    ) -> Result<ProcessReport> {
        let start_time = Instant::now();

        let spinner = self.spinner("Extracting text...");
        let extraction = match input {
            SourceInput::Image(path) => {
                let file = FileManager::read_source_file(&path)?;
                self.coordinator.submit_image(file).await
            }
            SourceInput::VideoFile(path) => {
                let file = FileManager::read_source_file(&path)?;
                self.coordinator.submit_video_file(file).await
            }
            SourceInput::VideoUrl(url) => self.coordinator.submit_video_url(&url).await,
        };
        Self::finish(spinner);
        let extraction = extraction.context("Extraction failed")?;
        info!("{}", extraction.source_description);

        if let Some(keyword) = &options.keyword {
            self.coordinator.set_keyword(keyword.as_str());
        }

        if let Some(target) = options.translate {
            let spinner = self.spinner(&format!("Translating to {}...", target.name()));
            let translation = self.coordinator.translate(target).await;
            Self::finish(spinner);
            translation.context("Translation failed")?;
        }

        let mut quiz = Vec::new();
        if options.quiz {
            match self.coordinator.generate_quiz() {
                Ok(items) => quiz = items,
                // A text with no quizzable sentence still gets exported and copied
                Err(e) => warn!("{}", e),
            }
            if options.show_answers {
                self.coordinator.set_answers_visible(true);
            }
        }

        let mut exported = Vec::new();
        if !options.exports.is_empty() {
            FileManager::ensure_dir(&options.output_dir)?;
        }
        for format in &options.exports {
            let artifact = self
                .coordinator
                .export(*format)
                .with_context(|| format!("Failed to export {}", format))?;
            let path = artifact.save_to(&options.output_dir)?;
            info!("Saved {:?}", path);
            exported.push(path);
        }

        if options.copy {
            self.coordinator
                .copy_text(clipboard)
                .context("Copy failed")?;
        }

        let state = self.coordinator.snapshot();
        let html = if options.html {
            self.coordinator.highlighted_view()
        } else {
            None
        };
        let elapsed = start_time.elapsed();
        info!("Processing completed in {}.", Self::format_duration(elapsed));

        Ok(ProcessReport {
            source_description: extraction.source_description,
            text: state.display_text().unwrap_or_default().to_string(),
            translated_to: state.translation.as_ref().map(|t| t.target_language),
            html,
            quiz,
            answers_visible: state.answers_visible,
            exported,
            copied: options.copy,
            elapsed,
        })
    }

    fn spinner(&self, message: &str) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        Some(spinner)
    }

    fn finish(spinner: Option<ProgressBar>) {
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }
    }

    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;

        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}

/// Plain-text quiz listing, numbered from one
pub fn render_quiz(items: &[QuizItem], show_answers: bool) -> String {
    let mut out = String::new();
    for (index, item) in items.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", index + 1, item.prompt));
        if show_answers {
            out.push_str(&format!("   Answer: {}\n", item.answer));
        }
    }
    out
}
