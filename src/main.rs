// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, Context};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use docuflow::app_config::{self, Config, VideoMode};
use docuflow::app_controller::{render_quiz, Controller, ProcessOptions, SourceInput};
use docuflow::clipboard::StdoutClipboard;
use docuflow::export::ExportFormat;
use docuflow::language_utils::TargetLanguage;

/// CLI Wrapper for ExportFormat to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliExportFormat {
    Pdf,
    Docx,
}

impl From<CliExportFormat> for ExportFormat {
    fn from(cli_format: CliExportFormat) -> Self {
        match cli_format {
            CliExportFormat::Pdf => ExportFormat::Pdf,
            CliExportFormat::Docx => ExportFormat::Docx,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract text from an image (OCR)
    Image {
        /// Image file to upload
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        process: ProcessArgs,
    },

    /// Extract text from a video file (speech or frame OCR)
    Video {
        /// Video file to upload
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        process: ProcessArgs,
    },

    /// Extract text from a local file, choosing image or video by its extension
    File {
        /// Image or video file to upload
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        process: ProcessArgs,
    },

    /// Extract text from a video the service downloads itself
    Url {
        /// Video URL
        #[arg(value_name = "URL")]
        url: String,

        #[command(flatten)]
        process: ProcessArgs,
    },

    /// Generate shell completions for docuflow
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct ProcessArgs {
    /// Translate the extracted text (hi, mr, or a language name)
    #[arg(short, long, value_name = "LANG")]
    translate: Option<TargetLanguage>,

    /// Video extraction mode (speech or frames), overriding the config
    #[arg(long, value_name = "MODE")]
    video_mode: Option<VideoMode>,

    /// Highlight this keyword (case-insensitive) in the HTML view
    #[arg(short, long)]
    keyword: Option<String>,

    /// Generate a fill-in-the-blank quiz from the extracted text
    #[arg(short, long)]
    quiz: bool,

    /// Print quiz answers
    #[arg(long, requires = "quiz")]
    show_answers: bool,

    /// Print the text as HTML with the keyword highlighted
    #[arg(long)]
    html: bool,

    /// Export the text (repeatable)
    #[arg(short, long, value_enum)]
    export: Vec<CliExportFormat>,

    /// Directory for exported files
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Copy the text to standard output for piping into a clipboard tool
    #[arg(long)]
    copy: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// docuflow - document text extraction, translation and study aids
///
/// Sends images and videos to an OCR/transcription service, then
/// translates, highlights, quizzes and exports the recognized text.
#[derive(Parser, Debug)]
#[command(name = "docuflow")]
#[command(version)]
#[command(about = "Extract, translate and study text from images and videos")]
#[command(long_about = "docuflow sends a document to a text recognition service and works with the result.

EXAMPLES:
    docuflow image scan.png                         # Print the recognized text
    docuflow image scan.png -t hi                   # Translate to Hindi
    docuflow video lecture.mp4 -q --show-answers    # Build a quiz from a lecture
    docuflow file slides.jpg -t marathi             # Detect the file kind, translate
    docuflow url https://example.com/v.mp4 -e pdf   # Export the transcript as PDF
    docuflow image notes.jpg -k energy --html       # Highlight a keyword
    docuflow completions bash > docuflow.bash       # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI color for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let level = record.level();

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                Self::get_color_for_level(level),
                now,
                Self::get_emoji_for_level(level),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Max level is lowered or raised once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    let (input, args) = match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "docuflow", &mut std::io::stdout());
            return Ok(());
        }
        Commands::Image { file, process } => (SourceInput::Image(file), process),
        Commands::Video { file, process } => (SourceInput::VideoFile(file), process),
        Commands::File { file, process } => (SourceInput::from_path(file)?, process),
        Commands::Url { url, process } => (SourceInput::VideoUrl(url), process),
    };

    run_process(input, args).await
}

async fn run_process(input: SourceInput, args: ProcessArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &args.log_level {
        let log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(log_level.to_level_filter());
    }

    let mut config = Config::load_or_create(&args.config_path)?;
    if let Some(log_level) = &args.log_level {
        config.log_level = log_level.clone().into();
    }

    if let Some(video_mode) = args.video_mode {
        config.service.video_mode = video_mode;
    }

    config.validate()
        .context("Configuration validation failed")?;
    log::set_max_level(config.log_level.to_level_filter());

    let options = ProcessOptions {
        translate: args.translate,
        keyword: args.keyword,
        quiz: args.quiz,
        show_answers: args.show_answers,
        html: args.html,
        exports: args.export.into_iter().map(Into::into).collect(),
        output_dir: args.output_dir,
        copy: args.copy,
    };

    let controller = Controller::with_config(config)?;
    let mut clipboard = StdoutClipboard;
    let report = controller.run(input, &options, &mut clipboard).await?;

    if let Some(target) = report.translated_to {
        info!("Showing {} translation", target.name());
    }

    let mut stdout = std::io::stdout().lock();
    // With --copy the text was already written by the clipboard
    if !report.copied {
        match &report.html {
            Some(html) => writeln!(stdout, "{}", html)?,
            None => writeln!(stdout, "{}", report.text)?,
        }
    }
    if !report.quiz.is_empty() {
        writeln!(stdout)?;
        write!(stdout, "{}", render_quiz(&report.quiz, report.answers_visible))?;
    }
    for path in &report.exported {
        info!("Exported: {:?}", path);
    }

    Ok(())
}
