/*!
 * Export adapters that turn the text in view into a downloadable file.
 *
 * - `pdf`: paginated Helvetica text built with lopdf
 * - `docx`: minimal WordprocessingML package, one paragraph per line
 */

use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::app_config::ExportConfig;
use crate::errors::ExportError;

pub mod docx;
pub mod pdf;

/// Output file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Docx,
}

impl ExportFormat {
    /// File extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Suggested file name; named after the kind of text being exported
pub fn export_file_name(format: ExportFormat, translated: bool) -> String {
    let stem = if translated {
        "translated_text"
    } else {
        "extracted_text"
    };
    format!("{}.{}", stem, format.extension())
}

/// An exported file held in memory until it is saved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub format: ExportFormat,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    /// Write the artifact into `dir` under its suggested name
    pub fn save_to<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf, ExportError> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        debug!("Wrote {} bytes to {:?}", self.bytes.len(), path);
        Ok(path)
    }
}

/// Render `text` in `format`
pub fn export_text(
    format: ExportFormat,
    text: &str,
    translated: bool,
    config: &ExportConfig,
) -> Result<ExportArtifact, ExportError> {
    let bytes = match format {
        ExportFormat::Pdf => pdf::render_pdf(text, config)?,
        ExportFormat::Docx => docx::render_docx(text)?,
    };

    Ok(ExportArtifact {
        format,
        file_name: export_file_name(format, translated),
        bytes,
    })
}
