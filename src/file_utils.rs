use anyhow::{Result, Context, anyhow};
use std::fs;
use std::path::Path;

use crate::workflow::SourceFile;

// @module: File and directory utilities

const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "tif", "tiff", "webp",
];

const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "mkv", "avi", "mov", "wmv", "flv", "webm", "m4v",
    "mpg", "mpeg", "ogv", "3gp",
];

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// Load a file as an upload, named after its file name
    pub fn read_source_file<P: AsRef<Path>>(path: P) -> Result<SourceFile> {
        let path = path.as_ref();
        if !Self::file_exists(path) {
            return Err(anyhow!("File does not exist: {:?}", path));
        }

        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read file: {:?}", path))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());

        Ok(SourceFile::new(name, bytes))
    }

    /// Guess whether a file is an image or a video from its extension
    pub fn detect_file_type<P: AsRef<Path>>(path: P) -> FileType {
        let ext = path
            .as_ref()
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase());

        match ext.as_deref() {
            Some(ext) if IMAGE_EXTENSIONS.contains(&ext) => FileType::Image,
            Some(ext) if VIDEO_EXTENSIONS.contains(&ext) => FileType::Video,
            _ => FileType::Unknown,
        }
    }
}

/// Enum representing the kinds of upload the service accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    /// Still image for OCR
    Image,
    /// Video for transcription or frame OCR
    Video,
    /// Unknown file type
    Unknown,
}
