/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use docuflow::file_utils::{FileManager, FileType};
use crate::common;

#[test]
fn test_detectFileType_shouldUseExtension() {
    assert_eq!(FileManager::detect_file_type("scan.PNG"), FileType::Image);
    assert_eq!(FileManager::detect_file_type("photo.jpeg"), FileType::Image);
    assert_eq!(FileManager::detect_file_type("lecture.mp4"), FileType::Video);
    assert_eq!(FileManager::detect_file_type("clip.webm"), FileType::Video);
    assert_eq!(FileManager::detect_file_type("notes.txt"), FileType::Unknown);
    assert_eq!(FileManager::detect_file_type("no_extension"), FileType::Unknown);
}

#[test]
fn test_readSourceFile_shouldKeepNameAndBytes() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "page.png", b"image-bytes")?;

    let file = FileManager::read_source_file(&path)?;
    assert_eq!(file.name, "page.png");
    assert_eq!(file.bytes.as_ref(), b"image-bytes");
    Ok(())
}

#[test]
fn test_readSourceFile_withMissingFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    assert!(FileManager::read_source_file(temp_dir.path().join("missing.png")).is_err());
    // Directories are not uploads
    assert!(FileManager::read_source_file(temp_dir.path()).is_err());
    Ok(())
}
