/*!
 * Common test utilities for the docuflow test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use docuflow::MockService;
use docuflow::app_config::{Config, ResponsePolicy};
use docuflow::workflow::{Coordinator, SourceFile};

/// Three quizzable sentences about basic science
pub const SAMPLE_TEXT: &str = "The mitochondria is the powerhouse of the cell. \
Photosynthesis converts sunlight into chemical energy inside chloroplasts. \
Water boils at one hundred degrees Celsius at sea level.";

/// Route library logs to the test harness; safe to call from every test
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &[u8]) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// An in-memory image upload
pub fn sample_image(name: &str) -> SourceFile {
    SourceFile::new(name, b"\x89PNG fake image bytes".to_vec())
}

/// An in-memory video upload
pub fn sample_video(name: &str) -> SourceFile {
    SourceFile::new(name, b"fake mp4 bytes".to_vec())
}

/// Coordinator over a clone of `service`, so the test keeps access to its call log
pub fn coordinator_for(service: &MockService) -> Coordinator {
    init_test_logging();
    Coordinator::new(Arc::new(service.clone()))
}

/// Coordinator that only applies the latest request's response
pub fn strict_coordinator_for(service: &MockService) -> Coordinator {
    init_test_logging();
    let mut config = Config::default();
    config.workflow.response_policy = ResponsePolicy::LatestRequestOnly;
    Coordinator::with_config(Arc::new(service.clone()), &config)
}
