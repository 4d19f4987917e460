/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use docuflow::app_config::{Config, LogLevel, ResponsePolicy, VideoMode};
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.service.endpoint, "http://127.0.0.1:5000");
    assert_eq!(config.service.timeout_secs, 120);
    assert_eq!(config.service.ocr_language, "eng");
    assert_eq!(config.service.page_segmentation_mode, "6");
    assert_eq!(config.service.video_mode, VideoMode::Speech);
    assert_eq!(config.workflow.response_policy, ResponsePolicy::LastWriteWins);
    assert_eq!(config.workflow.quiz_max_items, 5);
    assert_eq!(config.export.page_width_mm, 210.0);
    assert_eq!(config.export.page_height_mm, 297.0);
    assert_eq!(config.export.margin_mm, 10.0);
    assert_eq!(config.export.content_width_mm, 180.0);
    assert_eq!(config.export.font_size_pt, 12.0);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();

    config.service.endpoint = "not a url".to_string();
    assert!(config.validate().is_err());
    config.service.endpoint = "ftp://example.com".to_string();
    assert!(config.validate().is_err());
    config.service.endpoint = "https://ocr.example.com/api".to_string();
    assert!(config.validate().is_ok());

    config.service.timeout_secs = 0;
    assert!(config.validate().is_err());
    config.service.timeout_secs = 30;

    config.service.ocr_language = "  ".to_string();
    assert!(config.validate().is_err());
    config.service.ocr_language = "eng+hin".to_string();

    config.workflow.quiz_max_items = 0;
    assert!(config.validate().is_err());
    config.workflow.quiz_max_items = 3;

    config.export.content_width_mm = 205.0;
    assert!(config.validate().is_err());
    config.export.content_width_mm = 180.0;

    config.export.font_size_pt = 0.0;
    assert!(config.validate().is_err());
    config.export.font_size_pt = 11.0;

    assert!(config.validate().is_ok());
}

#[test]
fn test_config_fromPartialJson_shouldFillDefaults() -> Result<()> {
    let json = r#"{
        "service": { "endpoint": "http://ocr.local:8080", "video_mode": "frames" },
        "workflow": { "response_policy": "latest_request_only" },
        "log_level": "debug"
    }"#;
    let config: Config = serde_json::from_str(json)?;

    assert_eq!(config.service.endpoint, "http://ocr.local:8080");
    assert_eq!(config.service.video_mode, VideoMode::Frames);
    assert_eq!(config.service.timeout_secs, 120);
    assert_eq!(config.workflow.response_policy, ResponsePolicy::LatestRequestOnly);
    assert_eq!(config.workflow.quiz_max_items, 5);
    assert_eq!(config.export.margin_mm, 10.0);
    assert_eq!(config.log_level, LogLevel::Debug);
    Ok(())
}

#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let created = Config::load_or_create(&path)?;
    assert!(path.exists());
    assert_eq!(created.service.endpoint, Config::default().service.endpoint);

    let loaded = Config::load_or_create(&path)?;
    assert_eq!(loaded.workflow.quiz_max_items, created.workflow.quiz_max_items);
    Ok(())
}

#[test]
fn test_saveThenLoad_shouldPreserveValues() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("custom.json");

    let mut config = Config::default();
    config.service.ocr_language = "hin".to_string();
    config.workflow.response_policy = ResponsePolicy::LatestRequestOnly;
    config.export.font_size_pt = 10.0;
    config.save(&path)?;

    let loaded = Config::load_or_create(&path)?;
    assert_eq!(loaded.service.ocr_language, "hin");
    assert_eq!(loaded.workflow.response_policy, ResponsePolicy::LatestRequestOnly);
    assert_eq!(loaded.export, config.export);
    Ok(())
}

#[test]
fn test_loadOrCreate_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "broken.json", b"{ not json")?;
    assert!(Config::load_or_create(&path).is_err());
    Ok(())
}

#[test]
fn test_videoMode_shouldParseAndPrint() -> Result<()> {
    assert_eq!("speech".parse::<VideoMode>()?, VideoMode::Speech);
    assert_eq!(" FRAMES ".parse::<VideoMode>()?, VideoMode::Frames);
    assert!("audio".parse::<VideoMode>().is_err());
    assert_eq!(VideoMode::Frames.to_string(), "frames");
    Ok(())
}

#[test]
fn test_logLevel_shouldMapToFilter() {
    assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}
