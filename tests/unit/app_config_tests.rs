/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use sheetwai::app_config::{Config, LogLevel};
use sheetwai::language_utils::TargetLanguage;

use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.target_language, TargetLanguage::Ja);
    assert_eq!(config.translation.model, "gemini-2.0-flash-lite");
    assert_eq!(config.translation.api_key_env, "GEMINI_API_KEY");
    assert_eq!(config.translation.api_delay_ms, 2000);
    assert_eq!(config.translation.max_attempts, 3);
    assert_eq!(config.translation.delimiter, "|||");
    assert_eq!(config.batching.batch_size, 100);
    assert_eq!(config.batching.min_chars, 2);
    assert_eq!(config.paths.output_dir.to_str(), Some("output"));
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_config_validation_withInvalidValues_shouldFail() {
    let mut config = Config::default();
    config.batching.batch_size = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.translation.max_attempts = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.translation.model = "  ".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.translation.delimiter = String::new();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.translation.endpoint = "not a url".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.translation.endpoint = "ftp://example.com/v1".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_load_or_create_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let (config, created) = Config::load_or_create(&path)?;
    assert!(created);
    assert!(path.exists());
    assert_eq!(config.batching.batch_size, 100);

    let (_, created_again) = Config::load_or_create(&path)?;
    assert!(!created_again);
    Ok(())
}

#[test]
fn test_load_or_create_withPartialFile_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{ "target_language": "vi", "batching": { "batch_size": 25 }, "log_level": "debug" }"#,
    )?;

    let (config, created) = Config::load_or_create(&path)?;
    assert!(!created);
    assert_eq!(config.target_language, TargetLanguage::Vi);
    assert_eq!(config.batching.batch_size, 25);
    assert_eq!(config.batching.min_chars, 2);
    assert_eq!(config.translation.api_delay_ms, 2000);
    assert_eq!(config.log_level, LogLevel::Debug);
    Ok(())
}

#[test]
fn test_load_or_create_withMalformedFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;
    assert!(Config::load_or_create(&path).is_err());
    Ok(())
}

#[test]
fn test_resolve_api_key_withConfiguredKey_shouldPreferIt() {
    let mut config = Config::default();
    config.translation.api_key = " from-config ".to_string();
    config.translation.api_key_env = "SHEETWAI_TEST_UNUSED_KEY".to_string();
    assert_eq!(config.resolve_api_key().unwrap(), "from-config");
}

#[test]
fn test_resolve_api_key_withEnvironmentKey_shouldUseIt() {
    let mut config = Config::default();
    config.translation.api_key_env = "SHEETWAI_TEST_ENV_KEY".to_string();
    unsafe { std::env::set_var("SHEETWAI_TEST_ENV_KEY", "from-env") };
    assert_eq!(config.resolve_api_key().unwrap(), "from-env");
}

#[test]
fn test_resolve_api_key_withNoKey_shouldFail() {
    let mut config = Config::default();
    config.translation.api_key_env = "SHEETWAI_TEST_MISSING_KEY".to_string();
    assert!(config.resolve_api_key().is_err());
}

#[test]
fn test_log_level_toLevelFilter_shouldMapEveryLevel() {
    assert_eq!(LogLevel::Error.to_level_filter(), log::LevelFilter::Error);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}
