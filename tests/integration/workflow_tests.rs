/*!
 * Integration tests for end-to-end runs over a directory of documents
 */

use anyhow::Result;
use std::sync::Arc;

use sheetwai::app_controller::Controller;
use sheetwai::document::{CsvSheet, JsonWorkbook};
use sheetwai::language_utils::TargetLanguage;
use sheetwai::providers::mock::{MOCK_PREFIX, MockProvider};

use crate::common;

#[tokio::test]
async fn test_run_withMixedDocuments_shouldTranslateEachAndIsolateFailures() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let config = common::test_config(temp_dir.path());
    let input_dir = config.paths.input_dir.clone();
    let output_dir = config.paths.output_dir.clone();
    std::fs::create_dir_all(&input_dir)?;
    common::create_sample_workbook(&input_dir, "book.json")?;
    common::create_sample_csv(&input_dir, "list.csv")?;
    common::create_test_file(&input_dir, "broken.json", "{ not a workbook")?;
    common::create_test_file(&input_dir, "~$book.json", "lock")?;

    let mock = MockProvider::working();
    let mut controller = Controller::with_provider(config, Arc::new(mock.clone()))?.with_progress(false);
    let summary = controller.run().await?;

    assert_eq!(summary.documents.len(), 2);
    assert_eq!(summary.failed_documents.len(), 1);
    assert_eq!(summary.failed_documents[0].0, "broken.json");
    assert!(!summary.all_documents_succeeded());
    assert_eq!(summary.translated(), 6);
    assert_eq!(summary.skipped(), 4);
    assert_eq!(summary.failed(), 0);
    assert_eq!(mock.call_count(), 2);

    let workbook = JsonWorkbook::open(&output_dir.join("book-translated.json"))?;
    assert_eq!(
        workbook.cell_value(0, 1, 1).and_then(|v| v.as_str()),
        Some(format!("{}Xin chào", MOCK_PREFIX).as_str())
    );
    assert_eq!(workbook.cell_value(0, 1, 2).and_then(|v| v.as_str()), Some("12345"));

    let sheet = CsvSheet::open(&output_dir.join("list-translated.csv"))?;
    assert_eq!(sheet.value(2, 1), Some(format!("{}Bút bi", MOCK_PREFIX).as_str()));
    assert_eq!(sheet.value(2, 2), Some("10"));

    assert!(!output_dir.join("broken-translated.json").exists());
    assert!(temp_dir.path().join("system-prompt.txt").exists());
    Ok(())
}

#[tokio::test]
async fn test_run_withUnwritableOutput_shouldKeepCountsAndMarkDocumentFailed() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::test_config(temp_dir.path());
    let input_dir = config.paths.input_dir.clone();
    let output_dir = config.paths.output_dir.clone();
    std::fs::create_dir_all(&input_dir)?;
    common::create_sample_workbook(&input_dir, "book.json")?;
    // A directory where the translated file should go makes the save fail
    std::fs::create_dir_all(output_dir.join("book-translated.json"))?;

    let mock = MockProvider::working();
    let mut controller = Controller::with_provider(config, Arc::new(mock.clone()))?.with_progress(false);
    let summary = controller.run().await?;

    assert_eq!(summary.documents.len(), 1);
    assert!(!summary.documents[0].is_saved());
    assert_eq!(summary.saved_documents(), 0);
    assert_eq!(summary.translated(), 3);
    assert_eq!(summary.skipped(), 3);
    assert_eq!(summary.failed_documents.len(), 1);
    assert_eq!(summary.failed_documents[0].0, "book.json");
    assert!(!summary.all_documents_succeeded());
    Ok(())
}

#[tokio::test]
async fn test_run_withMissingInputDir_shouldCreateItAndStop() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::test_config(temp_dir.path());
    let input_dir = config.paths.input_dir.clone();

    let mock = MockProvider::working();
    let mut controller = Controller::with_provider(config, Arc::new(mock.clone()))?.with_progress(false);
    let summary = controller.run().await?;

    assert!(input_dir.is_dir());
    assert!(summary.documents.is_empty());
    assert!(summary.all_documents_succeeded());
    assert_eq!(mock.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_run_withJapaneseSource_shouldAskForVietnamese() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let mut config = common::test_config(temp_dir.path());
    config.target_language = TargetLanguage::Vi;
    std::fs::create_dir_all(&config.paths.input_dir)?;
    common::create_test_file(&config.paths.input_dir, "jp.csv", "こんにちは\n")?;

    let mock = MockProvider::working();
    let mut controller = Controller::with_provider(config, Arc::new(mock.clone()))?.with_progress(false);
    controller.run().await?;

    let request = &mock.requests()[0];
    assert!(request.user.starts_with("Translate the following text from Japanese to Vietnamese"));
    Ok(())
}

#[test]
fn test_with_config_withoutApiKey_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let mut config = common::test_config(temp_dir.path());
    config.translation.api_key = String::new();
    config.translation.api_key_env = "SHEETWAI_TEST_NO_SUCH_KEY".to_string();

    assert!(Controller::with_config(config).is_err());
    Ok(())
}

#[test]
fn test_with_provider_withInvalidConfig_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let mut config = common::test_config(temp_dir.path());
    config.batching.batch_size = 0;

    assert!(Controller::with_provider(config, Arc::new(MockProvider::working())).is_err());
    Ok(())
}

#[test]
fn test_output_path_shouldLandInOutputDir() {
    let path = Controller::output_path(
        std::path::Path::new("input/Sales.json"),
        std::path::Path::new("output"),
    );
    assert_eq!(path, std::path::PathBuf::from("output/Sales-translated.json"));
}

#[test]
fn test_format_duration_shouldPickUnits() {
    use std::time::Duration;
    assert_eq!(Controller::format_duration(Duration::from_millis(1500)), "1.500s");
    assert_eq!(Controller::format_duration(Duration::from_secs(125)), "2m 5s");
    assert_eq!(Controller::format_duration(Duration::from_secs(3725)), "1h 2m 5s");
}
