/*!
 * Tests for language utilities
 */

use std::str::FromStr;

use sheetwai::language_utils::{Direction, TargetLanguage, get_language_name};

#[test]
fn test_target_language_direction_shouldImplySource() {
    assert_eq!(TargetLanguage::Ja.direction(), Direction::new("vi", "ja"));
    assert_eq!(TargetLanguage::Vi.direction(), Direction::new("ja", "vi"));
    assert_eq!(TargetLanguage::default(), TargetLanguage::Ja);
}

#[test]
fn test_target_language_fromStr_shouldAcceptKnownSelectors() {
    assert_eq!(TargetLanguage::from_str(" JA ").unwrap(), TargetLanguage::Ja);
    assert_eq!(TargetLanguage::from_str("vi").unwrap(), TargetLanguage::Vi);
    assert!(TargetLanguage::from_str("fr").is_err());
    assert_eq!(TargetLanguage::Vi.to_string(), "vi");
}

#[test]
fn test_target_language_serde_shouldUseLowercase() {
    let json = serde_json::to_string(&TargetLanguage::Vi).unwrap();
    assert_eq!(json, "\"vi\"");
    let parsed: TargetLanguage = serde_json::from_str("\"ja\"").unwrap();
    assert_eq!(parsed, TargetLanguage::Ja);
}

#[test]
fn test_direction_display_shouldUseLanguageNames() {
    assert_eq!(Direction::new("vi", "ja").to_string(), "Vietnamese to Japanese");
    assert_eq!(Direction::new("xx", "ja").source_name(), "xx");
}

#[test]
fn test_get_language_name_withValidCodes_shouldReturnName() {
    assert_eq!(get_language_name("ja").unwrap(), "Japanese");
    assert_eq!(get_language_name("vie").unwrap(), "Vietnamese");
    assert!(get_language_name("zz").is_err());
    assert!(get_language_name("").is_err());
}
