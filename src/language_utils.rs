/*!
 * Language utilities for translation directions.
 *
 * A run translates between exactly two languages. The operator picks the
 * target; the source is implied by it.
 */

use anyhow::{Result, anyhow};
use isolang::Language;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Target language selector accepted on the command line and in config
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TargetLanguage {
    /// Vietnamese to Japanese
    #[default]
    Ja,
    /// Japanese to Vietnamese
    Vi,
}

impl TargetLanguage {
    /// All accepted selector values
    pub const ALL: [TargetLanguage; 2] = [TargetLanguage::Ja, TargetLanguage::Vi];

    // @returns: ISO 639-1 code of the selector
    pub fn code(&self) -> &'static str {
        match self {
            Self::Ja => "ja",
            Self::Vi => "vi",
        }
    }

    /// The translation direction this selector stands for
    pub fn direction(&self) -> Direction {
        match self {
            Self::Ja => Direction::new("vi", "ja"),
            Self::Vi => Direction::new("ja", "vi"),
        }
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for TargetLanguage {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "ja" => Ok(Self::Ja),
            "vi" => Ok(Self::Vi),
            _ => Err(anyhow!(
                "Invalid target language: {} (expected one of: ja, vi)",
                s
            )),
        }
    }
}

/// Ordered (source, target) language pair of a translation call
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Direction {
    /// ISO 639-1 source code
    pub source: String,
    /// ISO 639-1 target code
    pub target: String,
}

impl Direction {
    pub fn new(source: &str, target: &str) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
        }
    }

    /// English name of the source language, falling back to its code
    pub fn source_name(&self) -> String {
        get_language_name(&self.source).unwrap_or_else(|_| self.source.clone())
    }

    /// English name of the target language, falling back to its code
    pub fn target_name(&self) -> String {
        get_language_name(&self.target).unwrap_or_else(|_| self.target.clone())
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.source_name(), self.target_name())
    }
}

/// Get the English language name from an ISO 639-1 or 639-3 code
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized = code.trim().to_lowercase();
    let lang = match normalized.len() {
        2 => Language::from_639_1(&normalized),
        3 => Language::from_639_3(&normalized),
        _ => None,
    }
    .ok_or_else(|| anyhow!("Invalid language code: {}", code))?;

    Ok(lang.to_name().to_string())
}
