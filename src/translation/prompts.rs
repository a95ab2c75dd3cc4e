/*!
 * Prompt templates for batch translation.
 *
 * The system instruction comes from a text file the operator can edit. When
 * the file does not exist it is created with the built-in default.
 */

use anyhow::{Context, Result};
use log::info;
use std::path::Path;

use crate::language_utils::Direction;

/// Built-in system instruction, written to disk on first use
pub const DEFAULT_SYSTEM_PROMPT: &str = r#"You are a professional translator. Follow these rules strictly:
1. Output ONLY the translation, nothing else
2. DO NOT include the original text in your response
3. DO NOT add any explanations or notes
4. Keep IDs, model numbers, and special characters unchanged
5. Use standard terminology for technical terms
6. Preserve the original formatting (spaces, line breaks)
7. Use proper grammar and punctuation
8. Only keep unchanged: proper names, IDs, and technical codes
9. Translate all segments separated by "{delimiter}" and keep them separated with the same delimiter"#;

/// System instruction template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_SYSTEM_PROMPT)
    }
}

impl PromptTemplate {
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
        }
    }

    /// Read the template from `path`, creating it with the default if missing
    ///
    /// The default is written with `delimiter` already substituted, so the
    /// file reads naturally when opened.
    pub fn load_or_create<P: AsRef<Path>>(path: P, delimiter: &str) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let template = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read system prompt file: {:?}", path))?;
            return Ok(Self { template });
        }

        let template = DEFAULT_SYSTEM_PROMPT.replace("{delimiter}", delimiter);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
        std::fs::write(path, &template)
            .with_context(|| format!("Failed to write default system prompt: {:?}", path))?;
        info!("📝 Default prompt file created at: {}", path.display());

        Ok(Self { template })
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// System instruction for one call
    pub fn system_prompt(&self, direction: &Direction, delimiter: &str) -> String {
        format!(
            "{}\n\nTranslation direction: {}.",
            self.template.replace("{delimiter}", delimiter).trim_end(),
            direction
        )
    }
}

/// User message carrying the delimited payload
pub fn user_prompt(direction: &Direction, delimiter: &str, payload: &str) -> String {
    format!(
        "Translate the following text from {} to {}, keeping segments separated by '{}':\n\n{}",
        direction.source_name(),
        direction.target_name(),
        delimiter,
        payload
    )
}
