use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::document::DocumentFormat;

// @module: File and directory utilities

/// Prefix of the lock files office suites leave next to open documents
pub const LOCK_FILE_PREFIX: &str = "~$";

/// Suffix appended to the stem of every translated document
pub const OUTPUT_SUFFIX: &str = "-translated";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_dir()
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

    // @checks: Office lock file such as `~$Book1.json`
    pub fn is_lock_file<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref()
            .file_name()
            .map(|name| name.to_string_lossy().starts_with(LOCK_FILE_PREFIX))
            .unwrap_or(false)
    }

    /// Find the documents directly inside `dir`, sorted by file name
    ///
    /// Only supported formats are returned; lock files and subdirectories
    /// are ignored.
    pub fn find_documents<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        let mut result = Vec::new();

        for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
            let entry = entry.with_context(|| format!("Failed to read directory: {:?}", dir))?;
            let path = entry.path();

            if !path.is_file() || Self::is_lock_file(path) {
                continue;
            }
            if DocumentFormat::from_path(path).is_some() {
                result.push(path.to_path_buf());
            }
        }

        result.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(result)
    }

    // @generates: `{output_dir}/{stem}-translated{.ext}`
    pub fn output_path_for<P1: AsRef<Path>, P2: AsRef<Path>>(input_file: P1, output_dir: P2) -> PathBuf {
        let input_file = input_file.as_ref();
        let stem = input_file.file_stem().unwrap_or_default().to_string_lossy();

        let mut output_filename = format!("{}{}", stem, OUTPUT_SUFFIX);
        if let Some(ext) = input_file.extension() {
            output_filename.push('.');
            output_filename.push_str(&ext.to_string_lossy());
        }

        output_dir.as_ref().join(output_filename)
    }
}
