/*!
 * Spreadsheet documents as seen by the translation pipeline.
 *
 * A document is an ordered set of text-bearing locations that can be read
 * and overwritten one at a time. Everything else in the file (numbers,
 * formatting, unknown fields) passes through untouched.
 *
 * - `location`: location keys
 * - `workbook`: JSON workbook with sheets, cells and shapes
 * - `csv_sheet`: single-sheet CSV files
 */

use std::io::Write;
use std::path::Path;

use crate::errors::DocumentError;

pub mod csv_sheet;
pub mod location;
pub mod workbook;

pub use csv_sheet::CsvSheet;
pub use location::{SheetRef, TextLocation};
pub use workbook::JsonWorkbook;

/// A document whose text can be enumerated and replaced in place
pub trait Document: Send {
    /// Name used in logs and summaries
    fn name(&self) -> &str;

    /// Every text-bearing location with its current text, in traversal
    /// order: sheet order, then row-major cells, then shapes by index
    fn text_locations(&self) -> Vec<(TextLocation, String)>;

    /// Replace the text at one location, leaving everything else as is
    fn set_text(&mut self, location: &TextLocation, text: &str) -> Result<(), DocumentError>;

    /// Write the document to `path`
    fn save(&self, path: &Path) -> Result<(), DocumentError>;
}

/// Supported on-disk formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    JsonWorkbook,
    Csv,
}

impl DocumentFormat {
    /// File extensions recognised as documents
    pub const EXTENSIONS: [&'static str; 2] = ["json", "csv"];

    /// Detect the format from a path's extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_string_lossy().to_lowercase();
        match ext.as_str() {
            "json" => Some(Self::JsonWorkbook),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

/// Open a document, choosing the reader from the file extension
pub fn open_document(path: &Path) -> Result<Box<dyn Document>, DocumentError> {
    match DocumentFormat::from_path(path) {
        Some(DocumentFormat::JsonWorkbook) => Ok(Box::new(JsonWorkbook::open(path)?)),
        Some(DocumentFormat::Csv) => Ok(Box::new(CsvSheet::open(path)?)),
        None => Err(DocumentError::UnsupportedFormat(path.display().to_string())),
    }
}

/// Write bytes to `path` through a temporary file in the same directory,
/// so an interrupted save never leaves a half-written document behind
pub(crate) fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), DocumentError> {
    let io_err = |source: std::io::Error| DocumentError::Io {
        path: path.display().to_string(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(io_err)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(bytes).map_err(io_err)?;
    tmp.flush().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;
    Ok(())
}
