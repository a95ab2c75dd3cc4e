use std::path::Path;

use crate::errors::DocumentError;

use super::location::{SheetRef, TextLocation};
use super::{Document, write_atomically};

/// A CSV file treated as a single sheet with no shapes
///
/// Rows and columns are one-based. Every field is a cell, header row included.
#[derive(Debug, Clone)]
pub struct CsvSheet {
    name: String,
    sheet: SheetRef,
    rows: Vec<Vec<String>>,
}

impl CsvSheet {
    /// Read a CSV file
    pub fn open(path: &Path) -> Result<Self, DocumentError> {
        let content = std::fs::read(path).map_err(|source| DocumentError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        let sheet_name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| name.clone());
        Self::parse(&name, &sheet_name, &content)
    }

    /// Parse CSV bytes
    pub fn parse(name: &str, sheet_name: &str, content: &[u8]) -> Result<Self, DocumentError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(content);

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| DocumentError::Malformed {
                path: name.to_string(),
                message: e.to_string(),
            })?;
            rows.push(record.iter().map(|s| s.to_string()).collect());
        }

        Ok(Self {
            name: name.to_string(),
            sheet: SheetRef::new(0, sheet_name),
            rows,
        })
    }

    /// Field at a one-based row/column
    pub fn value(&self, row: u32, col: u32) -> Option<&str> {
        let r = (row as usize).checked_sub(1)?;
        let c = (col as usize).checked_sub(1)?;
        self.rows.get(r)?.get(c).map(|s| s.as_str())
    }

    /// Serialize back to CSV bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, DocumentError> {
        let malformed = |message: String| DocumentError::Malformed {
            path: self.name.clone(),
            message,
        };

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_writer(Vec::new());
        for row in &self.rows {
            writer.write_record(row).map_err(|e| malformed(e.to_string()))?;
        }
        writer.into_inner().map_err(|e| malformed(e.to_string()))
    }
}

impl Document for CsvSheet {
    fn name(&self) -> &str {
        &self.name
    }

    fn text_locations(&self) -> Vec<(TextLocation, String)> {
        let mut locations = Vec::new();
        for (r, row) in self.rows.iter().enumerate() {
            for (c, field) in row.iter().enumerate() {
                if field.is_empty() {
                    continue;
                }
                locations.push((
                    TextLocation::cell(self.sheet.clone(), r as u32 + 1, c as u32 + 1),
                    field.clone(),
                ));
            }
        }
        locations
    }

    fn set_text(&mut self, location: &TextLocation, text: &str) -> Result<(), DocumentError> {
        let unknown = || DocumentError::UnknownLocation(location.to_string());
        match location {
            TextLocation::Cell { sheet, row, col } if sheet.position == self.sheet.position => {
                let r = (*row as usize).checked_sub(1).ok_or_else(unknown)?;
                let c = (*col as usize).checked_sub(1).ok_or_else(unknown)?;
                let field = self
                    .rows
                    .get_mut(r)
                    .and_then(|row| row.get_mut(c))
                    .ok_or_else(unknown)?;
                *field = text.to_string();
                Ok(())
            }
            _ => Err(unknown()),
        }
    }

    fn save(&self, path: &Path) -> Result<(), DocumentError> {
        let bytes = self.to_bytes()?;
        write_atomically(path, &bytes)
    }
}
