/*!
 * JSON workbook documents.
 *
 * A workbook file looks like:
 *
 * ```json
 * {
 *   "sheets": [
 *     {
 *       "name": "Sheet1",
 *       "cells": [ { "row": 1, "col": 1, "value": "Hello", "style": { "bold": true } } ],
 *       "shapes": [ { "index": 1, "text": "Note", "kind": "textbox" } ]
 *     }
 *   ]
 * }
 * ```
 *
 * Only string cell values and shape texts are text-bearing. Any field this
 * module does not know about is carried through unchanged on save, and an
 * explicit `null` stays `null` rather than disappearing.
 */

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

use crate::errors::DocumentError;

use super::location::{SheetRef, TextLocation};
use super::{Document, write_atomically};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WorkbookData {
    #[serde(default)]
    sheets: Vec<SheetData>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SheetData {
    name: String,
    #[serde(default)]
    cells: Vec<CellData>,
    #[serde(default)]
    shapes: Vec<ShapeData>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CellData {
    row: u32,
    col: u32,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    value: Option<Value>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ShapeData {
    index: u32,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    text: Option<Value>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

// None when the field is absent, Some(Value::Null) for an explicit null
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// A workbook loaded from a JSON file
#[derive(Debug, Clone)]
pub struct JsonWorkbook {
    name: String,
    data: WorkbookData,
}

impl JsonWorkbook {
    /// Read and parse a workbook file
    pub fn open(path: &Path) -> Result<Self, DocumentError> {
        let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Self::parse(&name, &content)
    }

    /// Parse a workbook from JSON text
    pub fn parse(name: &str, content: &str) -> Result<Self, DocumentError> {
        let data: WorkbookData =
            serde_json::from_str(content).map_err(|e| DocumentError::Malformed {
                path: name.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self {
            name: name.to_string(),
            data,
        })
    }

    /// Serialize the workbook back to pretty JSON
    pub fn to_json_string(&self) -> Result<String, DocumentError> {
        serde_json::to_string_pretty(&self.data).map_err(|e| DocumentError::Malformed {
            path: self.name.clone(),
            message: e.to_string(),
        })
    }

    /// Raw value of a cell, if the cell exists
    pub fn cell_value(&self, sheet: usize, row: u32, col: u32) -> Option<&Value> {
        self.data
            .sheets
            .get(sheet)?
            .cells
            .iter()
            .find(|c| c.row == row && c.col == col)
            .and_then(|c| c.value.as_ref())
    }

    /// Text of a shape, if the shape exists and has text
    pub fn shape_text(&self, sheet: usize, index: u32) -> Option<&str> {
        self.data
            .sheets
            .get(sheet)?
            .shapes
            .iter()
            .find(|s| s.index == index)
            .and_then(|s| s.text.as_ref())
            .and_then(Value::as_str)
    }

    pub fn sheet_count(&self) -> usize {
        self.data.sheets.len()
    }
}

impl Document for JsonWorkbook {
    fn name(&self) -> &str {
        &self.name
    }

    fn text_locations(&self) -> Vec<(TextLocation, String)> {
        let mut locations = Vec::new();

        for (position, sheet) in self.data.sheets.iter().enumerate() {
            let sheet_ref = SheetRef::new(position, sheet.name.clone());

            let mut cells: Vec<&CellData> = sheet
                .cells
                .iter()
                .filter(|c| matches!(c.value, Some(Value::String(_))))
                .collect();
            cells.sort_by_key(|c| (c.row, c.col));
            for cell in cells {
                if let Some(Value::String(text)) = &cell.value {
                    locations.push((
                        TextLocation::cell(sheet_ref.clone(), cell.row, cell.col),
                        text.clone(),
                    ));
                }
            }

            let mut shapes: Vec<&ShapeData> = sheet
                .shapes
                .iter()
                .filter(|s| matches!(s.text, Some(Value::String(_))))
                .collect();
            shapes.sort_by_key(|s| s.index);
            for shape in shapes {
                if let Some(Value::String(text)) = &shape.text {
                    locations.push((TextLocation::shape(sheet_ref.clone(), shape.index), text.clone()));
                }
            }
        }

        locations
    }

    fn set_text(&mut self, location: &TextLocation, text: &str) -> Result<(), DocumentError> {
        let sheet = self
            .data
            .sheets
            .get_mut(location.sheet().position)
            .ok_or_else(|| DocumentError::UnknownLocation(location.to_string()))?;

        match location {
            TextLocation::Cell { row, col, .. } => {
                let cell = sheet
                    .cells
                    .iter_mut()
                    .find(|c| c.row == *row && c.col == *col)
                    .ok_or_else(|| DocumentError::UnknownLocation(location.to_string()))?;
                cell.value = Some(Value::String(text.to_string()));
            }
            TextLocation::Shape { index, .. } => {
                let shape = sheet
                    .shapes
                    .iter_mut()
                    .find(|s| s.index == *index)
                    .ok_or_else(|| DocumentError::UnknownLocation(location.to_string()))?;
                shape.text = Some(Value::String(text.to_string()));
            }
        }

        Ok(())
    }

    fn save(&self, path: &Path) -> Result<(), DocumentError> {
        let json = self.to_json_string()?;
        write_atomically(path, json.as_bytes())
    }
}
