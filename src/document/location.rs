use std::fmt;

/// Sheet a location belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SheetRef {
    /// Zero-based position of the sheet in the document
    pub position: usize,
    /// Display name of the sheet
    pub name: String,
}

impl SheetRef {
    pub fn new(position: usize, name: impl Into<String>) -> Self {
        Self {
            position,
            name: name.into(),
        }
    }
}

/// Where a text fragment came from inside one document
///
/// Only used as a write-back key. Rows, columns and shape indices are the
/// document's own numbering.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TextLocation {
    /// A worksheet cell
    Cell {
        sheet: SheetRef,
        row: u32,
        col: u32,
    },
    /// A floating text shape
    Shape {
        sheet: SheetRef,
        index: u32,
    },
}

impl TextLocation {
    pub fn cell(sheet: SheetRef, row: u32, col: u32) -> Self {
        Self::Cell { sheet, row, col }
    }

    pub fn shape(sheet: SheetRef, index: u32) -> Self {
        Self::Shape { sheet, index }
    }

    pub fn sheet(&self) -> &SheetRef {
        match self {
            Self::Cell { sheet, .. } | Self::Shape { sheet, .. } => sheet,
        }
    }
}

impl fmt::Display for TextLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cell { sheet, row, col } => write!(f, "{}!R{}C{}", sheet.name, row, col),
            Self::Shape { sheet, index } => write!(f, "{}#shape{}", sheet.name, index),
        }
    }
}
