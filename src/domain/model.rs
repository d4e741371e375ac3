use crate::domain::schema::{column_index, COLUMN_COUNT, PRINEX_COLUMNS};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use std::fmt;

/// A single scalar cell, either read from the export or written to the template.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(value) => f.write_str(value),
            // f64 Display already drops the fraction of integral values: 100.0 -> "100"
            CellValue::Number(value) => write!(f, "{}", value),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Empty => serializer.serialize_str(""),
            CellValue::Text(value) => serializer.serialize_str(value),
            CellValue::Number(value) => serializer.serialize_f64(*value),
        }
    }
}

/// One row of the Payhawk export, addressed by trimmed header name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputRecord {
    pub data: HashMap<String, CellValue>,
}

impl InputRecord {
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.data.get(column)
    }

    /// Source value as an exact-match string; numbers and blanks never match a label.
    pub fn label(&self, column: &str) -> Option<&str> {
        self.get(column).and_then(CellValue::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceTable {
    pub headers: Vec<String>,
    pub records: Vec<InputRecord>,
}

impl SourceTable {
    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|header| header == column)
    }
}

/// One row of the Prinex template. Always holds exactly one cell per template column.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRecord {
    cells: Vec<CellValue>,
}

impl Default for OutputRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputRecord {
    pub fn new() -> Self {
        Self {
            cells: vec![CellValue::Empty; COLUMN_COUNT],
        }
    }

    /// Writes a template column. Names outside the template are ignored.
    pub fn set(&mut self, column: &str, value: CellValue) {
        match column_index(column) {
            Some(index) => self.cells[index] = value,
            None => tracing::warn!("Ignoring value for unknown template column '{}'", column),
        }
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        column_index(column).map(|index| &self.cells[index])
    }

    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    /// (column name, value) pairs in template order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &CellValue)> {
        PRINEX_COLUMNS.iter().copied().zip(self.cells.iter())
    }
}

impl Serialize for OutputRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(COLUMN_COUNT))?;
        for (column, value) in self.iter() {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// A receipt or invoice carried through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFile {
    pub name: String,
    pub content: Vec<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct ExtractedBundle {
    pub table: SourceTable,
    pub documents: Vec<DocumentFile>,
}

#[derive(Debug, Clone, Default)]
pub struct TransformResult {
    pub records: Vec<OutputRecord>,
    pub documents: Vec<DocumentFile>,
}

/// Everything a caller needs after a successful run; nothing is retained by the engine.
#[derive(Debug, Clone)]
pub struct ConversionOutput {
    pub bundle_name: String,
    pub bundle_bytes: Vec<u8>,
    pub preview: Vec<OutputRecord>,
    pub record_count: usize,
    pub document_count: usize,
}
