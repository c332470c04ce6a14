//! FILENAME: core/cellset/src/cell.rs
//! PURPOSE: Defines the addressable cells of a multidimensional result.
//! CONTEXT: A cell carries the raw scalar produced by the query layer and, when
//! the server supplied one, its pre-formatted display string. The scalar is
//! handed to renderers unmodified; no coercion happens here.

use serde::{Deserialize, Serialize};

/// The raw scalar stored in a cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
    Boolean(bool),
    Error(String),
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Empty
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Boolean(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

/// One cell of the cellset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub value: CellValue,
    pub formatted_value: Option<String>,
}

impl Cell {
    /// A null cell. Returned for unset or out-of-range coordinates.
    pub fn null() -> Self {
        Cell {
            value: CellValue::Empty,
            formatted_value: None,
        }
    }

    pub fn new(value: impl Into<CellValue>) -> Self {
        Cell {
            value: value.into(),
            formatted_value: None,
        }
    }

    pub fn with_formatted_value(mut self, formatted: impl Into<String>) -> Self {
        self.formatted_value = Some(formatted.into());
        self
    }

    pub fn is_null(&self) -> bool {
        self.value.is_empty()
    }

    /// Consumes the cell, yielding its scalar or `None` for a null cell.
    pub fn into_value(self) -> Option<CellValue> {
        if self.is_null() {
            None
        } else {
            Some(self.value)
        }
    }
}
