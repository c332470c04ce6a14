//! FILENAME: core/flatten-engine/src/definition.rs
//! Projection Definition - The serializable configuration.
//!
//! These types describe HOW a cellset should be flattened. They are plain
//! data so a host can persist them alongside a report definition; every
//! field has a default, so partial documents deserialize.

use serde::{Deserialize, Serialize};
use cellset::CellValue;

// ============================================================================
// LAYOUT
// ============================================================================

/// The two flattening conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layout {
    /// Axis-0 tuples become parallel value columns; rows cross-join axes 1..
    Banded,
    /// Every axis, axis 0 included, is cross-joined into rows next to a
    /// single value column.
    Denormalized,
}

impl Default for Layout {
    fn default() -> Self {
        Layout::Banded
    }
}

// ============================================================================
// OPTIONS
// ============================================================================

/// Configuration of a projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionOptions {
    pub layout: Layout,

    /// Name of the value column when the slicer carries no measure, and of
    /// the synthetic column produced for a degenerate cellset.
    pub default_measure_name: String,

    /// Joins axis-0 member names into Banded column names.
    pub member_separator: String,

    /// Allows `row_count() == 0` when some axis has no positions.
    /// Off by default: the row count is floored to 1.
    pub empty_rows_without_measures: bool,
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        ProjectionOptions {
            layout: Layout::Banded,
            default_measure_name: "Measure".to_string(),
            member_separator: "/".to_string(),
            empty_rows_without_measures: false,
        }
    }
}

impl ProjectionOptions {
    pub fn banded() -> Self {
        Self::default()
    }

    pub fn denormalized() -> Self {
        ProjectionOptions {
            layout: Layout::Denormalized,
            ..Self::default()
        }
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }
}

// ============================================================================
// COLUMN TYPES
// ============================================================================

/// Runtime type of a column, derived from its first value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    /// Generic marker used when no typed value is available.
    Any,
    Number,
    Text,
    Boolean,
    Error,
}

impl ValueType {
    pub fn of(value: &CellValue) -> Self {
        match value {
            CellValue::Empty => ValueType::Any,
            CellValue::Number(_) => ValueType::Number,
            CellValue::Text(_) => ValueType::Text,
            CellValue::Boolean(_) => ValueType::Boolean,
            CellValue::Error(_) => ValueType::Error,
        }
    }
}

impl Default for ValueType {
    fn default() -> Self {
        ValueType::Any
    }
}
