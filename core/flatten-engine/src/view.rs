//! FILENAME: core/flatten-engine/src/view.rs
//! Tabular View - a materialized snapshot for renderers.
//!
//! A projection answers cells lazily. Renderers that want the whole table at
//! once (or a page of it) take a `TabularView`: every value resolved up front,
//! with enough column metadata to format the headers.

use serde::{Deserialize, Serialize};

use cellset::{CellValue, Cellset};

use crate::definition::ValueType;
use crate::error::Result;
use crate::projection::{Projection, TabularModel};

// ============================================================================
// COLUMNS
// ============================================================================

/// Header information for one view column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewColumn {
    /// Index of this column in the view.
    pub view_col: usize,

    pub name: String,

    pub value_type: ValueType,

    /// Axis the column's members come from, if it is a level column.
    pub axis: Option<usize>,

    /// Whether the column holds cell values rather than member captions.
    pub is_value: bool,
}

// ============================================================================
// MAIN VIEW STRUCT
// ============================================================================

/// The complete materialized table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabularView {
    pub columns: Vec<ViewColumn>,

    /// Indexed as rows[row][col]. `None` marks an absent value.
    pub rows: Vec<Vec<Option<CellValue>>>,

    pub row_count: usize,

    pub col_count: usize,

    /// Indicates if the view is a partial/windowed view.
    pub is_windowed: bool,

    /// For windowed views: the full row count.
    pub total_row_count: Option<usize>,

    /// For windowed views: the starting row index.
    pub window_start_row: Option<usize>,
}

impl TabularView {
    /// Reads every value of `model`.
    pub fn from_model<M: TabularModel + ?Sized>(model: &M) -> Result<Self> {
        let col_count = model.column_count();
        let mut columns = Vec::with_capacity(col_count);
        for col in 0..col_count {
            columns.push(ViewColumn {
                view_col: col,
                name: model.column_name(col)?.to_string(),
                value_type: model.column_type(col)?,
                axis: None,
                is_value: true,
            });
        }

        let row_count = model.row_count();
        let mut rows = Vec::with_capacity(row_count);
        for row in 0..row_count {
            let mut values = Vec::with_capacity(col_count);
            for col in 0..col_count {
                values.push(model.value(row, col)?);
            }
            rows.push(values);
        }

        Ok(TabularView {
            columns,
            rows,
            row_count,
            col_count,
            is_windowed: false,
            total_row_count: None,
            window_start_row: None,
        })
    }

    /// Gets a value at the specified position. `None` if out of range or absent.
    pub fn get(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row)?.get(col)?.as_ref()
    }

    /// Creates a windowed subset of the view for paged rendering.
    pub fn window(&self, start_row: usize, row_count: usize) -> TabularView {
        let start = start_row.min(self.rows.len());
        let end = start.saturating_add(row_count).min(self.rows.len());

        TabularView {
            columns: self.columns.clone(),
            rows: self.rows[start..end].to_vec(),
            row_count: end - start,
            col_count: self.col_count,
            is_windowed: true,
            total_row_count: Some(self.total_row_count.unwrap_or(self.row_count)),
            window_start_row: Some(self.window_start_row.unwrap_or(0) + start),
        }
    }
}

impl<C: Cellset> Projection<C> {
    /// Materializes the projection, annotating columns with their origin.
    pub fn to_view(&self) -> Result<TabularView> {
        let mut view = TabularView::from_model(self)?;
        for (column, descriptor) in view.columns.iter_mut().zip(self.columns()) {
            column.axis = descriptor.axis();
            column.is_value = descriptor.is_value();
        }
        Ok(view)
    }
}
