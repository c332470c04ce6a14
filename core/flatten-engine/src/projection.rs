//! FILENAME: core/flatten-engine/src/projection.rs
//! Projection - the tabular view over a cellset.
//!
//! One engine serves both layouts; the `Layout` tag only decides whether
//! axis 0 folds into the row address and where the value columns get their
//! names. Everything expensive happens in `Projection::new`: the schema pass
//! and the member index. Afterwards every accessor is answered from that
//! immutable state plus a single cell or member lookup.
//!
//! Accessors take `&self`, so a projection can be read from many threads at
//! once. `close` takes `&mut self`, which serializes it against readers.

use serde::{Deserialize, Serialize};

use cellset::{CellValue, Cellset, DimensionId, Member};

use crate::address::{in_bounds, CellAddressResolver, CellKey};
use crate::definition::{Layout, ProjectionOptions, ValueType};
use crate::error::{FlattenError, IndexKind, Result};
use crate::member::{resolve_context, MemberResolver};
use crate::schema::{AxisSchemaBuilder, ColumnDescriptor, ColumnKind, Schema};

// ============================================================================
// TABULAR CONTRACT
// ============================================================================

/// The row/column contract consumed by rendering and export pipelines.
pub trait TabularModel {
    fn row_count(&self) -> usize;

    fn column_count(&self) -> usize;

    fn column_name(&self, col: usize) -> Result<&str>;

    /// Type of the first row's value, or `ValueType::Any` if there is none.
    fn column_type(&self, col: usize) -> Result<ValueType>;

    /// The value at `(row, col)`; `None` when the cell is null or no member
    /// answers the column for this row.
    fn value(&self, row: usize, col: usize) -> Result<Option<CellValue>>;

    /// Releases the underlying data. Safe to call more than once.
    fn close(&mut self);
}

/// Per-cell metadata for renderers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CellMetadata {
    /// Per-axis coordinates addressed by the cell.
    pub coordinates: Vec<usize>,
    /// Server-formatted value of a value cell.
    pub formatted_value: Option<String>,
    /// Unique name of the member answering a level column.
    pub member_unique_name: Option<String>,
    /// Depth of that member's level within its hierarchy.
    pub level_depth: Option<u32>,
}

// ============================================================================
// PROJECTION
// ============================================================================

pub struct Projection<C: Cellset> {
    cellset: Option<C>,
    options: ProjectionOptions,
    schema: Schema,
    members: MemberResolver,
    resolver: CellAddressResolver,
}

impl<C: Cellset> Projection<C> {
    /// Builds a projection, scanning the cellset once.
    pub fn new(cellset: Option<C>, options: ProjectionOptions) -> Result<Self> {
        let cellset = cellset.ok_or(FlattenError::MissingCellset)?;
        let schema = AxisSchemaBuilder::new(&cellset, &options).build()?;
        let members = MemberResolver::build(&cellset);
        let resolver =
            CellAddressResolver::new(schema.layout, &schema.axis_sizes, schema.value_offset);

        Ok(Projection {
            cellset: Some(cellset),
            options,
            schema,
            members,
            resolver,
        })
    }

    pub fn banded(cellset: C) -> Result<Self> {
        Self::new(Some(cellset), ProjectionOptions::banded())
    }

    pub fn denormalized(cellset: C) -> Result<Self> {
        Self::new(Some(cellset), ProjectionOptions::denormalized())
    }

    pub fn layout(&self) -> Layout {
        self.schema.layout
    }

    pub fn options(&self) -> &ProjectionOptions {
        &self.options
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn axis_sizes(&self) -> &[usize] {
        &self.schema.axis_sizes
    }

    /// False when some axis has no positions (or there are no axes).
    pub fn has_measures(&self) -> bool {
        self.schema.has_measures
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.schema.columns
    }

    pub fn column(&self, col: usize) -> Result<&ColumnDescriptor> {
        self.schema
            .columns
            .get(col)
            .ok_or(FlattenError::IndexOutOfRange {
                kind: IndexKind::Column,
                index: col,
                count: self.schema.columns.len(),
            })
    }

    pub fn is_closed(&self) -> bool {
        self.cellset.is_none()
    }

    /// Per-axis coordinates addressed by `(row, col)`.
    pub fn cell_key(&self, row: usize, col: usize) -> Result<CellKey> {
        self.check_row(row)?;
        self.column(col)?;
        Ok(self.resolver.cell_key(row, col))
    }

    pub fn cell_metadata(&self, row: usize, col: usize) -> Result<CellMetadata> {
        let cellset = self.open()?;
        let column = self.column(col)?;
        self.check_row(row)?;
        let key = self.resolver.cell_key(row, col);

        let mut metadata = CellMetadata {
            coordinates: key.to_vec(),
            ..CellMetadata::default()
        };
        match &column.kind {
            ColumnKind::Level {
                dimension,
                axis,
                level_name,
            } => {
                if let Some(member) = self.level_member(cellset, &key, *axis, *dimension, level_name) {
                    metadata.member_unique_name = Some(member.unique_name.clone());
                    metadata.level_depth = cellset.level(member.level).map(|l| l.depth);
                }
            }
            ColumnKind::Tuple { .. } | ColumnKind::Value => {
                if in_bounds(&key, &self.schema.axis_sizes) {
                    metadata.formatted_value = cellset.get_cell(&key).formatted_value;
                }
            }
        }
        Ok(metadata)
    }

    fn open(&self) -> Result<&C> {
        self.cellset.as_ref().ok_or(FlattenError::Closed)
    }

    fn check_row(&self, row: usize) -> Result<()> {
        if row >= self.schema.row_count {
            return Err(FlattenError::IndexOutOfRange {
                kind: IndexKind::Row,
                index: row,
                count: self.schema.row_count,
            });
        }
        Ok(())
    }

    /// Member answering a level column for the tuple at `key`.
    fn level_member<'a>(
        &self,
        cellset: &'a C,
        key: &[usize],
        axis: usize,
        dimension: DimensionId,
        level_name: &str,
    ) -> Option<&'a Member> {
        let position = *key.get(axis)?;
        let candidate = self.members.resolve_member(axis, position, dimension)?;
        resolve_context(cellset, candidate, level_name).map(|(_, member)| member)
    }
}

impl<C: Cellset> TabularModel for Projection<C> {
    fn row_count(&self) -> usize {
        self.schema.row_count
    }

    fn column_count(&self) -> usize {
        self.schema.columns.len()
    }

    fn column_name(&self, col: usize) -> Result<&str> {
        self.column(col).map(|c| c.name.as_str())
    }

    fn column_type(&self, col: usize) -> Result<ValueType> {
        self.column(col)?;
        if self.schema.row_count == 0 {
            return Ok(ValueType::Any);
        }
        Ok(self
            .value(0, col)?
            .map_or(ValueType::Any, |value| ValueType::of(&value)))
    }

    fn value(&self, row: usize, col: usize) -> Result<Option<CellValue>> {
        let cellset = self.open()?;
        let column = self.column(col)?;
        self.check_row(row)?;
        let key = self.resolver.cell_key(row, col);

        match &column.kind {
            ColumnKind::Level {
                dimension,
                axis,
                level_name,
            } => Ok(self
                .level_member(cellset, &key, *axis, *dimension, level_name)
                .map(|member| CellValue::Text(member.name.clone()))),
            ColumnKind::Tuple { .. } | ColumnKind::Value => {
                // An empty axis yields coordinates that address nothing.
                if !in_bounds(&key, &self.schema.axis_sizes) {
                    return Ok(None);
                }
                Ok(cellset.get_cell(&key).into_value())
            }
        }
    }

    fn close(&mut self) {
        if let Some(mut cellset) = self.cellset.take() {
            if let Err(e) = cellset.close() {
                log::warn!("failed to release cellset: {}", e);
            }
        }
    }
}
