//! FILENAME: core/flatten-engine/src/schema.rs
//! Axis Schema - derives the column layout of a projection from the data.
//!
//! The column set is not known statically: it depends on how deep the
//! hierarchies on each row axis go. The builder scans the cellset once:
//!
//! 1. Sizing pass, per row axis: for every member slot within a position,
//!    record the deepest hierarchy seen and the dimension that produced it.
//!    On equal depth the later position wins. The sum of the per-slot maxima
//!    is the axis's column count.
//! 2. Labelling pass, per row axis: collect each slot's level unique names in
//!    first-seen order. When the label count disagrees with the sizing pass
//!    a warning is logged and the sizing pass stays authoritative.
//! 3. Axis 0: one column per position (Banded) or a single value column
//!    (Denormalized).
//!
//! Row axes are emitted from the highest index down to 1, followed by the
//! axis-0 / value columns.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use cellset::{Axis, Cellset, DimensionId, DimensionKind};

use crate::address::row_space;
use crate::definition::{Layout, ProjectionOptions};
use crate::error::{FlattenError, Result};
use crate::member::{hierarchy_depth, level_path};

// ============================================================================
// COLUMN DESCRIPTORS
// ============================================================================

/// What a column's values come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    /// A hierarchy level of a row-axis dimension.
    Level {
        dimension: DimensionId,
        axis: usize,
        level_name: String,
    },
    /// Cells of one axis-0 position (Banded).
    Tuple { position: usize },
    /// The single measure column (Denormalized, or a degenerate cellset).
    Value,
}

/// Describes one column of the projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub ordinal: usize,
    /// Display name: a level unique name, a joined tuple caption or a measure name.
    pub name: String,
    pub kind: ColumnKind,
}

impl ColumnDescriptor {
    pub fn dimension(&self) -> Option<DimensionId> {
        match self.kind {
            ColumnKind::Level { dimension, .. } => Some(dimension),
            _ => None,
        }
    }

    pub fn axis(&self) -> Option<usize> {
        match self.kind {
            ColumnKind::Level { axis, .. } => Some(axis),
            ColumnKind::Tuple { .. } => Some(0),
            ColumnKind::Value => None,
        }
    }

    /// Whether the column is answered from cells rather than members.
    pub fn is_value(&self) -> bool {
        !matches!(self.kind, ColumnKind::Level { .. })
    }
}

// ============================================================================
// SCHEMA
// ============================================================================

/// The immutable result of the schema pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub layout: Layout,
    /// Position count per axis.
    pub axis_sizes: SmallVec<[usize; 4]>,
    pub columns: Vec<ColumnDescriptor>,
    pub row_count: usize,
    /// Index of the first non-level column.
    pub value_offset: usize,
    /// False when the cellset has no axes or some axis has no positions.
    pub has_measures: bool,
}

impl Schema {
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

/// Sizing-pass summary of one member slot on a row axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct SlotSummary {
    max_depth: usize,
    dimension: Option<DimensionId>,
}

// ============================================================================
// BUILDER
// ============================================================================

pub struct AxisSchemaBuilder<'a, C: ?Sized> {
    cellset: &'a C,
    options: &'a ProjectionOptions,
}

impl<'a, C: Cellset + ?Sized> AxisSchemaBuilder<'a, C> {
    pub fn new(cellset: &'a C, options: &'a ProjectionOptions) -> Self {
        AxisSchemaBuilder { cellset, options }
    }

    pub fn build(&self) -> Result<Schema> {
        let layout = self.options.layout;
        let axes = self.cellset.axes();
        let axis_sizes: SmallVec<[usize; 4]> =
            axes.iter().map(Axis::position_count).collect();

        if axes.is_empty() {
            return Ok(self.degenerate(layout, axis_sizes, false));
        }

        let has_measures = axis_sizes.iter().all(|&size| size > 0);
        let row_axes = match layout {
            Layout::Banded => &axis_sizes[1..],
            Layout::Denormalized => &axis_sizes[..],
        };
        let raw_rows = row_space(row_axes).ok_or_else(|| FlattenError::RowSpaceOverflow {
            axis_sizes: axis_sizes.to_vec(),
        })?;

        let mut columns = Vec::new();
        for axis_index in (1..axes.len()).rev() {
            self.push_axis_columns(axis_index, &axes[axis_index], &mut columns);
        }
        let value_offset = columns.len();

        match layout {
            Layout::Banded => {
                for (position_index, position) in axes[0].positions.iter().enumerate() {
                    let caption = position
                        .members
                        .iter()
                        .filter_map(|&id| self.cellset.member(id))
                        .map(|m| m.name.as_str())
                        .collect::<Vec<_>>()
                        .join(self.options.member_separator.as_str());
                    columns.push(ColumnDescriptor {
                        ordinal: columns.len(),
                        name: caption,
                        kind: ColumnKind::Tuple {
                            position: position_index,
                        },
                    });
                }
            }
            Layout::Denormalized => {
                columns.push(ColumnDescriptor {
                    ordinal: columns.len(),
                    name: self.measure_name(),
                    kind: ColumnKind::Value,
                });
            }
        }

        if columns.is_empty() {
            return Ok(self.degenerate(layout, axis_sizes, has_measures));
        }

        let row_count = if raw_rows > 0 || (!has_measures && self.options.empty_rows_without_measures) {
            raw_rows
        } else {
            1
        };

        log::debug!(
            "built {:?} schema: axis sizes {:?}, {} rows x {} columns",
            layout,
            axis_sizes.as_slice(),
            row_count,
            columns.len()
        );

        Ok(Schema {
            layout,
            axis_sizes,
            columns,
            row_count,
            value_offset,
            has_measures,
        })
    }

    /// A single synthetic measure column over one row.
    fn degenerate(
        &self,
        layout: Layout,
        axis_sizes: SmallVec<[usize; 4]>,
        has_measures: bool,
    ) -> Schema {
        log::debug!(
            "degenerate cellset (axis sizes {:?}); emitting a single '{}' column",
            axis_sizes.as_slice(),
            self.options.default_measure_name
        );
        Schema {
            layout,
            axis_sizes,
            columns: vec![ColumnDescriptor {
                ordinal: 0,
                name: self.options.default_measure_name.clone(),
                kind: ColumnKind::Value,
            }],
            row_count: 1,
            value_offset: 0,
            has_measures,
        }
    }

    /// Sizing pass for one row axis.
    fn size_axis(&self, axis: &Axis) -> Vec<SlotSummary> {
        let mut slots: Vec<SlotSummary> = Vec::new();
        for position in &axis.positions {
            for (slot, &id) in position.members.iter().enumerate() {
                let Some(member) = self.cellset.member(id) else {
                    continue;
                };
                let depth = hierarchy_depth(self.cellset, id);
                if slots.len() <= slot {
                    slots.resize(slot + 1, SlotSummary::default());
                }
                let summary = &mut slots[slot];
                // Ties go to the later position.
                if depth > 0 && depth >= summary.max_depth {
                    summary.max_depth = depth;
                    summary.dimension = Some(member.dimension);
                }
            }
        }
        slots
    }

    /// Labelling pass for one row axis: first-seen level names per slot.
    fn label_axis(&self, axis: &Axis, slot_count: usize) -> Vec<Vec<String>> {
        let mut labels: Vec<Vec<String>> = vec![Vec::new(); slot_count];
        for position in &axis.positions {
            for (slot, &id) in position.members.iter().enumerate().take(slot_count) {
                for name in level_path(self.cellset, id) {
                    if !labels[slot].iter().any(|seen| seen == name) {
                        labels[slot].push(name.to_string());
                    }
                }
            }
        }
        labels
    }

    fn push_axis_columns(
        &self,
        axis_index: usize,
        axis: &Axis,
        columns: &mut Vec<ColumnDescriptor>,
    ) {
        let slots = self.size_axis(axis);
        let mut labels = self.label_axis(axis, slots.len());

        let width: usize = slots.iter().map(|s| s.max_depth).sum();
        let labelled: usize = labels.iter().map(Vec::len).sum();
        if labelled != width {
            log::warn!(
                "axis {}: found {} level names for {} sized columns; keeping the sized layout",
                axis_index,
                labelled,
                width
            );
        }

        for (slot, summary) in slots.iter().enumerate() {
            let Some(dimension) = summary.dimension else {
                continue;
            };
            let names = &mut labels[slot];
            names.truncate(summary.max_depth);
            while names.len() < summary.max_depth {
                let placeholder = self.placeholder_name(dimension, names.len());
                names.push(placeholder);
            }
            for level_name in names.drain(..) {
                columns.push(ColumnDescriptor {
                    ordinal: columns.len(),
                    name: level_name.clone(),
                    kind: ColumnKind::Level {
                        dimension,
                        axis: axis_index,
                        level_name,
                    },
                });
            }
        }
    }

    /// Name for a sized column that received no level label.
    fn placeholder_name(&self, dimension: DimensionId, index: usize) -> String {
        let base = self
            .cellset
            .dimension(dimension)
            .map_or("[Unknown]", |d| d.unique_name.as_str());
        format!("{}.#{}", base, index)
    }

    /// Caption of the first measure member on the slicer axis.
    fn measure_name(&self) -> String {
        self.cellset
            .slicer_axis()
            .into_iter()
            .flat_map(|axis| axis.positions.iter())
            .flat_map(|position| position.members.iter())
            .filter_map(|&id| self.cellset.member(id))
            .find(|member| {
                self.cellset
                    .dimension(member.dimension)
                    .map_or(false, |d| d.kind == DimensionKind::Measures)
            })
            .map(|member| member.name.clone())
            .unwrap_or_else(|| self.options.default_measure_name.clone())
    }
}
