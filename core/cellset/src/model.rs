//! FILENAME: core/cellset/src/model.rs
//! Cellset model - axes, positions and the hierarchy objects they reference.
//!
//! Dimensions, levels and members are interned once per cellset and referenced
//! by compact ids, so positions stay small and a member's parent link is just
//! another id. Nothing here enforces that parent chains are acyclic; consumers
//! that walk them must guard against malformed input.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Index of a dimension within its cellset.
pub type DimensionId = u32;

/// Index of a level within its cellset.
pub type LevelId = u32;

/// Index of a member within its cellset.
pub type MemberId = u32;

// ============================================================================
// HIERARCHY OBJECTS
// ============================================================================

/// Distinguishes the measures dimension from ordinary ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DimensionKind {
    Regular,
    Time,
    Measures,
}

impl Default for DimensionKind {
    fn default() -> Self {
        DimensionKind::Regular
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    /// Stable identifier, e.g. `[Time]`.
    pub unique_name: String,
    pub name: String,
    pub kind: DimensionKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    /// Stable identifier used as a column label, e.g. `[Time].[Year]`.
    pub unique_name: String,
    pub name: String,
    /// Rank within the hierarchy (0 = top level).
    pub depth: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Caption shown in reports, e.g. `2022`.
    pub name: String,
    pub unique_name: String,
    pub dimension: DimensionId,
    pub level: LevelId,
    /// Link toward the hierarchy root.
    pub parent: Option<MemberId>,
}

// ============================================================================
// AXES
// ============================================================================

/// One coordinate along an axis: one member per participating dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub members: SmallVec<[MemberId; 4]>,
}

impl Position {
    pub fn new(members: impl IntoIterator<Item = MemberId>) -> Self {
        Position {
            members: members.into_iter().collect(),
        }
    }
}

/// An ordered list of positions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Axis {
    pub positions: Vec<Position>,
}

impl Axis {
    pub fn new(positions: Vec<Position>) -> Self {
        Axis { positions }
    }

    pub fn position_count(&self) -> usize {
        self.positions.len()
    }

    pub fn position(&self, index: usize) -> Option<&Position> {
        self.positions.get(index)
    }
}
