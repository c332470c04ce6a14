//! FILENAME: core/cellset/src/source.rs
//! PURPOSE: The read-only contract a query layer fulfils to hand over a result.
//! CONTEXT: Consumers only ever read through this trait. Releasing the result
//! is the single mutating operation and is expected to happen exactly once.

use crate::cell::Cell;
use crate::error::CellsetError;
use crate::model::{Axis, Dimension, DimensionId, Level, LevelId, Member, MemberId};

/// A fully materialized multidimensional query result.
pub trait Cellset {
    /// Ordered axes. Axis 0 is the tuple axis, axes 1.. are cross-joined rows.
    fn axes(&self) -> &[Axis];

    /// The slicer (filter) axis, if the query had one.
    fn slicer_axis(&self) -> Option<&Axis>;

    fn member(&self, id: MemberId) -> Option<&Member>;

    fn level(&self, id: LevelId) -> Option<&Level>;

    fn dimension(&self, id: DimensionId) -> Option<&Dimension>;

    /// Returns the cell at `coordinates` (one index per axis).
    /// Unset or out-of-range coordinates yield a null cell.
    fn get_cell(&self, coordinates: &[usize]) -> Cell;

    /// Releases the underlying result.
    fn close(&mut self) -> Result<(), CellsetError>;

    /// Unique name of a member's level, if both exist.
    fn level_name_of(&self, id: MemberId) -> Option<&str> {
        let member = self.member(id)?;
        self.level(member.level).map(|l| l.unique_name.as_str())
    }
}
