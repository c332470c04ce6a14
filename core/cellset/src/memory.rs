//! FILENAME: core/cellset/src/memory.rs
//! PURPOSE: An in-memory `Cellset` with a builder-style API.
//! CONTEXT: Hosts that receive results as plain data (and every test in this
//! workspace) assemble cellsets here. Cells are stored sparsely: most cells of
//! a cross-joined result are usually empty, so only set cells take memory.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::cell::Cell;
use crate::error::CellsetError;
use crate::model::{
    Axis, Dimension, DimensionId, DimensionKind, Level, LevelId, Member, MemberId, Position,
};
use crate::source::Cellset;

/// A cell address: one index per axis.
pub type CellAddress = SmallVec<[usize; 4]>;

#[derive(Debug, Clone, Default)]
pub struct MemoryCellset {
    dimensions: Vec<Dimension>,
    levels: Vec<Level>,
    members: Vec<Member>,
    axes: Vec<Axis>,
    slicer: Option<Axis>,
    /// Sparse storage: keys are full cell addresses.
    cells: FxHashMap<CellAddress, Cell>,
    closed: bool,
}

impl MemoryCellset {
    /// Creates a new, empty cellset with no axes.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_dimension(
        &mut self,
        unique_name: impl Into<String>,
        name: impl Into<String>,
        kind: DimensionKind,
    ) -> DimensionId {
        let id = self.dimensions.len() as DimensionId;
        self.dimensions.push(Dimension {
            unique_name: unique_name.into(),
            name: name.into(),
            kind,
        });
        id
    }

    pub fn add_level(
        &mut self,
        unique_name: impl Into<String>,
        name: impl Into<String>,
        depth: u32,
    ) -> LevelId {
        let id = self.levels.len() as LevelId;
        self.levels.push(Level {
            unique_name: unique_name.into(),
            name: name.into(),
            depth,
        });
        id
    }

    /// Adds a member. Every referenced id must already exist, so members
    /// added through this method always form acyclic chains.
    pub fn add_member(
        &mut self,
        name: impl Into<String>,
        unique_name: impl Into<String>,
        dimension: DimensionId,
        level: LevelId,
        parent: Option<MemberId>,
    ) -> Result<MemberId, CellsetError> {
        if self.dimensions.get(dimension as usize).is_none() {
            return Err(CellsetError::UnknownDimension(dimension));
        }
        if self.levels.get(level as usize).is_none() {
            return Err(CellsetError::UnknownLevel(level));
        }
        if let Some(p) = parent {
            self.check_member(p)?;
        }

        let id = self.members.len() as MemberId;
        self.members.push(Member {
            name: name.into(),
            unique_name: unique_name.into(),
            dimension,
            level,
            parent,
        });
        Ok(id)
    }

    /// Re-links a member to a new parent. No cycle check is performed.
    pub fn set_parent(
        &mut self,
        member: MemberId,
        parent: Option<MemberId>,
    ) -> Result<(), CellsetError> {
        if let Some(p) = parent {
            self.check_member(p)?;
        }
        self.check_member(member)?;
        self.members[member as usize].parent = parent;
        Ok(())
    }

    /// Appends an axis built from per-position member lists. Returns its index.
    pub fn add_axis<P, I>(&mut self, positions: P) -> Result<usize, CellsetError>
    where
        P: IntoIterator<Item = I>,
        I: IntoIterator<Item = MemberId>,
    {
        let axis = self.build_axis(positions)?;
        self.axes.push(axis);
        Ok(self.axes.len() - 1)
    }

    /// Sets the slicer axis as a single position holding `members`.
    pub fn set_slicer(
        &mut self,
        members: impl IntoIterator<Item = MemberId>,
    ) -> Result<(), CellsetError> {
        let axis = self.build_axis(std::iter::once(members))?;
        self.slicer = Some(axis);
        Ok(())
    }

    /// Stores a cell. The address must have one coordinate per axis.
    pub fn set_cell(&mut self, coordinates: &[usize], cell: Cell) -> Result<(), CellsetError> {
        if coordinates.len() != self.axes.len() {
            return Err(CellsetError::Dimensionality {
                expected: self.axes.len(),
                actual: coordinates.len(),
            });
        }
        self.cells.insert(coordinates.iter().copied().collect(), cell);
        Ok(())
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn check_member(&self, id: MemberId) -> Result<(), CellsetError> {
        if self.members.get(id as usize).is_none() {
            return Err(CellsetError::UnknownMember(id));
        }
        Ok(())
    }

    fn build_axis<P, I>(&self, positions: P) -> Result<Axis, CellsetError>
    where
        P: IntoIterator<Item = I>,
        I: IntoIterator<Item = MemberId>,
    {
        let mut built = Vec::new();
        for members in positions {
            let position = Position::new(members);
            for &id in &position.members {
                self.check_member(id)?;
            }
            built.push(position);
        }
        Ok(Axis::new(built))
    }
}

impl Cellset for MemoryCellset {
    fn axes(&self) -> &[Axis] {
        &self.axes
    }

    fn slicer_axis(&self) -> Option<&Axis> {
        self.slicer.as_ref()
    }

    fn member(&self, id: MemberId) -> Option<&Member> {
        self.members.get(id as usize)
    }

    fn level(&self, id: LevelId) -> Option<&Level> {
        self.levels.get(id as usize)
    }

    fn dimension(&self, id: DimensionId) -> Option<&Dimension> {
        self.dimensions.get(id as usize)
    }

    fn get_cell(&self, coordinates: &[usize]) -> Cell {
        self.cells.get(coordinates).cloned().unwrap_or_else(Cell::null)
    }

    fn close(&mut self) -> Result<(), CellsetError> {
        if self.closed {
            return Err(CellsetError::AlreadyClosed);
        }
        self.closed = true;
        self.cells = FxHashMap::default();
        self.axes.clear();
        self.slicer = None;
        self.members.clear();
        self.levels.clear();
        self.dimensions.clear();
        Ok(())
    }
}
