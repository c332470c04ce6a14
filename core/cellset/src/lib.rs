//! FILENAME: core/cellset/src/lib.rs
//! PURPOSE: Multidimensional query results as handed over by a query layer.
//! CONTEXT: Re-exports the model types and the `Cellset` trait used by the
//! flattening engine, plus an in-memory implementation.

pub mod cell;
pub mod error;
pub mod memory;
pub mod model;
pub mod source;

pub use cell::{Cell, CellValue};
pub use error::CellsetError;
pub use memory::{CellAddress, MemoryCellset};
pub use model::{
    Axis, Dimension, DimensionId, DimensionKind, Level, LevelId, Member, MemberId, Position,
};
pub use source::Cellset;
