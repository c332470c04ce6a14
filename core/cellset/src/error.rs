//! FILENAME: core/cellset/src/error.rs

use thiserror::Error;

use crate::model::MemberId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CellsetError {
    #[error("cellset already closed")]
    AlreadyClosed,

    #[error("failed to release cellset: {0}")]
    Release(String),

    #[error("cell address has {actual} coordinates, cellset has {expected} axes")]
    Dimensionality { expected: usize, actual: usize },

    #[error("unknown member id {0}")]
    UnknownMember(MemberId),

    #[error("unknown level id {0}")]
    UnknownLevel(u32),

    #[error("unknown dimension id {0}")]
    UnknownDimension(u32),
}
