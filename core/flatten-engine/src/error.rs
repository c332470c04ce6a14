//! FILENAME: core/flatten-engine/src/error.rs

use std::fmt;

use thiserror::Error;

/// Which accessor argument was out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    Row,
    Column,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKind::Row => f.write_str("row"),
            IndexKind::Column => f.write_str("column"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlattenError {
    #[error("no cellset supplied")]
    MissingCellset,

    #[error("{kind} index {index} out of range 0..{count}")]
    IndexOutOfRange {
        kind: IndexKind,
        index: usize,
        count: usize,
    },

    #[error("projection is closed")]
    Closed,

    #[error("row space of axes {axis_sizes:?} does not fit in usize")]
    RowSpaceOverflow { axis_sizes: Vec<usize> },
}

pub type Result<T> = std::result::Result<T, FlattenError>;
