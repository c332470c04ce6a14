//! FILENAME: core/flatten-engine/src/lib.rs
//! Cellset flattening for reporting pipelines.
//!
//! This crate turns a multidimensional result (see the `cellset` crate) into
//! a row/column table whose column set is derived from the data's hierarchy
//! depth. It supports two layouts behind one engine: Banded and Denormalized.
//!
//! Layers:
//! - `definition`: Serializable configuration (layout, naming, row flooring)
//! - `schema`: Column derivation, computed once per projection
//! - `address`: Mixed-radix row/column to cell-coordinate mapping
//! - `member`: Member lookup by dimension and ancestor walks by level
//! - `projection`: The tabular contract and its implementation
//! - `view`: Materialized, serializable snapshots for renderers

pub mod address;
pub mod definition;
pub mod error;
pub mod member;
pub mod projection;
pub mod schema;
pub mod view;

pub use address::{CellAddressResolver, CellKey};
pub use definition::*;
pub use error::{FlattenError, IndexKind, Result};
pub use member::MemberResolver;
pub use projection::{CellMetadata, Projection, TabularModel};
pub use schema::{AxisSchemaBuilder, ColumnDescriptor, ColumnKind, Schema};
pub use view::{TabularView, ViewColumn};
