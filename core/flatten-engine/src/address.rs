//! FILENAME: core/flatten-engine/src/address.rs
//! PURPOSE: Mixed-radix conversion between flat row indices and per-axis coordinates.
//! CONTEXT: Each axis acts as one digit whose base is its position count. The
//! first axis in a size slice is the least-significant digit, the last the
//! most-significant, matching the order in which row counts are multiplied.
//! Banded rows are addressed by axes 1.. only; Denormalized rows by all axes.

use smallvec::SmallVec;

use crate::definition::Layout;

/// A per-axis coordinate vector.
pub type CellKey = SmallVec<[usize; 4]>;

/// Product of all sizes, or `None` on overflow. An empty slice yields 1.
pub fn row_space(sizes: &[usize]) -> Option<usize> {
    sizes.iter().try_fold(1usize, |acc, &size| acc.checked_mul(size))
}

/// Decodes a flat index into one coordinate per entry of `sizes`.
///
/// # Arguments
/// * `index` - The flat index, expected to be below `row_space(sizes)`.
/// * `sizes` - Digit bases, least-significant first.
///
/// # Returns
/// The coordinate vector. A zero-sized axis always decodes to 0, which is
/// out of range for that axis; callers treat such coordinates as absent.
pub fn decode(index: usize, sizes: &[usize]) -> CellKey {
    let mut remainder = index;
    sizes
        .iter()
        .map(|&size| {
            if size == 0 {
                return 0;
            }
            let digit = remainder % size;
            remainder /= size;
            digit
        })
        .collect()
}

/// Encodes a coordinate vector into its flat index. Inverse of `decode`.
///
/// # Returns
/// `None` if the arity differs, a coordinate is out of range, or the index
/// does not fit in `usize`.
pub fn encode(coordinates: &[usize], sizes: &[usize]) -> Option<usize> {
    if coordinates.len() != sizes.len() {
        return None;
    }
    let mut index = 0usize;
    let mut radix = 1usize;
    for (i, (&coordinate, &size)) in coordinates.iter().zip(sizes).enumerate() {
        if coordinate >= size {
            return None;
        }
        index = index.checked_add(coordinate.checked_mul(radix)?)?;
        if i + 1 < sizes.len() {
            radix = radix.checked_mul(size)?;
        }
    }
    Some(index)
}

/// Whether every coordinate lies within its axis.
pub fn in_bounds(coordinates: &[usize], sizes: &[usize]) -> bool {
    coordinates.len() == sizes.len()
        && coordinates.iter().zip(sizes).all(|(&c, &size)| c < size)
}

// ============================================================================
// RESOLVER
// ============================================================================

/// Maps a flat (row, column) pair to a cell key for one layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellAddressResolver {
    layout: Layout,
    axis_sizes: CellKey,
    /// First Banded column belonging to the axis-0 partition.
    tuple_offset: usize,
}

impl CellAddressResolver {
    pub fn new(layout: Layout, axis_sizes: &[usize], tuple_offset: usize) -> Self {
        CellAddressResolver {
            layout,
            axis_sizes: axis_sizes.iter().copied().collect(),
            tuple_offset,
        }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn axis_sizes(&self) -> &[usize] {
        &self.axis_sizes
    }

    /// The axis sizes that participate in the row address.
    pub fn row_axes(&self) -> &[usize] {
        match self.layout {
            Layout::Banded => self.axis_sizes.get(1..).unwrap_or(&[]),
            Layout::Denormalized => &self.axis_sizes,
        }
    }

    /// Unfloored number of rows, or `None` on overflow.
    pub fn row_space(&self) -> Option<usize> {
        row_space(self.row_axes())
    }

    /// Computes the per-axis coordinates addressed by `(row, col)`.
    ///
    /// For Banded columns left of the axis-0 partition the axis-0 coordinate
    /// is meaningless and set to 0; those columns are answered from members.
    pub fn cell_key(&self, row: usize, col: usize) -> CellKey {
        if self.axis_sizes.is_empty() {
            return CellKey::new();
        }
        match self.layout {
            Layout::Banded => {
                let mut key = CellKey::with_capacity(self.axis_sizes.len());
                key.push(col.saturating_sub(self.tuple_offset));
                key.extend(decode(row, self.row_axes()));
                key
            }
            Layout::Denormalized => decode(row, &self.axis_sizes),
        }
    }

    /// Inverse of `cell_key` for the row part: the row addressing `key`.
    pub fn row_of(&self, key: &[usize]) -> Option<usize> {
        match self.layout {
            Layout::Banded => encode(key.get(1..)?, self.row_axes()),
            Layout::Denormalized => encode(key, &self.axis_sizes),
        }
    }
}
