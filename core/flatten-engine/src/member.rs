//! FILENAME: core/flatten-engine/src/member.rs
//! Member resolution - finding the member that answers a hierarchy column.
//!
//! Two lookups back every dimension column:
//! - `MemberResolver::resolve_member` picks the member of a given dimension
//!   at a given axis position. The per-position dimension index is built once
//!   up front; the first member of a dimension within a position wins.
//! - `resolve_context` walks a member and its ancestors until it reaches the
//!   requested level. A miss is an ordinary outcome (a shallower tuple simply
//!   has no member at a deeper level), so it is reported as `None`.
//!
//! Parent links come from the cellset and are not trusted to be acyclic:
//! every walk goes through `Ancestors`, which stops at the first revisit.

use rustc_hash::{FxHashMap, FxHashSet};

use cellset::{Axis, Cellset, DimensionId, Member, MemberId};

// ============================================================================
// ANCESTOR WALK
// ============================================================================

/// Iterator over a member and its ancestors, nearest first.
pub struct Ancestors<'a, C: ?Sized> {
    cellset: &'a C,
    next: Option<MemberId>,
    visited: FxHashSet<MemberId>,
}

impl<'a, C: Cellset + ?Sized> Iterator for Ancestors<'a, C> {
    type Item = (MemberId, &'a Member);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next.take()?;
        if !self.visited.insert(id) {
            log::trace!("parent chain revisits member {}; stopping walk", id);
            return None;
        }
        let member = self.cellset.member(id)?;
        self.next = member.parent;
        Some((id, member))
    }
}

/// Walks `member` and its ancestor chain (inclusive).
pub fn ancestors<C: Cellset + ?Sized>(cellset: &C, member: MemberId) -> Ancestors<'_, C> {
    Ancestors {
        cellset,
        next: Some(member),
        visited: FxHashSet::default(),
    }
}

/// Distinct level unique names on the chain from the hierarchy root down to `member`.
pub fn level_path<C: Cellset + ?Sized>(cellset: &C, member: MemberId) -> Vec<&str> {
    let mut path: Vec<&str> = Vec::new();
    for (id, _) in ancestors(cellset, member) {
        if let Some(name) = cellset.level_name_of(id) {
            if !path.contains(&name) {
                path.push(name);
            }
        }
    }
    path.reverse();
    path
}

/// Number of distinct levels between `member` and its root, inclusive.
pub fn hierarchy_depth<C: Cellset + ?Sized>(cellset: &C, member: MemberId) -> usize {
    level_path(cellset, member).len()
}

/// Finds the member on `member`'s ancestor chain whose level is `target_level`.
pub fn resolve_context<'a, C: Cellset + ?Sized>(
    cellset: &'a C,
    member: MemberId,
    target_level: &str,
) -> Option<(MemberId, &'a Member)> {
    ancestors(cellset, member).find(|&(_, m)| {
        cellset
            .level(m.level)
            .map_or(false, |level| level.unique_name == target_level)
    })
}

// ============================================================================
// DIMENSION INDEX
// ============================================================================

/// Per-axis, per-position index from dimension to member.
#[derive(Debug, Clone, Default)]
pub struct MemberResolver {
    axes: Vec<Vec<FxHashMap<DimensionId, MemberId>>>,
}

impl MemberResolver {
    /// Indexes every position of every axis. O(total members).
    pub fn build<C: Cellset + ?Sized>(cellset: &C) -> Self {
        let axes = cellset
            .axes()
            .iter()
            .map(|axis| Self::index_axis(cellset, axis))
            .collect();
        MemberResolver { axes }
    }

    fn index_axis<C: Cellset + ?Sized>(
        cellset: &C,
        axis: &Axis,
    ) -> Vec<FxHashMap<DimensionId, MemberId>> {
        axis.positions
            .iter()
            .map(|position| {
                let mut by_dimension = FxHashMap::default();
                for &id in &position.members {
                    if let Some(member) = cellset.member(id) {
                        by_dimension.entry(member.dimension).or_insert(id);
                    }
                }
                by_dimension
            })
            .collect()
    }

    /// The first member of `dimension` at `axis[position]`, if any.
    pub fn resolve_member(
        &self,
        axis: usize,
        position: usize,
        dimension: DimensionId,
    ) -> Option<MemberId> {
        self.axes
            .get(axis)?
            .get(position)?
            .get(&dimension)
            .copied()
    }
}
