//! Expansion of coarse-grained values into per-atom arrays.

use super::index::OffsetTable;
use crate::core::models::{ResidueType, ResidueTypeCatalog};

/// Repeats `values[i]` over the fine-grained range of coarse entry `i`.
pub fn broadcast<T: Clone>(table: &OffsetTable, values: &[T]) -> Vec<T> {
    broadcast_with(table, |i| values[i].clone())
}

/// Like [`broadcast`], but computes the value of each coarse entry on demand.
pub fn broadcast_with<T: Clone>(table: &OffsetTable, mut value_of: impl FnMut(usize) -> T) -> Vec<T> {
    let mut out = Vec::with_capacity(table.total());
    for (i, range) in table.ranges().enumerate() {
        if range.is_empty() {
            continue;
        }
        out.extend(std::iter::repeat_n(value_of(i), range.len()));
    }
    out
}

/// Concatenates a per-atom list of each group's residue type, back to back.
///
/// Residue types contribute different numbers of atoms, so this is a
/// variable-width expansion rather than a broadcast.
pub fn expand_catalog<T: Clone>(
    group_types: &[usize],
    catalog: &ResidueTypeCatalog,
    pick: impl Fn(&ResidueType) -> &[T],
) -> Vec<T> {
    let mut out = Vec::new();
    for residue in group_types.iter().filter_map(|&t| catalog.get(t)) {
        out.extend_from_slice(pick(residue));
    }
    out
}
