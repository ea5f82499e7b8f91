use super::error::StructureError;
use crate::core::io::keys;
use crate::core::models::ResidueTypeCatalog;
use std::ops::Range;
use tracing::debug;

/// A CSR-style table: entry `i` is the first fine-grained index owned by coarse
/// index `i`, and the closing sentinel is the fine-grained total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetTable {
    offsets: Vec<usize>,
}

impl OffsetTable {
    fn with_capacity(n: usize) -> Self {
        Self {
            offsets: Vec::with_capacity(n + 1),
        }
    }

    fn push(&mut self, offset: usize) {
        self.offsets.push(offset);
    }

    /// Number of coarse entries (the table holds one more offset than this).
    pub fn len(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn total(&self) -> usize {
        self.offsets.last().copied().unwrap_or(0)
    }

    /// Fine-grained range owned by coarse entry `index`.
    pub fn range(&self, index: usize) -> Range<usize> {
        self.offsets[index]..self.offsets[index + 1]
    }

    pub fn ranges(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        self.offsets.windows(2).map(|w| w[0]..w[1])
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.offsets
    }

    pub fn is_monotonic(&self) -> bool {
        self.offsets.windows(2).all(|w| w[0] <= w[1])
    }
}

/// Counts declared by the container, before any truncation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeclaredCounts {
    pub atoms: usize,
    pub groups: usize,
    pub chains: usize,
    pub models: usize,
}

/// The offset tables of a structure together with the group types they were built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyIndex {
    pub group_to_atom: OffsetTable,
    pub chain_to_atom: OffsetTable,
    pub chain_to_group: OffsetTable,
    pub model_to_atom: OffsetTable,
    pub model_to_group: OffsetTable,
    pub model_to_chain: OffsetTable,
    /// Catalog index of every retained group.
    pub group_types: Vec<usize>,
    pub truncated: bool,
}

impl HierarchyIndex {
    pub fn atom_count(&self) -> usize {
        self.group_to_atom.total()
    }

    pub fn group_count(&self) -> usize {
        self.chain_to_group.total()
    }

    pub fn chain_count(&self) -> usize {
        self.model_to_chain.total()
    }

    pub fn model_count(&self) -> usize {
        self.model_to_chain.len()
    }

    /// Model that owns `chain`.
    pub fn model_of_chain(&self, chain: usize) -> Option<usize> {
        let offsets = self.model_to_chain.as_slice();
        if chain >= self.chain_count() {
            return None;
        }
        // Last model whose first chain is at or before `chain`; skips empty models.
        Some(offsets.partition_point(|&start| start <= chain) - 1)
    }
}

/// Computes the hierarchical offset tables in one forward pass.
#[derive(Debug, Clone)]
pub struct IndexBuilder<'a> {
    declared: DeclaredCounts,
    chains_per_model: &'a [usize],
    groups_per_chain: &'a [usize],
    group_types: &'a [i32],
    first_model_only: bool,
}

impl<'a> IndexBuilder<'a> {
    pub fn new(
        declared: DeclaredCounts,
        chains_per_model: &'a [usize],
        groups_per_chain: &'a [usize],
        group_types: &'a [i32],
    ) -> Self {
        Self {
            declared,
            chains_per_model,
            groups_per_chain,
            group_types,
            first_model_only: false,
        }
    }

    pub fn first_model_only(mut self, enabled: bool) -> Self {
        self.first_model_only = enabled;
        self
    }

    /// Walks models, chains and groups in storage order.
    ///
    /// # Errors
    ///
    /// Fails with [`StructureError::IndexConsistency`] when the nesting lists
    /// disagree with the declared counts, [`StructureError::ColumnLength`] when
    /// the group type list is too short, and [`StructureError::InvalidField`]
    /// when a group type is not a catalog index.
    pub fn build(self, catalog: &ResidueTypeCatalog) -> Result<HierarchyIndex, StructureError> {
        let declared = self.declared;
        if self.chains_per_model.len() != declared.models {
            return Err(StructureError::IndexConsistency(format!(
                "{} chains-per-model entries for {} models",
                self.chains_per_model.len(),
                declared.models
            )));
        }
        let truncated = self.first_model_only && declared.models > 1;
        let model_limit = if truncated { 1 } else { declared.models };

        // Declared counts are untrusted until the pass agrees with them.
        let group_capacity = declared.groups.min(self.group_types.len());
        let chain_capacity = declared.chains.min(self.groups_per_chain.len());
        let mut group_to_atom = OffsetTable::with_capacity(group_capacity);
        let mut chain_to_atom = OffsetTable::with_capacity(chain_capacity);
        let mut chain_to_group = OffsetTable::with_capacity(chain_capacity);
        let mut model_to_atom = OffsetTable::with_capacity(model_limit);
        let mut model_to_group = OffsetTable::with_capacity(model_limit);
        let mut model_to_chain = OffsetTable::with_capacity(model_limit);
        let mut group_types = Vec::with_capacity(group_capacity);

        let (mut atom, mut group, mut chain) = (0usize, 0usize, 0usize);
        for &chains_in_model in &self.chains_per_model[..model_limit] {
            model_to_atom.push(atom);
            model_to_group.push(group);
            model_to_chain.push(chain);
            for _ in 0..chains_in_model {
                let groups_in_chain = *self.groups_per_chain.get(chain).ok_or_else(|| {
                    StructureError::IndexConsistency(format!(
                        "chain {chain} has no groups-per-chain entry ({} given)",
                        self.groups_per_chain.len()
                    ))
                })?;
                chain_to_atom.push(atom);
                chain_to_group.push(group);
                for _ in 0..groups_in_chain {
                    let raw = *self.group_types.get(group).ok_or(StructureError::ColumnLength {
                        field: keys::GROUP_TYPE_LIST,
                        expected: group + 1,
                        found: self.group_types.len(),
                    })?;
                    let group_type = usize::try_from(raw)
                        .ok()
                        .filter(|&t| t < catalog.len())
                        .ok_or_else(|| StructureError::InvalidField {
                            field: keys::GROUP_TYPE_LIST.to_string(),
                            reason: format!(
                                "group {group} references type {raw} outside a catalog of {}",
                                catalog.len()
                            ),
                        })?;
                    let atoms = catalog.get(group_type).map_or(0, |t| t.atom_count());
                    group_to_atom.push(atom);
                    group_types.push(group_type);
                    atom += atoms;
                    group += 1;
                }
                chain += 1;
            }
        }
        for table in [&mut group_to_atom, &mut chain_to_atom] {
            table.push(atom);
        }
        for table in [&mut chain_to_group, &mut model_to_group] {
            table.push(group);
        }
        model_to_atom.push(atom);
        model_to_chain.push(chain);

        if !truncated {
            let reached = [
                ("atoms", atom, declared.atoms),
                ("groups", group, declared.groups),
                ("chains", chain, declared.chains),
            ];
            for (level, found, expected) in reached {
                if found != expected {
                    return Err(StructureError::IndexConsistency(format!(
                        "hierarchy holds {found} {level} but {expected} are declared"
                    )));
                }
            }
            if self.groups_per_chain.len() != chain {
                return Err(StructureError::IndexConsistency(format!(
                    "{} groups-per-chain entries for {chain} chains",
                    self.groups_per_chain.len()
                )));
            }
        } else if atom > declared.atoms || group > declared.groups || chain > declared.chains {
            return Err(StructureError::IndexConsistency(format!(
                "first model holds {atom} atoms, {group} groups and {chain} chains, \
                 exceeding the declared totals"
            )));
        }

        debug!(
            atoms = atom,
            groups = group,
            chains = chain,
            models = model_limit,
            truncated,
            "Hierarchy index built."
        );

        Ok(HierarchyIndex {
            group_to_atom,
            chain_to_atom,
            chain_to_group,
            model_to_atom,
            model_to_group,
            model_to_chain,
            group_types,
            truncated,
        })
    }
}
