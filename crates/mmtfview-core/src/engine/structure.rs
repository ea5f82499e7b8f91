use super::broadcast::{broadcast, broadcast_with, expand_catalog};
use super::cache::{AttributeCache, Names};
use super::config::DecodeOptions;
use super::error::StructureError;
use super::index::{DeclaredCounts, HierarchyIndex, IndexBuilder};
use super::view::{StructureView, ViewKind};
use crate::core::codec::{CodecError, ColumnCodec, EncodedColumn, MmtfCodec, TypedArray};
use crate::core::io::container::{Container, FieldValue, int_list, keys};
use crate::core::models::entity::parse_entities;
use crate::core::models::{
    Bond, Entity, EntityKind, EntityMap, ResidueType, ResidueTypeCatalog, StructureMetadata,
};
use nalgebra::Point3;
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument, trace, warn};

/// Columns kept encoded until an accessor first needs them.
const LAZY_COLUMNS: [&str; 15] = [
    keys::X_COORD_LIST,
    keys::Y_COORD_LIST,
    keys::Z_COORD_LIST,
    keys::B_FACTOR_LIST,
    keys::OCCUPANCY_LIST,
    keys::ATOM_ID_LIST,
    keys::ALT_LOC_LIST,
    keys::GROUP_ID_LIST,
    keys::INS_CODE_LIST,
    keys::SEQUENCE_INDEX_LIST,
    keys::SEC_STRUCT_LIST,
    keys::CHAIN_ID_LIST,
    keys::CHAIN_NAME_LIST,
    keys::BOND_ATOM_LIST,
    keys::BOND_ORDER_LIST,
];

type Convert<T> = fn(TypedArray) -> Result<Vec<T>, CodecError>;

fn into_names(array: TypedArray) -> Result<Names, CodecError> {
    Ok(array.into_strings()?.into_iter().map(Arc::from).collect())
}

/// Entity ownership of the retained chains, resolved to chain ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityChainMap {
    /// Owning entity of every retained chain.
    pub chain_to_entity: Vec<Option<usize>>,
    /// Per entity, the ids of its chains below the retained chain count, in list order.
    pub entity_chain_ids: Vec<Vec<Arc<str>>>,
}

/// A decoded macromolecular structure.
///
/// Offset tables, the residue-type catalog and the entity map are computed
/// when the structure is built. Every per-atom, per-group and per-chain array
/// is materialized on first access and cached for the lifetime of the value.
/// Accessors for columns missing from the container return `Ok(None)`.
#[derive(Debug)]
pub struct Structure {
    id: String,
    metadata: StructureMetadata,
    codec: Arc<dyn ColumnCodec>,
    columns: HashMap<&'static str, EncodedColumn>,
    catalog: ResidueTypeCatalog,
    entities: Vec<Entity>,
    entity_map: Option<EntityMap>,
    index: HierarchyIndex,
    declared_bonds: usize,
    cache: AttributeCache,
}

impl Structure {
    /// Builds a structure using the MMTF column codec.
    pub fn from_container(
        container: &Container,
        options: &DecodeOptions,
    ) -> Result<Self, StructureError> {
        Self::with_codec(container, options, Arc::new(MmtfCodec::new()))
    }

    /// Builds a structure that decodes its columns with `codec`.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::MissingField`] when a required field is
    /// absent, and any error of the index pass or the entity map. Nothing is
    /// partially built on failure.
    #[instrument(skip_all, name = "structure_construction")]
    pub fn with_codec(
        container: &Container,
        options: &DecodeOptions,
        codec: Arc<dyn ColumnCodec>,
    ) -> Result<Self, StructureError> {
        let metadata = StructureMetadata::from_container(container)?;
        let declared = DeclaredCounts {
            atoms: container.require_count(keys::NUM_ATOMS)?,
            groups: container.require_count(keys::NUM_GROUPS)?,
            chains: container.require_count(keys::NUM_CHAINS)?,
            models: container.require_count(keys::NUM_MODELS)?,
        };
        let catalog = ResidueTypeCatalog::from_field(container.require_array(keys::GROUP_LIST)?)?;
        let groups_per_chain = count_list(container, codec.as_ref(), keys::GROUPS_PER_CHAIN)?;
        let chains_per_model = count_list(container, codec.as_ref(), keys::CHAINS_PER_MODEL)?;
        let group_types = int_column(container, codec.as_ref(), keys::GROUP_TYPE_LIST)?;

        let index = IndexBuilder::new(declared, &chains_per_model, &groups_per_chain, &group_types)
            .first_model_only(options.first_model_only)
            .build(&catalog)?;
        if index.truncated {
            warn!(
                dropped_models = declared.models - 1,
                dropped_atoms = declared.atoms - index.atom_count(),
                "Keeping only the first model."
            );
        }

        let entities = match container.optional_array(keys::ENTITY_LIST)? {
            Some(list) => Some(parse_entities(list)?),
            None => None,
        };
        let entity_map = entities
            .as_deref()
            .map(|e| EntityMap::build(e, index.chain_count(), options.require_complete_entities))
            .transpose()?;

        let mut columns = HashMap::new();
        for key in LAZY_COLUMNS {
            match container.get(key) {
                None => {}
                Some(FieldValue::Bin(bytes)) => {
                    columns.insert(key, EncodedColumn::new(bytes.clone()));
                }
                Some(other) => {
                    return Err(StructureError::InvalidField {
                        field: key.to_string(),
                        reason: format!("expected an encoded column, found {}", other.kind()),
                    });
                }
            }
        }

        let structure = Self {
            id: metadata.structure_id.clone().unwrap_or_default(),
            metadata,
            codec,
            columns,
            catalog,
            entities: entities.unwrap_or_default(),
            entity_map,
            index,
            declared_bonds: container.optional_count(keys::NUM_BONDS)?.unwrap_or(0),
            cache: AttributeCache::default(),
        };
        debug!(
            id = %structure.id,
            atoms = structure.atom_count(),
            groups = structure.group_count(),
            chains = structure.chain_count(),
            models = structure.model_count(),
            declared_bonds = structure.declared_bonds,
            "Structure constructed."
        );
        Ok(structure)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn metadata(&self) -> &StructureMetadata {
        &self.metadata
    }

    pub fn atom_count(&self) -> usize {
        self.index.atom_count()
    }

    pub fn group_count(&self) -> usize {
        self.index.group_count()
    }

    pub fn chain_count(&self) -> usize {
        self.index.chain_count()
    }

    pub fn model_count(&self) -> usize {
        self.index.model_count()
    }

    /// Number of bonds, intra-group plus inter-group.
    ///
    /// Without truncation this is the container's `numBonds`. Under first-model
    /// truncation it is recomputed on first call from the retained groups'
    /// catalog bonds plus [`Self::bonds`], so it fails when the bond column does.
    pub fn bond_count(&self) -> Result<usize, StructureError> {
        if !self.index.truncated {
            return Ok(self.declared_bonds);
        }
        self.cache
            .bond_count
            .get_or_try_init(|| -> Result<_, StructureError> {
                let intra: usize = self
                    .index
                    .group_types
                    .iter()
                    .filter_map(|&t| self.catalog.get(t))
                    .map(ResidueType::bond_count)
                    .sum();
                Ok(intra + self.bonds()?.len())
            })
            .copied()
    }

    /// Whether first-model truncation dropped any models.
    pub fn is_truncated(&self) -> bool {
        self.index.truncated
    }

    pub fn index(&self) -> &HierarchyIndex {
        &self.index
    }

    pub fn catalog(&self) -> &ResidueTypeCatalog {
        &self.catalog
    }

    /// Entities as listed by the container; empty when it has no entity list.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entity_map(&self) -> Option<&EntityMap> {
        self.entity_map.as_ref()
    }

    /// Catalog index of every group.
    pub fn group_types(&self) -> &[usize] {
        &self.index.group_types
    }

    // ---------------------------------------------------------------------
    // Column decoding
    // ---------------------------------------------------------------------

    fn decode_raw<T>(&self, key: &'static str, convert: Convert<T>) -> Result<Option<Vec<T>>, StructureError> {
        let Some(column) = self.columns.get(key) else {
            return Ok(None);
        };
        trace!(field = key, bytes = column.len(), "Decoding column.");
        self.codec
            .decode(column)
            .and_then(convert)
            .map(Some)
            .map_err(StructureError::codec(key))
    }

    /// Decodes a column owned by a level with `expected` entries, dropping any
    /// entries beyond it.
    fn decode_level<T>(
        &self,
        key: &'static str,
        expected: usize,
        convert: Convert<T>,
    ) -> Result<Option<Vec<T>>, StructureError> {
        let Some(mut values) = self.decode_raw(key, convert)? else {
            return Ok(None);
        };
        if values.len() < expected {
            return Err(StructureError::ColumnLength {
                field: key,
                expected,
                found: values.len(),
            });
        }
        values.truncate(expected);
        Ok(Some(values))
    }

    fn cached<'s, T>(
        &'s self,
        cell: &'s OnceCell<Option<Vec<T>>>,
        key: &'static str,
        expected: usize,
        convert: Convert<T>,
    ) -> Result<Option<&'s [T]>, StructureError> {
        cell.get_or_try_init(|| self.decode_level(key, expected, convert))
            .map(Option::as_deref)
    }

    fn residue(&self, group: usize) -> Option<&ResidueType> {
        self.catalog.get(self.index.group_types[group])
    }

    // ---------------------------------------------------------------------
    // Per-atom columns decoded directly
    // ---------------------------------------------------------------------

    pub fn x_coords(&self) -> Result<Option<&[f32]>, StructureError> {
        let n = self.atom_count();
        self.cached(&self.cache.x_coords, keys::X_COORD_LIST, n, TypedArray::into_f32s)
    }

    pub fn y_coords(&self) -> Result<Option<&[f32]>, StructureError> {
        let n = self.atom_count();
        self.cached(&self.cache.y_coords, keys::Y_COORD_LIST, n, TypedArray::into_f32s)
    }

    pub fn z_coords(&self) -> Result<Option<&[f32]>, StructureError> {
        let n = self.atom_count();
        self.cached(&self.cache.z_coords, keys::Z_COORD_LIST, n, TypedArray::into_f32s)
    }

    /// Cartesian positions; absent unless all three coordinate columns are present.
    pub fn coords(&self) -> Result<Option<&[Point3<f32>]>, StructureError> {
        self.cache
            .coords
            .get_or_try_init(|| -> Result<_, StructureError> {
                let (Some(x), Some(y), Some(z)) = (self.x_coords()?, self.y_coords()?, self.z_coords()?)
                else {
                    return Ok(None);
                };
                Ok(Some(
                    x.iter()
                        .zip(y)
                        .zip(z)
                        .map(|((&x, &y), &z)| Point3::new(x, y, z))
                        .collect(),
                ))
            })
            .map(Option::as_deref)
    }

    pub fn b_factors(&self) -> Result<Option<&[f32]>, StructureError> {
        let n = self.atom_count();
        self.cached(&self.cache.b_factors, keys::B_FACTOR_LIST, n, TypedArray::into_f32s)
    }

    pub fn occupancies(&self) -> Result<Option<&[f32]>, StructureError> {
        let n = self.atom_count();
        self.cached(&self.cache.occupancies, keys::OCCUPANCY_LIST, n, TypedArray::into_f32s)
    }

    pub fn atom_ids(&self) -> Result<Option<&[i32]>, StructureError> {
        let n = self.atom_count();
        self.cached(&self.cache.atom_ids, keys::ATOM_ID_LIST, n, TypedArray::into_i32s)
    }

    pub fn alt_locs(&self) -> Result<Option<&[Option<char>]>, StructureError> {
        let n = self.atom_count();
        self.cached(&self.cache.alt_locs, keys::ALT_LOC_LIST, n, TypedArray::into_chars)
    }

    // ---------------------------------------------------------------------
    // Per-group and per-chain columns
    // ---------------------------------------------------------------------

    pub fn per_group_ids(&self) -> Result<Option<&[i32]>, StructureError> {
        let n = self.group_count();
        self.cached(&self.cache.group_ids, keys::GROUP_ID_LIST, n, TypedArray::into_i32s)
    }

    pub fn per_group_ins_codes(&self) -> Result<Option<&[Option<char>]>, StructureError> {
        let n = self.group_count();
        self.cached(&self.cache.ins_codes, keys::INS_CODE_LIST, n, TypedArray::into_chars)
    }

    pub fn per_group_sequence_indices(&self) -> Result<Option<&[i32]>, StructureError> {
        let n = self.group_count();
        self.cached(
            &self.cache.sequence_indices,
            keys::SEQUENCE_INDEX_LIST,
            n,
            TypedArray::into_i32s,
        )
    }

    pub fn per_group_sec_structs(&self) -> Result<Option<&[i32]>, StructureError> {
        let n = self.group_count();
        self.cached(&self.cache.sec_structs, keys::SEC_STRUCT_LIST, n, TypedArray::into_i32s)
    }

    /// Whether the insertion-code column carries any codes at all.
    ///
    /// Answered from the column header alone: a single parameter-less
    /// run-length pair means every group has the default code.
    pub fn has_insertion_codes(&self) -> Result<bool, StructureError> {
        let Some(column) = self.columns.get(keys::INS_CODE_LIST) else {
            return Ok(false);
        };
        let header = self
            .codec
            .peek_header(column)
            .map_err(StructureError::codec(keys::INS_CODE_LIST))?;
        Ok(!header.is_single_run())
    }

    /// Group numbers: the group id followed by its insertion code, if any.
    pub fn per_group_numbers(&self) -> Result<Option<&[Arc<str>]>, StructureError> {
        self.cache
            .group_labels
            .get_or_try_init(|| -> Result<_, StructureError> {
                let Some(ids) = self.per_group_ids()? else {
                    return Ok(None);
                };
                let codes = if self.has_insertion_codes()? {
                    self.per_group_ins_codes()?
                } else {
                    None
                };
                let labels = ids
                    .iter()
                    .enumerate()
                    .map(|(group, id)| match codes.and_then(|c| c[group]) {
                        Some(code) => Arc::<str>::from(format!("{id}{code}")),
                        None => Arc::<str>::from(id.to_string()),
                    })
                    .collect();
                Ok(Some(labels))
            })
            .map(Option::as_deref)
    }

    pub fn per_chain_names(&self) -> Result<Option<&[Arc<str>]>, StructureError> {
        let n = self.chain_count();
        self.cached(&self.cache.chain_names, keys::CHAIN_NAME_LIST, n, into_names)
    }

    pub fn per_chain_ids(&self) -> Result<Option<&[Arc<str>]>, StructureError> {
        let n = self.chain_count();
        self.cached(&self.cache.chain_ids, keys::CHAIN_ID_LIST, n, into_names)
    }

    // ---------------------------------------------------------------------
    // Per-atom arrays broadcast from coarser levels
    // ---------------------------------------------------------------------

    pub fn chain_names(&self) -> Result<Option<&[Arc<str>]>, StructureError> {
        self.cache
            .atom_chain_names
            .get_or_try_init(|| -> Result<_, StructureError> {
                Ok(self
                    .per_chain_names()?
                    .map(|names| broadcast(&self.index.chain_to_atom, names)))
            })
            .map(Option::as_deref)
    }

    pub fn chain_ids(&self) -> Result<Option<&[Arc<str>]>, StructureError> {
        self.cache
            .atom_chain_ids
            .get_or_try_init(|| -> Result<_, StructureError> {
                Ok(self
                    .per_chain_ids()?
                    .map(|ids| broadcast(&self.index.chain_to_atom, ids)))
            })
            .map(Option::as_deref)
    }

    pub fn group_ids(&self) -> Result<Option<&[i32]>, StructureError> {
        self.cache
            .atom_group_ids
            .get_or_try_init(|| -> Result<_, StructureError> {
                Ok(self
                    .per_group_ids()?
                    .map(|ids| broadcast(&self.index.group_to_atom, ids)))
            })
            .map(Option::as_deref)
    }

    pub fn group_numbers(&self) -> Result<Option<&[Arc<str>]>, StructureError> {
        self.cache
            .atom_group_numbers
            .get_or_try_init(|| -> Result<_, StructureError> {
                Ok(self
                    .per_group_numbers()?
                    .map(|labels| broadcast(&self.index.group_to_atom, labels)))
            })
            .map(Option::as_deref)
    }

    pub fn sequence_positions(&self) -> Result<Option<&[i32]>, StructureError> {
        self.cache
            .atom_sequence_positions
            .get_or_try_init(|| -> Result<_, StructureError> {
                Ok(self
                    .per_group_sequence_indices()?
                    .map(|positions| broadcast(&self.index.group_to_atom, positions)))
            })
            .map(Option::as_deref)
    }

    pub fn group_names(&self) -> &[Arc<str>] {
        self.cache.atom_group_names.get_or_init(|| {
            broadcast_with(&self.index.group_to_atom, |g| {
                self.residue(g).map_or_else(|| Arc::from(""), |r| r.name.clone())
            })
        })
    }

    pub fn chem_classes(&self) -> &[Arc<str>] {
        self.cache.atom_chem_classes.get_or_init(|| {
            broadcast_with(&self.index.group_to_atom, |g| {
                self.residue(g)
                    .map_or_else(|| Arc::from(""), |r| r.chem_class.clone())
            })
        })
    }

    pub fn one_letter_codes(&self) -> &[char] {
        self.cache.atom_one_letter_codes.get_or_init(|| {
            broadcast_with(&self.index.group_to_atom, |g| {
                self.residue(g).map_or('?', |r| r.one_letter_code)
            })
        })
    }

    /// Index of the owning group of every atom.
    pub fn group_serials(&self) -> &[usize] {
        self.cache
            .atom_group_serials
            .get_or_init(|| broadcast_with(&self.index.group_to_atom, |g| g))
    }

    /// Index of the owning chain of every atom.
    pub fn chain_serials(&self) -> &[usize] {
        self.cache
            .atom_chain_serials
            .get_or_init(|| broadcast_with(&self.index.chain_to_atom, |c| c))
    }

    pub fn model_serials(&self) -> &[usize] {
        self.cache
            .atom_model_serials
            .get_or_init(|| broadcast_with(&self.index.model_to_atom, |m| m))
    }

    fn entity_broadcast<T: Clone>(&self, value_of: impl Fn(Option<&Entity>) -> T) -> Option<Vec<T>> {
        let map = self.entity_map.as_ref()?;
        Some(broadcast_with(&self.index.chain_to_atom, |chain| {
            value_of(map.entity_of(chain).and_then(|e| self.entities.get(e)))
        }))
    }

    /// Whether each atom belongs to a polymer entity; absent without an entity list.
    pub fn polymer_flags(&self) -> Option<&[bool]> {
        self.cache
            .atom_polymer_flags
            .get_or_init(|| self.entity_broadcast(|e| e.is_some_and(|e| e.kind.is_polymer())))
            .as_deref()
    }

    pub fn entity_indices(&self) -> Option<&[Option<usize>]> {
        self.cache
            .atom_entity_indices
            .get_or_init(|| {
                let map = self.entity_map.as_ref()?;
                Some(broadcast_with(&self.index.chain_to_atom, |chain| {
                    map.entity_of(chain)
                }))
            })
            .as_deref()
    }

    /// Entity kind per atom; atoms of unclaimed chains report [`EntityKind::Other`].
    pub fn entity_kinds(&self) -> Option<&[EntityKind]> {
        self.cache
            .atom_entity_kinds
            .get_or_init(|| self.entity_broadcast(|e| e.map_or(EntityKind::Other, |e| e.kind)))
            .as_deref()
    }

    // ---------------------------------------------------------------------
    // Per-atom arrays expanded from the catalog
    // ---------------------------------------------------------------------

    pub fn atom_names(&self) -> &[Arc<str>] {
        self.cache.atom_names.get_or_init(|| {
            expand_catalog(&self.index.group_types, &self.catalog, |r| {
                r.atom_names.as_slice()
            })
        })
    }

    pub fn elements(&self) -> &[Arc<str>] {
        self.cache.elements.get_or_init(|| {
            expand_catalog(&self.index.group_types, &self.catalog, |r| r.elements.as_slice())
        })
    }

    pub fn formal_charges(&self) -> &[i32] {
        self.cache.formal_charges.get_or_init(|| {
            expand_catalog(&self.index.group_types, &self.catalog, |r| {
                r.formal_charges.as_slice()
            })
        })
    }

    // ---------------------------------------------------------------------
    // Bonds
    // ---------------------------------------------------------------------

    /// Bonds between groups, restricted to retained atoms.
    ///
    /// Bonds inside a group are described by the catalog entries instead.
    pub fn bonds(&self) -> Result<&[Bond], StructureError> {
        self.cache
            .bonds
            .get_or_try_init(|| self.decode_bonds())
            .map(Vec::as_slice)
    }

    fn decode_bonds(&self) -> Result<Vec<Bond>, StructureError> {
        let Some(flat) = self.decode_raw(keys::BOND_ATOM_LIST, TypedArray::into_i32s)? else {
            return Ok(Vec::new());
        };
        if flat.len() % 2 != 0 {
            return Err(StructureError::InvalidField {
                field: keys::BOND_ATOM_LIST.to_string(),
                reason: format!("odd number of atom indices ({})", flat.len()),
            });
        }
        let pairs = flat.len() / 2;
        let orders = self.decode_raw(keys::BOND_ORDER_LIST, TypedArray::into_i32s)?;
        if let Some(orders) = &orders {
            if orders.len() != pairs {
                return Err(StructureError::ColumnLength {
                    field: keys::BOND_ORDER_LIST,
                    expected: pairs,
                    found: orders.len(),
                });
            }
        }

        let atom_count = self.atom_count();
        let mut bonds = Vec::with_capacity(pairs);
        for (i, pair) in flat.chunks_exact(2).enumerate() {
            let atom = |raw: i32| {
                usize::try_from(raw).map_err(|_| StructureError::InvalidField {
                    field: keys::BOND_ATOM_LIST.to_string(),
                    reason: format!("negative atom index {raw}"),
                })
            };
            let bond = Bond::new(
                atom(pair[0])?,
                atom(pair[1])?,
                orders.as_ref().map(|o| o[i]),
            );
            if bond.within(atom_count) {
                bonds.push(bond);
            }
        }
        if bonds.len() < pairs {
            debug!(
                dropped = pairs - bonds.len(),
                "Dropped bonds to atoms outside the retained models."
            );
        }
        Ok(bonds)
    }

    // ---------------------------------------------------------------------
    // Entities
    // ---------------------------------------------------------------------

    /// Chain-to-entity ownership plus, per entity, the ids of its retained chains.
    ///
    /// Chain ids fall back to chain names when the container has no id column.
    /// Returns `None` when the container has no entity list.
    pub fn entity_chain_map(&self) -> Result<Option<EntityChainMap>, StructureError> {
        let Some(map) = &self.entity_map else {
            return Ok(None);
        };
        let ids = match self.per_chain_ids()? {
            Some(ids) => Some(ids),
            None => self.per_chain_names()?,
        };
        let chain_count = self.chain_count();
        let entity_chain_ids = self
            .entities
            .iter()
            .map(|entity| {
                entity
                    .chain_indices
                    .iter()
                    .filter(|&&chain| chain < chain_count)
                    .map(|&chain| match ids {
                        Some(ids) => ids[chain].clone(),
                        None => Arc::from(chain.to_string()),
                    })
                    .collect::<Vec<_>>()
            })
            .collect();
        Ok(Some(EntityChainMap {
            chain_to_entity: map.chain_to_entity().to_vec(),
            entity_chain_ids,
        }))
    }

    // ---------------------------------------------------------------------
    // Views
    // ---------------------------------------------------------------------

    fn all_chains(&self) -> Vec<usize> {
        (0..self.chain_count()).collect()
    }

    /// View of every chain named `name`; empty when no chain matches.
    pub fn chain(&self, name: &str) -> Result<StructureView<'_>, StructureError> {
        StructureView::by_names(self, &self.id, &self.all_chains(), &[name], ViewKind::Chain)
    }

    /// One view per distinct chain name, in order of first appearance.
    pub fn chains(&self) -> Result<Vec<StructureView<'_>>, StructureError> {
        StructureView::per_name(self, &self.id, &self.all_chains())
    }

    /// A single view over every chain whose name is in `names`.
    pub fn select_chains(&self, names: &[&str]) -> Result<StructureView<'_>, StructureError> {
        StructureView::by_names(self, &self.id, &self.all_chains(), names, ViewKind::Chains)
    }

    pub fn model(&self, index: usize) -> Result<StructureView<'_>, StructureError> {
        if index >= self.model_count() {
            return Err(StructureError::IndexOutOfRange {
                index,
                count: self.model_count(),
            });
        }
        Ok(StructureView::for_model(self, index))
    }

    pub fn models(&self) -> Vec<StructureView<'_>> {
        (0..self.model_count())
            .map(|m| StructureView::for_model(self, m))
            .collect()
    }
}

/// Reads an integer list stored either as a plain array or as an encoded column.
fn int_column(
    container: &Container,
    codec: &dyn ColumnCodec,
    key: &'static str,
) -> Result<Vec<i32>, StructureError> {
    match container.require(key)? {
        FieldValue::Bin(bytes) => codec
            .decode(&EncodedColumn::new(bytes.clone()))
            .and_then(TypedArray::into_i32s)
            .map_err(StructureError::codec(key)),
        other => int_list(key, other)?
            .into_iter()
            .map(|v| {
                i32::try_from(v).map_err(|_| StructureError::InvalidField {
                    field: key.to_string(),
                    reason: format!("{v} overflows i32"),
                })
            })
            .collect(),
    }
}

fn count_list(
    container: &Container,
    codec: &dyn ColumnCodec,
    key: &'static str,
) -> Result<Vec<usize>, StructureError> {
    int_column(container, codec, key)?
        .into_iter()
        .map(|v| {
            usize::try_from(v).map_err(|_| StructureError::InvalidField {
                field: key.to_string(),
                reason: format!("negative count {v}"),
            })
        })
        .collect()
}
