use crate::core::models::{Bond, EntityKind};
use nalgebra::Point3;
use once_cell::sync::OnceCell;
use std::sync::Arc;

pub(crate) type Names = Vec<Arc<str>>;

/// Write-once slots for every lazily materialized array of a structure.
///
/// A slot is filled by the first successful call of its accessor; concurrent
/// first calls converge on one value. A failed computation leaves the slot
/// empty. `Option` inside a slot records that the source column is absent.
#[derive(Debug, Default)]
pub(crate) struct AttributeCache {
    pub x_coords: OnceCell<Option<Vec<f32>>>,
    pub y_coords: OnceCell<Option<Vec<f32>>>,
    pub z_coords: OnceCell<Option<Vec<f32>>>,
    pub b_factors: OnceCell<Option<Vec<f32>>>,
    pub occupancies: OnceCell<Option<Vec<f32>>>,
    pub atom_ids: OnceCell<Option<Vec<i32>>>,
    pub alt_locs: OnceCell<Option<Vec<Option<char>>>>,
    pub coords: OnceCell<Option<Vec<Point3<f32>>>>,

    // One value per group.
    pub group_ids: OnceCell<Option<Vec<i32>>>,
    pub ins_codes: OnceCell<Option<Vec<Option<char>>>>,
    pub sequence_indices: OnceCell<Option<Vec<i32>>>,
    pub sec_structs: OnceCell<Option<Vec<i32>>>,
    pub group_labels: OnceCell<Option<Names>>,

    // One value per chain.
    pub chain_names: OnceCell<Option<Names>>,
    pub chain_ids: OnceCell<Option<Names>>,

    // Broadcast to atoms.
    pub atom_chain_names: OnceCell<Option<Names>>,
    pub atom_chain_ids: OnceCell<Option<Names>>,
    pub atom_group_ids: OnceCell<Option<Vec<i32>>>,
    pub atom_group_numbers: OnceCell<Option<Names>>,
    pub atom_sequence_positions: OnceCell<Option<Vec<i32>>>,
    pub atom_polymer_flags: OnceCell<Option<Vec<bool>>>,
    pub atom_entity_indices: OnceCell<Option<Vec<Option<usize>>>>,
    pub atom_entity_kinds: OnceCell<Option<Vec<EntityKind>>>,
    pub atom_group_names: OnceCell<Names>,
    pub atom_chem_classes: OnceCell<Names>,
    pub atom_one_letter_codes: OnceCell<Vec<char>>,
    pub atom_group_serials: OnceCell<Vec<usize>>,
    pub atom_chain_serials: OnceCell<Vec<usize>>,
    pub atom_model_serials: OnceCell<Vec<usize>>,

    // Expanded from the catalog.
    pub atom_names: OnceCell<Names>,
    pub elements: OnceCell<Names>,
    pub formal_charges: OnceCell<Vec<i32>>,

    pub bonds: OnceCell<Vec<Bond>>,
    pub bond_count: OnceCell<usize>,
}
