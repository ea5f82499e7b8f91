//! Synthetic containers with a known hierarchy.

use super::columns::{char_column, fixed_point_column, float_column, int_column, string_column};
use crate::core::io::container::{Container, FieldValue, keys};

pub(crate) const ILE: i32 = 0;
pub(crate) const GLY: i32 = 1;
pub(crate) const ALA: i32 = 2;
pub(crate) const SER: i32 = 3;
pub(crate) const SO4: i32 = 5;
pub(crate) const ZN: i32 = 6;
pub(crate) const HOH: i32 = 7;

struct TypeSpec {
    name: &'static str,
    atoms: &'static [&'static str],
    elements: &'static [&'static str],
    charges: &'static [i64],
    bonds: &'static [i64],
    orders: &'static [i64],
    chem: &'static str,
    code: &'static str,
}

const PEPTIDE: &str = "L-PEPTIDE LINKING";

const CATALOG: [TypeSpec; 8] = [
    TypeSpec {
        name: "ILE",
        atoms: &["N", "CA", "C", "O", "CB", "CG1", "CG2", "CD1"],
        elements: &["N", "C", "C", "O", "C", "C", "C", "C"],
        charges: &[0; 8],
        bonds: &[0, 1, 1, 2, 2, 3],
        orders: &[1, 1, 2],
        chem: PEPTIDE,
        code: "I",
    },
    TypeSpec {
        name: "GLY",
        atoms: &["N", "CA", "C", "O"],
        elements: &["N", "C", "C", "O"],
        charges: &[0; 4],
        bonds: &[],
        orders: &[],
        chem: "PEPTIDE LINKING",
        code: "G",
    },
    TypeSpec {
        name: "ALA",
        atoms: &["N", "CA", "C", "O", "CB"],
        elements: &["N", "C", "C", "O", "C"],
        charges: &[0; 5],
        bonds: &[],
        orders: &[],
        chem: PEPTIDE,
        code: "A",
    },
    TypeSpec {
        name: "SER",
        atoms: &["N", "CA", "C", "O", "CB", "OG"],
        elements: &["N", "C", "C", "O", "C", "O"],
        charges: &[0; 6],
        bonds: &[],
        orders: &[],
        chem: PEPTIDE,
        code: "S",
    },
    TypeSpec {
        name: "PRO",
        atoms: &["N", "CA", "C", "O", "CB", "CG", "CD"],
        elements: &["N", "C", "C", "O", "C", "C", "C"],
        charges: &[0; 7],
        bonds: &[],
        orders: &[],
        chem: PEPTIDE,
        code: "P",
    },
    TypeSpec {
        name: "SO4",
        atoms: &["S", "O1", "O2", "O3", "O4"],
        elements: &["S", "O", "O", "O", "O"],
        charges: &[0, 0, 0, -1, -1],
        bonds: &[0, 1, 0, 2, 0, 3, 0, 4],
        orders: &[2, 2, 1, 1],
        chem: "NON-POLYMER",
        code: "?",
    },
    TypeSpec {
        name: "ZN",
        atoms: &["ZN"],
        elements: &["Zn"],
        charges: &[2],
        bonds: &[],
        orders: &[],
        chem: "NON-POLYMER",
        code: "?",
    },
    TypeSpec {
        name: "HOH",
        atoms: &["O"],
        elements: &["O"],
        charges: &[0],
        bonds: &[],
        orders: &[],
        chem: "NON-POLYMER",
        code: "?",
    },
];

pub(crate) fn atoms_of(group_type: i32) -> usize {
    CATALOG[group_type as usize].atoms.len()
}

pub(crate) fn intra_bonds_of(group_type: i32) -> usize {
    CATALOG[group_type as usize].orders.len()
}

pub(crate) fn catalog_field() -> FieldValue {
    FieldValue::Array(
        CATALOG
            .iter()
            .map(|t| {
                FieldValue::Map(vec![
                    (keys::GROUP_NAME.into(), t.name.into()),
                    (keys::ATOM_NAME_LIST.into(), t.atoms.to_vec().into()),
                    (keys::ELEMENT_LIST.into(), t.elements.to_vec().into()),
                    (keys::FORMAL_CHARGE_LIST.into(), t.charges.to_vec().into()),
                    (keys::BOND_ATOM_LIST.into(), t.bonds.to_vec().into()),
                    (keys::BOND_ORDER_LIST.into(), t.orders.to_vec().into()),
                    (keys::CHEM_COMP_TYPE.into(), t.chem.into()),
                    (keys::SINGLE_LETTER_CODE.into(), t.code.into()),
                ])
            })
            .collect(),
    )
}

#[derive(Debug, Clone)]
pub(crate) struct ChainSpec {
    pub name: String,
    pub id: String,
    pub group_types: Vec<i32>,
    pub first_group_id: i32,
}

impl ChainSpec {
    pub fn new(name: &str, group_types: Vec<i32>) -> Self {
        Self {
            name: name.to_string(),
            id: name.to_string(),
            group_types,
            first_group_id: 1,
        }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    pub fn first_group_id(mut self, id: i32) -> Self {
        self.first_group_id = id;
        self
    }
}

/// Assembles a container from a model/chain/group layout.
///
/// Per-atom columns are filled with values derived from the global atom
/// index: `x = i / 10`, `y = -i / 10`, `z = 1`, `b = i % 50`, atom ids `i + 1`.
#[derive(Debug, Clone, Default)]
pub(crate) struct ContainerBuilder {
    models: Vec<Vec<ChainSpec>>,
    entities: Vec<FieldValue>,
    ins_codes: Option<Vec<Option<char>>>,
    inter_bonds: Vec<(i32, i32, i32)>,
}

impl ContainerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model(mut self, chains: Vec<ChainSpec>) -> Self {
        self.models.push(chains);
        self
    }

    pub fn entity(mut self, kind: &str, chains: &[i64], sequence: &str) -> Self {
        self.entities.push(FieldValue::Map(vec![
            (keys::TYPE.into(), kind.into()),
            (keys::DESCRIPTION.into(), format!("{kind} entity").into()),
            (keys::SEQUENCE.into(), sequence.into()),
            (keys::CHAIN_INDEX_LIST.into(), chains.to_vec().into()),
        ]));
        self
    }

    /// Per-group insertion codes; by default every group has none.
    pub fn ins_codes(mut self, codes: Vec<Option<char>>) -> Self {
        self.ins_codes = Some(codes);
        self
    }

    pub fn inter_bond(mut self, first: i32, second: i32, order: i32) -> Self {
        self.inter_bonds.push((first, second, order));
        self
    }

    fn chains(&self) -> impl Iterator<Item = &ChainSpec> {
        self.models.iter().flatten()
    }

    pub fn group_types(&self) -> Vec<i32> {
        self.chains().flat_map(|c| c.group_types.iter().copied()).collect()
    }

    pub fn atom_count(&self) -> usize {
        self.group_types().into_iter().map(atoms_of).sum()
    }

    pub fn build(&self) -> Container {
        let group_types = self.group_types();
        let atom_count = self.atom_count();
        let group_count = group_types.len();
        let chain_names: Vec<&str> = self.chains().map(|c| c.name.as_str()).collect();
        let chain_ids: Vec<&str> = self.chains().map(|c| c.id.as_str()).collect();
        let group_ids: Vec<i32> = self
            .chains()
            .flat_map(|c| (0..c.group_types.len() as i32).map(move |i| c.first_group_id + i))
            .collect();
        let sequence_index: Vec<i32> = self
            .chains()
            .flat_map(|c| {
                c.group_types
                    .iter()
                    .enumerate()
                    .map(|(i, &t)| if t == HOH { -1 } else { i as i32 })
            })
            .collect();
        let sec_struct: Vec<i32> = group_types
            .iter()
            .map(|&t| if t == HOH { -1 } else { t % 3 })
            .collect();
        let ins_codes = self.ins_codes.clone().unwrap_or_else(|| vec![None; group_count]);

        let x: Vec<f32> = (0..atom_count).map(|i| i as f32 / 10.0).collect();
        let y: Vec<f32> = x.iter().map(|v| -v).collect();
        let z = vec![1.0f32; atom_count];
        let b: Vec<f32> = (0..atom_count).map(|i| (i % 50) as f32).collect();
        let occupancy = vec![1.0f32; atom_count];
        let atom_ids: Vec<i32> = (1..=atom_count as i32).collect();
        let alt_locs = vec![None; atom_count];

        let intra: usize = group_types.iter().map(|&t| intra_bonds_of(t)).sum();
        let bond_atoms: Vec<i32> = self.inter_bonds.iter().flat_map(|&(a, b, _)| [a, b]).collect();
        let bond_orders: Vec<i32> = self.inter_bonds.iter().map(|&(_, _, o)| o).collect();

        let mut container = Container::new()
            .with(keys::MMTF_VERSION, "1.0.0")
            .with(keys::MMTF_PRODUCER, "mmtfview-fixtures")
            .with(keys::STRUCTURE_ID, "1SYN")
            .with(keys::TITLE, "SYNTHETIC TEST STRUCTURE")
            .with(keys::EXPERIMENTAL_METHODS, vec!["SOLUTION NMR"])
            .with(keys::NUM_ATOMS, atom_count as i64)
            .with(keys::NUM_GROUPS, group_count as i64)
            .with(keys::NUM_CHAINS, chain_names.len() as i64)
            .with(keys::NUM_MODELS, self.models.len() as i64)
            .with(keys::NUM_BONDS, (intra + self.inter_bonds.len()) as i64)
            .with(keys::GROUP_LIST, catalog_field())
            .with(keys::GROUP_TYPE_LIST, int_column(&group_types))
            .with(
                keys::CHAINS_PER_MODEL,
                self.models.iter().map(|m| m.len() as i64).collect::<Vec<_>>(),
            )
            .with(
                keys::GROUPS_PER_CHAIN,
                self.chains().map(|c| c.group_types.len() as i64).collect::<Vec<_>>(),
            )
            .with(keys::CHAIN_NAME_LIST, string_column(&chain_names, 4))
            .with(keys::CHAIN_ID_LIST, string_column(&chain_ids, 4))
            .with(keys::GROUP_ID_LIST, int_column(&group_ids))
            .with(keys::INS_CODE_LIST, char_column(&ins_codes))
            .with(keys::SEQUENCE_INDEX_LIST, int_column(&sequence_index))
            .with(keys::SEC_STRUCT_LIST, int_column(&sec_struct))
            .with(keys::X_COORD_LIST, fixed_point_column(&x, 1000))
            .with(keys::Y_COORD_LIST, fixed_point_column(&y, 1000))
            .with(keys::Z_COORD_LIST, fixed_point_column(&z, 1000))
            .with(keys::B_FACTOR_LIST, fixed_point_column(&b, 100))
            .with(keys::OCCUPANCY_LIST, float_column(&occupancy))
            .with(keys::ATOM_ID_LIST, int_column(&atom_ids))
            .with(keys::ALT_LOC_LIST, char_column(&alt_locs))
            .with(keys::BOND_ATOM_LIST, int_column(&bond_atoms))
            .with(keys::BOND_ORDER_LIST, int_column(&bond_orders));
        if !self.entities.is_empty() {
            container.insert(keys::ENTITY_LIST, self.entities.clone());
        }
        container
    }
}

/// Groups of the polymer chain used by the two-model scenario.
fn polymer_groups() -> Vec<i32> {
    [ILE, GLY, ALA, SER].iter().copied().cycle().take(144).collect()
}

/// Two models with chains-per-model `[2, 3]` and groups-per-chain
/// `[144, 85, 144, 85, 1]`. Chain names are `A, B` in model 0 and `A, B, C`
/// in model 1; `A` is a polymer, `B` and `C` hold waters.
pub(crate) fn two_model_builder() -> ContainerBuilder {
    let model = |ids: [&str; 2], offset: i32| {
        vec![
            ChainSpec::new("A", polymer_groups()).id(ids[0]),
            ChainSpec::new("B", vec![HOH; 85])
                .id(ids[1])
                .first_group_id(1000 + offset),
        ]
    };
    let mut second = model(["E", "F"], 100);
    second.push(ChainSpec::new("C", vec![HOH]).id("G").first_group_id(2000));

    let model_zero_atoms = SCENARIO_MODEL_ZERO_ATOMS as i32;
    ContainerBuilder::new()
        .model(model(["A", "B"], 0))
        .model(second)
        .entity("polymer", &[0, 2], "IGAS")
        .entity("water", &[1, 3, 4], "")
        .inter_bond(2, 8, 1)
        .inter_bond(model_zero_atoms + 2, model_zero_atoms + 8, 1)
}

pub(crate) fn two_model_container() -> Container {
    two_model_builder().build()
}

/// 36 cycles of ILE, GLY, ALA, SER (8 + 4 + 5 + 6 atoms) plus 85 waters.
pub(crate) const SCENARIO_MODEL_ZERO_ATOMS: usize = 36 * 23 + 85;
pub(crate) const SCENARIO_ATOMS: usize = 2 * SCENARIO_MODEL_ZERO_ATOMS + 1;
pub(crate) const SCENARIO_MODEL_ZERO_GROUPS: usize = 144 + 85;
pub(crate) const SCENARIO_GROUPS: usize = 2 * SCENARIO_MODEL_ZERO_GROUPS + 1;

/// A single model with one polymer chain of three groups and one sulfate.
pub(crate) fn small_builder() -> ContainerBuilder {
    ContainerBuilder::new()
        .model(vec![
            ChainSpec::new("A", vec![GLY, ALA, GLY]),
            ChainSpec::new("B", vec![SO4]).first_group_id(101),
        ])
        .entity("polymer", &[0], "GAG")
        .entity("non-polymer", &[1], "")
}

pub(crate) fn small_container() -> Container {
    small_builder().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_counts_match_the_declared_layout() {
        let builder = two_model_builder();
        assert_eq!(builder.atom_count(), SCENARIO_ATOMS);
        assert_eq!(builder.group_types().len(), SCENARIO_GROUPS);
        assert_eq!(atoms_of(ILE), 8);
        assert_eq!(atoms_of(HOH), 1);
        assert_eq!(atoms_of(ZN), 1);
    }
}
