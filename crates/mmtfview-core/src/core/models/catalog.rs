use crate::core::io::container::{FieldValue, int_list, keys, string_list, wrong_kind};
use crate::core::io::error::FieldError;
use std::sync::Arc;

/// A residue template shared by every group occurrence of the same chemical kind.
///
/// Strings are reference counted so per-atom arrays built from the catalog
/// share storage with it instead of copying every name.
#[derive(Debug, Clone, PartialEq)]
pub struct ResidueType {
    pub name: Arc<str>,
    pub atom_names: Vec<Arc<str>>,
    pub elements: Vec<Arc<str>>,
    pub formal_charges: Vec<i32>,
    pub chem_class: Arc<str>,
    pub one_letter_code: char,
    /// Bonds between atoms of this residue, as local atom index pairs.
    pub bond_atoms: Vec<[usize; 2]>,
    pub bond_orders: Vec<i32>,
}

impl ResidueType {
    pub fn atom_count(&self) -> usize {
        self.atom_names.len()
    }

    pub fn bond_count(&self) -> usize {
        self.bond_atoms.len()
    }

    fn from_field(index: usize, value: &FieldValue) -> Result<Self, FieldError> {
        if !matches!(value, FieldValue::Map(_)) {
            return Err(wrong_kind(&format!("{}[{index}]", keys::GROUP_LIST), "map", value));
        }
        let field = |key: &str| entry_field(index, key);

        let name = entry_str(index, value, keys::GROUP_NAME)?
            .ok_or_else(|| FieldError::Missing(field(keys::GROUP_NAME)))?;
        let atom_names = string_list(
            &field(keys::ATOM_NAME_LIST),
            required(index, value, keys::ATOM_NAME_LIST)?,
        )?;
        let elements = string_list(
            &field(keys::ELEMENT_LIST),
            required(index, value, keys::ELEMENT_LIST)?,
        )?;
        if atom_names.len() != elements.len() {
            return Err(FieldError::invalid(
                &field(keys::ELEMENT_LIST),
                format!(
                    "{} elements for {} atom names",
                    elements.len(),
                    atom_names.len()
                ),
            ));
        }

        let formal_charges = match present(value, keys::FORMAL_CHARGE_LIST) {
            None => vec![0; atom_names.len()],
            Some(v) => {
                let key = field(keys::FORMAL_CHARGE_LIST);
                let charges = to_i32s(&key, int_list(&key, v)?)?;
                if charges.len() != atom_names.len() {
                    return Err(FieldError::invalid(
                        &key,
                        format!("{} charges for {} atoms", charges.len(), atom_names.len()),
                    ));
                }
                charges
            }
        };

        let (bond_atoms, bond_orders) = parse_bonds(index, value, atom_names.len())?;

        let one_letter_code = entry_str(index, value, keys::SINGLE_LETTER_CODE)?
            .and_then(|s| s.chars().next())
            .unwrap_or('?');
        let chem_class = entry_str(index, value, keys::CHEM_COMP_TYPE)?.unwrap_or("");

        Ok(Self {
            name: name.into(),
            atom_names: atom_names.into_iter().map(Arc::from).collect(),
            elements: elements.into_iter().map(Arc::from).collect(),
            formal_charges,
            chem_class: chem_class.into(),
            one_letter_code,
            bond_atoms,
            bond_orders,
        })
    }
}

fn entry_field(index: usize, key: &str) -> String {
    format!("{}[{index}].{key}", keys::GROUP_LIST)
}

fn present<'a>(value: &'a FieldValue, key: &str) -> Option<&'a FieldValue> {
    value.get(key).filter(|v| !v.is_nil())
}

fn required<'a>(index: usize, value: &'a FieldValue, key: &str) -> Result<&'a FieldValue, FieldError> {
    present(value, key).ok_or_else(|| FieldError::Missing(entry_field(index, key)))
}

fn entry_str<'a>(index: usize, value: &'a FieldValue, key: &str) -> Result<Option<&'a str>, FieldError> {
    present(value, key)
        .map(|v| {
            v.as_str()
                .ok_or_else(|| wrong_kind(&entry_field(index, key), "string", v))
        })
        .transpose()
}

type LocalBonds = (Vec<[usize; 2]>, Vec<i32>);

fn parse_bonds(index: usize, value: &FieldValue, atom_count: usize) -> Result<LocalBonds, FieldError> {
    let Some(atoms) = present(value, keys::BOND_ATOM_LIST) else {
        return Ok((Vec::new(), Vec::new()));
    };
    let key = entry_field(index, keys::BOND_ATOM_LIST);
    let flat = int_list(&key, atoms)?;
    if flat.len() % 2 != 0 {
        return Err(FieldError::invalid(&key, "odd number of bond atom indices"));
    }
    let pairs = flat
        .chunks_exact(2)
        .map(|pair| -> Result<[usize; 2], FieldError> {
            let local = |i: i64| {
                usize::try_from(i)
                    .ok()
                    .filter(|&i| i < atom_count)
                    .ok_or_else(|| {
                        FieldError::invalid(&key, format!("atom index {i} outside 0..{atom_count}"))
                    })
            };
            Ok([local(pair[0])?, local(pair[1])?])
        })
        .collect::<Result<Vec<_>, _>>()?;

    let orders = match present(value, keys::BOND_ORDER_LIST) {
        None => vec![1; pairs.len()],
        Some(v) => {
            let key = entry_field(index, keys::BOND_ORDER_LIST);
            let orders = to_i32s(&key, int_list(&key, v)?)?;
            if orders.len() != pairs.len() {
                return Err(FieldError::invalid(
                    &key,
                    format!("{} orders for {} bonds", orders.len(), pairs.len()),
                ));
            }
            orders
        }
    };
    Ok((pairs, orders))
}

fn to_i32s(key: &str, values: Vec<i64>) -> Result<Vec<i32>, FieldError> {
    values
        .into_iter()
        .map(|v| i32::try_from(v).map_err(|_| FieldError::invalid(key, format!("{v} overflows i32"))))
        .collect()
}

/// The deduplicated residue templates of a structure, addressed by group type index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResidueTypeCatalog {
    entries: Vec<ResidueType>,
}

impl ResidueTypeCatalog {
    pub fn new(entries: Vec<ResidueType>) -> Self {
        Self { entries }
    }

    /// Parses the `groupList` field of a container.
    pub fn from_field(list: &[FieldValue]) -> Result<Self, FieldError> {
        list.iter()
            .enumerate()
            .map(|(i, entry)| ResidueType::from_field(i, entry))
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    pub fn get(&self, index: usize) -> Option<&ResidueType> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResidueType> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, atoms: &[&str], elements: &[&str]) -> FieldValue {
        FieldValue::Map(vec![
            (keys::GROUP_NAME.into(), name.into()),
            (keys::ATOM_NAME_LIST.into(), atoms.to_vec().into()),
            (keys::ELEMENT_LIST.into(), elements.to_vec().into()),
            (keys::CHEM_COMP_TYPE.into(), "L-PEPTIDE LINKING".into()),
            (keys::SINGLE_LETTER_CODE.into(), "G".into()),
        ])
    }

    fn with(value: FieldValue, key: &str, extra: FieldValue) -> FieldValue {
        match value {
            FieldValue::Map(mut pairs) => {
                pairs.push((key.to_string(), extra));
                FieldValue::Map(pairs)
            }
            other => other,
        }
    }

    #[test]
    fn parses_entries_with_defaults() {
        let list = vec![entry("GLY", &["N", "CA"], &["N", "C"])];
        let catalog = ResidueTypeCatalog::from_field(&list).unwrap();
        let gly = catalog.get(0).unwrap();
        assert_eq!(&*gly.name, "GLY");
        assert_eq!(gly.atom_count(), 2);
        assert_eq!(gly.formal_charges, vec![0, 0]);
        assert_eq!(gly.one_letter_code, 'G');
        assert_eq!(gly.bond_count(), 0);
        assert!(catalog.get(1).is_none());
    }

    #[test]
    fn element_list_must_match_atom_names() {
        let list = vec![entry("GLY", &["N", "CA"], &["N"])];
        let err = ResidueTypeCatalog::from_field(&list).unwrap_err();
        assert!(matches!(err, FieldError::Invalid { ref field, .. } if field == "groupList[0].elementList"));
    }

    #[test]
    fn missing_atom_names_are_reported_with_their_path() {
        let list = vec![FieldValue::Map(vec![(keys::GROUP_NAME.into(), "HOH".into())])];
        assert_eq!(
            ResidueTypeCatalog::from_field(&list).unwrap_err(),
            FieldError::Missing("groupList[0].atomNameList".into())
        );
    }

    #[test]
    fn intra_group_bonds_are_validated() {
        let base = entry("GLY", &["N", "CA"], &["N", "C"]);
        let good = with(base.clone(), keys::BOND_ATOM_LIST, vec![0i64, 1].into());
        let catalog = ResidueTypeCatalog::from_field(&[good]).unwrap();
        assert_eq!(catalog.get(0).unwrap().bond_atoms, vec![[0, 1]]);
        assert_eq!(catalog.get(0).unwrap().bond_orders, vec![1]);

        let out_of_range = with(base, keys::BOND_ATOM_LIST, vec![0i64, 2].into());
        assert!(ResidueTypeCatalog::from_field(&[out_of_range]).is_err());
    }
}
