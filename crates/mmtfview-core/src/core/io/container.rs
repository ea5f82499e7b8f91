use super::error::FieldError;
use crate::core::codec::EncodedColumn;
use std::collections::HashMap;

/// Field names used by MMTF containers.
pub mod keys {
    pub const MMTF_VERSION: &str = "mmtfVersion";
    pub const MMTF_PRODUCER: &str = "mmtfProducer";
    pub const STRUCTURE_ID: &str = "structureId";
    pub const TITLE: &str = "title";
    pub const DEPOSITION_DATE: &str = "depositionDate";
    pub const RELEASE_DATE: &str = "releaseDate";
    pub const UNIT_CELL: &str = "unitCell";
    pub const SPACE_GROUP: &str = "spaceGroup";
    pub const NCS_OPERATOR_LIST: &str = "ncsOperatorList";
    pub const BIO_ASSEMBLY_LIST: &str = "bioAssemblyList";
    pub const ENTITY_LIST: &str = "entityList";
    pub const EXPERIMENTAL_METHODS: &str = "experimentalMethods";
    pub const RESOLUTION: &str = "resolution";
    pub const R_FREE: &str = "rFree";
    pub const R_WORK: &str = "rWork";

    pub const NUM_BONDS: &str = "numBonds";
    pub const NUM_ATOMS: &str = "numAtoms";
    pub const NUM_GROUPS: &str = "numGroups";
    pub const NUM_CHAINS: &str = "numChains";
    pub const NUM_MODELS: &str = "numModels";

    pub const GROUP_LIST: &str = "groupList";
    pub const GROUP_TYPE_LIST: &str = "groupTypeList";
    pub const GROUPS_PER_CHAIN: &str = "groupsPerChain";
    pub const CHAINS_PER_MODEL: &str = "chainsPerModel";

    pub const X_COORD_LIST: &str = "xCoordList";
    pub const Y_COORD_LIST: &str = "yCoordList";
    pub const Z_COORD_LIST: &str = "zCoordList";
    pub const B_FACTOR_LIST: &str = "bFactorList";
    pub const OCCUPANCY_LIST: &str = "occupancyList";
    pub const ATOM_ID_LIST: &str = "atomIdList";
    pub const ALT_LOC_LIST: &str = "altLocList";

    pub const GROUP_ID_LIST: &str = "groupIdList";
    pub const INS_CODE_LIST: &str = "insCodeList";
    pub const SEQUENCE_INDEX_LIST: &str = "sequenceIndexList";
    pub const SEC_STRUCT_LIST: &str = "secStructList";

    pub const CHAIN_ID_LIST: &str = "chainIdList";
    pub const CHAIN_NAME_LIST: &str = "chainNameList";

    pub const BOND_ATOM_LIST: &str = "bondAtomList";
    pub const BOND_ORDER_LIST: &str = "bondOrderList";

    // Keys inside groupList entries.
    pub const GROUP_NAME: &str = "groupName";
    pub const ATOM_NAME_LIST: &str = "atomNameList";
    pub const ELEMENT_LIST: &str = "elementList";
    pub const FORMAL_CHARGE_LIST: &str = "formalChargeList";
    pub const CHEM_COMP_TYPE: &str = "chemCompType";
    pub const SINGLE_LETTER_CODE: &str = "singleLetterCode";

    // Keys inside entityList entries.
    pub const CHAIN_INDEX_LIST: &str = "chainIndexList";
    pub const DESCRIPTION: &str = "description";
    pub const TYPE: &str = "type";
    pub const SEQUENCE: &str = "sequence";

    // Keys inside bioAssemblyList entries.
    pub const NAME: &str = "name";
    pub const TRANSFORM_LIST: &str = "transformList";
    pub const MATRIX: &str = "matrix";
}

/// A dynamically typed value of the deserialized container.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bin(Vec<u8>),
    Array(Vec<FieldValue>),
    Map(Vec<(String, FieldValue)>),
}

impl FieldValue {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::Bin(_) => "binary",
            Self::Array(_) => "array",
            Self::Map(_) => "map",
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[FieldValue]> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_bin(&self) -> Option<&[u8]> {
        match self {
            Self::Bin(b) => Some(b),
            _ => None,
        }
    }

    /// Looks up a key in a map-type value.
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        match self {
            Self::Map(pairs) => pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<EncodedColumn> for FieldValue {
    fn from(value: EncodedColumn) -> Self {
        Self::Bin(value.as_bytes().to_vec())
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(values: Vec<T>) -> Self {
        Self::Array(values.into_iter().map(Into::into).collect())
    }
}

/// The deserialized top-level record of one structure: field name to value.
///
/// A `Nil` value is treated exactly like an absent key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Container {
    fields: HashMap<String, FieldValue>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, value: impl Into<FieldValue>) -> Option<FieldValue> {
        self.fields.insert(key.to_string(), value.into())
    }

    /// Builder-style variant of [`Container::insert`].
    pub fn with(mut self, key: &str, value: impl Into<FieldValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        self.fields.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key).filter(|v| !v.is_nil())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the field as an encoded column if it holds a binary value.
    pub fn column(&self, key: &str) -> Option<EncodedColumn> {
        self.get(key)
            .and_then(FieldValue::as_bin)
            .map(|b| EncodedColumn::new(b.to_vec()))
    }

    pub fn require(&self, key: &str) -> Result<&FieldValue, FieldError> {
        self.get(key).ok_or_else(|| FieldError::Missing(key.to_string()))
    }

    pub fn optional_str(&self, key: &str) -> Result<Option<&str>, FieldError> {
        self.get(key)
            .map(|v| v.as_str().ok_or_else(|| wrong_kind(key, "string", v)))
            .transpose()
    }

    pub fn require_str(&self, key: &str) -> Result<&str, FieldError> {
        self.optional_str(key)?
            .ok_or_else(|| FieldError::Missing(key.to_string()))
    }

    pub fn optional_f64(&self, key: &str) -> Result<Option<f64>, FieldError> {
        self.get(key)
            .map(|v| v.as_f64().ok_or_else(|| wrong_kind(key, "number", v)))
            .transpose()
    }

    /// Returns a non-negative integer field as a count.
    pub fn optional_count(&self, key: &str) -> Result<Option<usize>, FieldError> {
        self.get(key).map(|v| as_count(key, v)).transpose()
    }

    pub fn require_count(&self, key: &str) -> Result<usize, FieldError> {
        self.optional_count(key)?
            .ok_or_else(|| FieldError::Missing(key.to_string()))
    }

    pub fn optional_array(&self, key: &str) -> Result<Option<&[FieldValue]>, FieldError> {
        self.get(key)
            .map(|v| v.as_array().ok_or_else(|| wrong_kind(key, "array", v)))
            .transpose()
    }

    pub fn require_array(&self, key: &str) -> Result<&[FieldValue], FieldError> {
        self.optional_array(key)?
            .ok_or_else(|| FieldError::Missing(key.to_string()))
    }

    /// Consumes the map, turning it into its raw key/value pairs.
    pub fn into_fields(self) -> HashMap<String, FieldValue> {
        self.fields
    }
}

pub(crate) fn wrong_kind(key: &str, expected: &str, found: &FieldValue) -> FieldError {
    FieldError::invalid(key, format!("expected {expected}, found {}", found.kind()))
}

pub(crate) fn as_count(key: &str, value: &FieldValue) -> Result<usize, FieldError> {
    let v = value.as_i64().ok_or_else(|| wrong_kind(key, "integer", value))?;
    usize::try_from(v).map_err(|_| FieldError::invalid(key, format!("negative count {v}")))
}

/// Reads an array of strings, as used for atom names and element symbols.
pub(crate) fn string_list(key: &str, value: &FieldValue) -> Result<Vec<String>, FieldError> {
    let items = value.as_array().ok_or_else(|| wrong_kind(key, "array", value))?;
    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| wrong_kind(key, "string", item))
        })
        .collect()
}

/// Reads an array of integers.
pub(crate) fn int_list(key: &str, value: &FieldValue) -> Result<Vec<i64>, FieldError> {
    let items = value.as_array().ok_or_else(|| wrong_kind(key, "array", value))?;
    items
        .iter()
        .map(|item| item.as_i64().ok_or_else(|| wrong_kind(key, "integer", item)))
        .collect()
}

/// Reads an array of numbers as `f64`.
pub(crate) fn float_list(key: &str, value: &FieldValue) -> Result<Vec<f64>, FieldError> {
    let items = value.as_array().ok_or_else(|| wrong_kind(key, "array", value))?;
    items
        .iter()
        .map(|item| item.as_f64().ok_or_else(|| wrong_kind(key, "number", item)))
        .collect()
}

impl FromIterator<(String, FieldValue)> for Container {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
