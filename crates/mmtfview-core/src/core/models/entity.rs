use crate::core::io::container::{FieldValue, int_list, keys, wrong_kind};
use crate::core::io::error::FieldError;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Polymer,
    NonPolymer,
    Water,
    Other,
}

impl EntityKind {
    pub fn is_polymer(self) -> bool {
        self == EntityKind::Polymer
    }
}

impl FromStr for EntityKind {
    type Err = Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "polymer" => Ok(EntityKind::Polymer),
            "non-polymer" => Ok(EntityKind::NonPolymer),
            "water" => Ok(EntityKind::Water),
            _ => Ok(EntityKind::Other),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                EntityKind::Polymer => "polymer",
                EntityKind::NonPolymer => "non-polymer",
                EntityKind::Water => "water",
                EntityKind::Other => "other",
            }
        )
    }
}

/// A biological entity shared by one or more chains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub kind: EntityKind,
    pub description: String,
    pub sequence: Option<String>,
    /// Chain indices as listed in the container, before any truncation.
    pub chain_indices: Vec<usize>,
}

impl Entity {
    fn from_field(index: usize, value: &FieldValue) -> Result<Self, FieldError> {
        let field = |key: &str| format!("{}[{index}].{key}", keys::ENTITY_LIST);
        let text = |key: &str| -> Result<Option<String>, FieldError> {
            match value.get(key).filter(|v| !v.is_nil()) {
                None => Ok(None),
                Some(v) => v
                    .as_str()
                    .map(|s| Some(s.to_string()))
                    .ok_or_else(|| wrong_kind(&field(key), "string", v)),
            }
        };

        let chains = value
            .get(keys::CHAIN_INDEX_LIST)
            .filter(|v| !v.is_nil())
            .ok_or_else(|| FieldError::Missing(field(keys::CHAIN_INDEX_LIST)))?;
        let key = field(keys::CHAIN_INDEX_LIST);
        let chain_indices = int_list(&key, chains)?
            .into_iter()
            .map(|i| {
                usize::try_from(i)
                    .map_err(|_| FieldError::invalid(&key, format!("negative chain index {i}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let kind = match text(keys::TYPE)? {
            Some(s) => s.parse().unwrap_or(EntityKind::Other),
            None => EntityKind::Other,
        };

        Ok(Self {
            kind,
            description: text(keys::DESCRIPTION)?.unwrap_or_default(),
            sequence: text(keys::SEQUENCE)?.filter(|s| !s.is_empty()),
            chain_indices,
        })
    }
}

/// Parses the `entityList` field of a container.
pub fn parse_entities(list: &[FieldValue]) -> Result<Vec<Entity>, FieldError> {
    list.iter()
        .enumerate()
        .map(|(i, value)| Entity::from_field(i, value))
        .collect()
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EntityMapError {
    #[error("Chain {chain} is claimed by both entity {first} and entity {second}")]
    DuplicateClaim {
        chain: usize,
        first: usize,
        second: usize,
    },
    #[error("Chain {chain} is not claimed by any entity")]
    Unclaimed { chain: usize },
}

/// Maps every retained chain index to the entity that owns it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityMap {
    chain_to_entity: Vec<Option<usize>>,
}

impl EntityMap {
    /// Builds the map over `0..chain_count`.
    ///
    /// Chain indices at or beyond `chain_count` are ignored, which is how chains
    /// dropped by first-model truncation disappear from the map. With
    /// `require_complete`, a retained chain that no entity claims is an error.
    pub fn build(
        entities: &[Entity],
        chain_count: usize,
        require_complete: bool,
    ) -> Result<Self, EntityMapError> {
        let mut chain_to_entity = vec![None; chain_count];
        for (entity_index, entity) in entities.iter().enumerate() {
            for &chain in entity.chain_indices.iter().filter(|&&c| c < chain_count) {
                match chain_to_entity[chain] {
                    Some(first) if first != entity_index => {
                        return Err(EntityMapError::DuplicateClaim {
                            chain,
                            first,
                            second: entity_index,
                        });
                    }
                    _ => chain_to_entity[chain] = Some(entity_index),
                }
            }
        }
        if require_complete {
            if let Some(chain) = chain_to_entity.iter().position(Option::is_none) {
                return Err(EntityMapError::Unclaimed { chain });
            }
        }
        Ok(Self { chain_to_entity })
    }

    pub fn entity_of(&self, chain: usize) -> Option<usize> {
        self.chain_to_entity.get(chain).copied().flatten()
    }

    pub fn chain_to_entity(&self) -> &[Option<usize>] {
        &self.chain_to_entity
    }

    pub fn chain_count(&self) -> usize {
        self.chain_to_entity.len()
    }

    /// Retained chain indices owned by `entity`, in ascending order.
    pub fn chains_of(&self, entity: usize) -> Vec<usize> {
        self.chain_to_entity
            .iter()
            .enumerate()
            .filter(|(_, e)| **e == Some(entity))
            .map(|(chain, _)| chain)
            .collect()
    }
}
