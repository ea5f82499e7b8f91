use crate::core::models::EntityKind;
use crate::engine::{Structure, StructureError};
use std::fmt;
use tracing::{debug, instrument};

#[derive(Debug, Clone, PartialEq)]
pub struct EntitySummary {
    pub index: usize,
    pub kind: EntityKind,
    pub description: String,
    /// Distinct ids of the entity's retained chains, sorted.
    pub chain_ids: Vec<String>,
    pub sequence: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructureSummary {
    pub id: String,
    pub title: Option<String>,
    pub experimental_methods: Vec<String>,
    pub resolution: Option<f32>,
    pub atom_count: usize,
    pub group_count: usize,
    pub chain_count: usize,
    pub model_count: usize,
    pub bond_count: usize,
    pub truncated: bool,
    pub entities: Vec<EntitySummary>,
}

/// Collects counts, metadata and per-entity chain lists of a structure.
///
/// Entities whose chains were all dropped by truncation are left out.
#[instrument(skip_all, name = "summarize_structure", fields(id = structure.id()))]
pub fn summarize(structure: &Structure) -> Result<StructureSummary, StructureError> {
    let metadata = structure.metadata();
    let entities = match structure.entity_chain_map()? {
        None => Vec::new(),
        Some(map) => structure
            .entities()
            .iter()
            .zip(map.entity_chain_ids)
            .enumerate()
            .filter(|(_, (_, ids))| !ids.is_empty())
            .map(|(index, (entity, ids))| {
                let mut chain_ids: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
                chain_ids.sort();
                chain_ids.dedup();
                EntitySummary {
                    index,
                    kind: entity.kind,
                    description: entity.description.clone(),
                    chain_ids,
                    sequence: entity.sequence.clone(),
                }
            })
            .collect(),
    };
    debug!(entities = entities.len(), "Structure summarized.");

    Ok(StructureSummary {
        id: structure.id().to_string(),
        title: metadata.title.clone(),
        experimental_methods: metadata.experimental_methods.clone(),
        resolution: metadata.resolution,
        atom_count: structure.atom_count(),
        group_count: structure.group_count(),
        chain_count: structure.chain_count(),
        model_count: structure.model_count(),
        bond_count: structure.bond_count()?,
        truncated: structure.is_truncated(),
        entities,
    })
}

impl fmt::Display for StructureSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = if self.id.is_empty() { "-" } else { &self.id };
        write!(
            f,
            "{id}\tatoms={} groups={} chains={} models={} bonds={}",
            self.atom_count, self.group_count, self.chain_count, self.model_count, self.bond_count
        )?;
        if let Some(resolution) = self.resolution {
            write!(f, " resolution={resolution:.2}")?;
        }
        if self.truncated {
            write!(f, " (first model)")?;
        }
        Ok(())
    }
}

impl fmt::Display for EntitySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.index,
            self.kind,
            self.chain_ids.join(","),
            self.description
        )?;
        if let Some(sequence) = &self.sequence {
            write!(f, "\t{sequence}")?;
        }
        Ok(())
    }
}
