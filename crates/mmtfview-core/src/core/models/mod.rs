pub mod bond;
pub mod catalog;
pub mod entity;
pub mod metadata;

pub use bond::Bond;
pub use catalog::{ResidueType, ResidueTypeCatalog};
pub use entity::{Entity, EntityKind, EntityMap, EntityMapError};
pub use metadata::{AssemblyTransform, BioAssembly, StructureMetadata, UnitCell};
