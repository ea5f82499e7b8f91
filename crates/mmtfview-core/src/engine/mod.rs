//! # Engine Module
//!
//! The stateful decode core: turns a deserialized container into a
//! [`Structure`] and projects it through [`StructureView`]s.
//!
//! ## Overview
//!
//! Construction runs a single forward pass over the model, chain and group
//! nesting ([`index`]) to produce CSR-style offset tables, parses the residue
//! type catalog and entity list, and keeps every other column encoded.
//! Per-atom arrays are produced on first access, either by decoding a column
//! directly or by broadcasting coarser values over the offset tables
//! ([`broadcast`]), and cached for the lifetime of the structure.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - [`DecodeOptions`] such as first-model truncation
//! - **Offset Tables** ([`index`]) - [`IndexBuilder`] and the resulting [`HierarchyIndex`]
//! - **Structure** ([`structure`]) - The aggregate root with lazily materialized attributes
//! - **Views** ([`view`]) - Masked chain, chain-subset and model projections
//! - **Error Handling** ([`error`]) - [`StructureError`]

pub mod broadcast;
pub(crate) mod cache;
pub mod config;
pub mod error;
pub mod index;
pub mod structure;
pub mod view;

pub use config::{DecodeOptions, DecodeOptionsBuilder};
pub use error::StructureError;
pub use index::{DeclaredCounts, HierarchyIndex, IndexBuilder, OffsetTable};
pub use structure::{EntityChainMap, Structure};
pub use view::{StructureView, ViewKind};
