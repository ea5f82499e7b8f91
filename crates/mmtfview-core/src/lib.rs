//! # mmtfview
//!
//! Random-access, typed columnar views over MMTF macromolecular structure
//! containers.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout so that each concern can be tested
//! on its own.
//!
//! - **[`core`]: The Foundation.** Column codecs, the container reader and the
//!   plain records (residue-type catalog, entities, metadata) parsed from it.
//!
//! - **[`engine`]: The Decode Core.** Builds the hierarchical offset tables in
//!   one pass, owns the [`engine::Structure`] with its lazily materialized
//!   per-atom arrays, and provides masked [`engine::StructureView`]
//!   projections for single chains, chain subsets and models.
//!
//! - **[`workflows`]: The Public API.** Entry points that go from a file or a
//!   byte buffer to a decoded structure, and from a structure to a summary.
//!
//! ## Example
//!
//! ```no_run
//! use mmtfview::engine::DecodeOptions;
//! use mmtfview::workflows::decode::decode_file;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let options = DecodeOptions::builder().first_model_only(true).build();
//! let structure = decode_file("4hhb.mmtf.gz", &options)?;
//! let chain_a = structure.chain("A")?;
//! println!("chain A has {} atoms", chain_a.atom_count());
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod engine;
pub mod workflows;

#[cfg(test)]
mod test_support;
