pub mod chains;
pub mod entities;
pub mod info;
pub mod models;
pub mod summary;

use crate::cli::DecodeArgs;
use crate::config;
use crate::error::{CliError, Result};
use mmtfview::engine::{DecodeOptions, Structure};
use mmtfview::workflows;
use std::path::Path;
use tracing::info;

/// Decodes one file with already resolved options.
pub(crate) fn decode(path: &Path, options: &DecodeOptions) -> Result<Structure> {
    workflows::decode_file(path, options).map_err(|source| CliError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolves the decode options for `args` and decodes `path`.
pub(crate) fn load(path: &Path, args: &DecodeArgs) -> Result<Structure> {
    let options = config::resolve_options(args)?;
    info!("Loading structure from {:?}", path);
    decode(path, &options)
}

#[cfg(test)]
pub(crate) mod fixture {
    use mmtfview::core::codec::EncodedColumn;
    use mmtfview::core::io::{Container, FieldValue, keys};
    use mmtfview::engine::{DecodeOptions, Structure};

    fn string_column(values: &[&str]) -> EncodedColumn {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&5i32.to_be_bytes());
        bytes.extend_from_slice(&(values.len() as i32).to_be_bytes());
        bytes.extend_from_slice(&4i32.to_be_bytes());
        for value in values {
            let mut padded = [0u8; 4];
            padded[..value.len()].copy_from_slice(value.as_bytes());
            bytes.extend_from_slice(&padded);
        }
        EncodedColumn::new(bytes)
    }

    fn map(pairs: Vec<(&str, FieldValue)>) -> FieldValue {
        FieldValue::Map(pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }

    /// Two models: model 0 holds chain A (one GLY) and chain B (one water),
    /// model 1 holds a second chain A (one GLY). Nine atoms in total.
    pub(crate) fn container() -> Container {
        let gly = map(vec![
            (keys::GROUP_NAME, "GLY".into()),
            (keys::ATOM_NAME_LIST, vec!["N", "CA", "C", "O"].into()),
            (keys::ELEMENT_LIST, vec!["N", "C", "C", "O"].into()),
            (keys::CHEM_COMP_TYPE, "PEPTIDE LINKING".into()),
            (keys::SINGLE_LETTER_CODE, "G".into()),
        ]);
        let hoh = map(vec![
            (keys::GROUP_NAME, "HOH".into()),
            (keys::ATOM_NAME_LIST, vec!["O"].into()),
            (keys::ELEMENT_LIST, vec!["O"].into()),
            (keys::CHEM_COMP_TYPE, "NON-POLYMER".into()),
        ]);
        let entities = vec![
            map(vec![
                (keys::TYPE, "polymer".into()),
                (keys::DESCRIPTION, "glycine peptide".into()),
                (keys::SEQUENCE, "G".into()),
                (keys::CHAIN_INDEX_LIST, vec![0i64, 2].into()),
            ]),
            map(vec![
                (keys::TYPE, "water".into()),
                (keys::DESCRIPTION, "water".into()),
                (keys::CHAIN_INDEX_LIST, vec![1i64].into()),
            ]),
        ];

        Container::new()
            .with(keys::MMTF_VERSION, "1.0.0")
            .with(keys::MMTF_PRODUCER, "mmtfview-cli tests")
            .with(keys::STRUCTURE_ID, "1TST")
            .with(keys::TITLE, "CLI TEST STRUCTURE")
            .with(keys::EXPERIMENTAL_METHODS, vec!["X-RAY DIFFRACTION"])
            .with(keys::RESOLUTION, 1.5f64)
            .with(keys::NUM_ATOMS, 9i64)
            .with(keys::NUM_GROUPS, 3i64)
            .with(keys::NUM_CHAINS, 3i64)
            .with(keys::NUM_MODELS, 2i64)
            .with(keys::GROUP_LIST, vec![gly, hoh])
            .with(keys::GROUP_TYPE_LIST, vec![0i64, 1, 0])
            .with(keys::GROUPS_PER_CHAIN, vec![1i64, 1, 1])
            .with(keys::CHAINS_PER_MODEL, vec![2i64, 1])
            .with(keys::CHAIN_NAME_LIST, string_column(&["A", "B", "A"]))
            .with(keys::CHAIN_ID_LIST, string_column(&["A", "B", "C"]))
            .with(keys::ENTITY_LIST, entities)
    }

    pub(crate) fn structure(first_model_only: bool) -> Structure {
        let options = DecodeOptions::builder()
            .first_model_only(first_model_only)
            .build();
        Structure::from_container(&container(), &options).unwrap()
    }
}
