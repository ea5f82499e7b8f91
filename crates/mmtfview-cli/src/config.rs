use crate::cli::DecodeArgs;
use crate::error::{CliError, Result};
use mmtfview::engine::{DecodeOptions, DecodeOptionsBuilder};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialDecodeConfig {
    first_model_only: Option<bool>,
    require_complete_entities: Option<bool>,
}

/// Settings read from a `--config` file; every key is optional.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialCliConfig {
    decode: Option<PartialDecodeConfig>,
}

impl PartialCliConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Resolves the final decode options: command-line flags win over file
    /// values, which win over library defaults.
    pub fn merge_with_cli(self, args: &DecodeArgs) -> DecodeOptions {
        let file = self.decode.unwrap_or_default();
        let defaults = DecodeOptions::default();

        let first_model_only = args.first_model
            || file.first_model_only.unwrap_or(defaults.first_model_only);
        let require_complete_entities = file
            .require_complete_entities
            .unwrap_or(defaults.require_complete_entities);

        DecodeOptionsBuilder::new()
            .first_model_only(first_model_only)
            .require_complete_entities(require_complete_entities)
            .build()
    }
}

/// Loads the optional config file named by `args` and merges it with the flags.
pub fn resolve_options(args: &DecodeArgs) -> Result<DecodeOptions> {
    let partial = match &args.config {
        Some(path) => PartialCliConfig::from_file(path)?,
        None => PartialCliConfig::default(),
    };
    let options = partial.merge_with_cli(args);
    debug!(?options, "Decode options resolved.");
    Ok(options)
}
