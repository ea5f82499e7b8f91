use serde::Deserialize;

/// Options controlling how a container is turned into a structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct DecodeOptions {
    /// Keep only the first model and shrink every count and table to it.
    pub first_model_only: bool,
    /// When an entity list is present, require it to claim every retained chain.
    pub require_complete_entities: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            first_model_only: false,
            require_complete_entities: true,
        }
    }
}

impl DecodeOptions {
    pub fn builder() -> DecodeOptionsBuilder {
        DecodeOptionsBuilder::new()
    }
}

#[derive(Debug, Default)]
pub struct DecodeOptionsBuilder {
    first_model_only: Option<bool>,
    require_complete_entities: Option<bool>,
}

impl DecodeOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn first_model_only(mut self, enabled: bool) -> Self {
        self.first_model_only = Some(enabled);
        self
    }

    pub fn require_complete_entities(mut self, enabled: bool) -> Self {
        self.require_complete_entities = Some(enabled);
        self
    }

    pub fn build(self) -> DecodeOptions {
        let defaults = DecodeOptions::default();
        DecodeOptions {
            first_model_only: self.first_model_only.unwrap_or(defaults.first_model_only),
            require_complete_entities: self
                .require_complete_entities
                .unwrap_or(defaults.require_complete_entities),
        }
    }
}
