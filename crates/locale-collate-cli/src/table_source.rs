use serde::Deserialize;

use locale_collate_core::{CollateTablesBuilder, Weights};

use crate::error::CliAppError;

/// TOML description of a collation table, the input of `compile`.
///
/// ```toml
/// [[substitutions]]
/// byte = 0xdf
/// replacement = "ss"
///
/// [[chars]]
/// byte = 0x61
/// primary = 100
///
/// [[chains]]
/// text = "ch"
/// primary = 135
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TableSource {
    pub legacy: bool,
    pub substitutions: Vec<SubstitutionSource>,
    pub chars: Vec<CharSource>,
    pub chains: Vec<ChainSource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubstitutionSource {
    pub byte: u8,
    pub replacement: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CharSource {
    pub byte: u8,
    pub primary: i32,
    #[serde(default)]
    pub secondary: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChainSource {
    pub text: String,
    pub primary: i32,
    #[serde(default)]
    pub secondary: i32,
}

impl TableSource {
    pub fn parse(contents: &str) -> Result<Self, CliAppError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn builder(&self) -> CollateTablesBuilder {
        let mut builder = CollateTablesBuilder::new();
        for entry in &self.substitutions {
            builder = builder.substitute(entry.byte, entry.replacement.as_bytes());
        }
        for entry in &self.chars {
            builder = builder.char_weights(entry.byte, Weights::new(entry.primary, entry.secondary));
        }
        for entry in &self.chains {
            builder = builder.chain(
                entry.text.as_bytes(),
                Weights::new(entry.primary, entry.secondary),
            );
        }
        builder
    }
}
