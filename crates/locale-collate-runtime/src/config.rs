use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::RuntimeResult;
use crate::provider::DirectoryProvider;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub data_root: PathBuf,
    pub default_encoding: String,
    pub warn_on_shadowed_chains: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            data_root: PathBuf::from("/usr/share/locale"),
            default_encoding: "C".to_string(),
            warn_on_shadowed_chains: true,
        }
    }
}

impl RuntimeConfig {
    pub fn provider(&self) -> DirectoryProvider {
        DirectoryProvider::new(&self.data_root)
    }
}

pub fn load_config(path: &Path) -> RuntimeResult<RuntimeConfig> {
    let contents = fs::read_to_string(path)?;
    let config = toml::from_str(&contents)?;
    Ok(config)
}

pub fn load_config_or_default(path: &Path) -> RuntimeResult<RuntimeConfig> {
    if path.exists() {
        load_config(path)
    } else {
        Ok(RuntimeConfig::default())
    }
}
