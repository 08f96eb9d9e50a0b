use std::path::PathBuf;

use locale_collate_runtime::{
    CollationContext, LocaleDataProvider, RuntimeConfig, load_config_or_default,
};

use crate::error::CliAppError;

pub const DEFAULT_CONFIG: &str = "locale-collate.toml";

/// Flags shared by every command that reads locale data.
#[derive(Debug, Clone)]
pub struct DataOptions {
    pub config_path: PathBuf,
    pub root: Option<PathBuf>,
    pub encoding: Option<String>,
}

impl Default for DataOptions {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG),
            root: None,
            encoding: None,
        }
    }
}

impl DataOptions {
    /// Consumes `flag` if it is one of the shared flags.
    pub fn accept(
        &mut self,
        flag: &str,
        iter: &mut impl Iterator<Item = String>,
    ) -> Result<bool, CliAppError> {
        match flag {
            "--config" => self.config_path = PathBuf::from(next_value(flag, iter)?),
            "--root" => self.root = Some(PathBuf::from(next_value(flag, iter)?)),
            "--encoding" => self.encoding = Some(next_value(flag, iter)?),
            _ => return Ok(false),
        }
        Ok(true)
    }

    pub fn config(&self) -> Result<RuntimeConfig, CliAppError> {
        let mut config = load_config_or_default(&self.config_path)?;
        if let Some(root) = &self.root {
            config.data_root = root.clone();
        }
        Ok(config)
    }

    pub fn encoding_or<'a>(&'a self, config: &'a RuntimeConfig) -> &'a str {
        self.encoding.as_deref().unwrap_or(&config.default_encoding)
    }
}

pub fn load_context<P>(
    provider: &P,
    config: &RuntimeConfig,
    encoding: &str,
) -> Result<CollationContext, CliAppError>
where
    P: LocaleDataProvider + ?Sized,
{
    let mut context = CollationContext::with_config(config);
    context.load_tables(provider, encoding)?;
    Ok(context)
}

pub fn next_value(
    flag: &str,
    iter: &mut impl Iterator<Item = String>,
) -> Result<String, CliAppError> {
    iter.next()
        .ok_or_else(|| CliAppError::Usage(format!("{flag} requires a value\n\n{}", usage())))
}

pub fn usage() -> String {
    "usage: locale-collate dump --encoding <name> [--json] [--root <dir>] [--config <path>]\n       locale-collate lookup --encoding <name> <text> [--root <dir>] [--config <path>]\n       locale-collate substitute --encoding <name> <text> [--root <dir>] [--config <path>]\n       locale-collate compare --encoding <name> <left> <right> [--root <dir>] [--config <path>]\n       locale-collate key --encoding <name> <text> [--root <dir>] [--config <path>]\n       locale-collate part --category <LC_*> --name <locale> --min <n> --max <n> [--root <dir>] [--config <path>]\n       locale-collate compile --source <table.toml> --out <path> [--legacy]".to_string()
}
