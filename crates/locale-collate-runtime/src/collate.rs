use std::cmp::Ordering;

use locale_collate_core::{
    Category, CollateTables, LoadStatus, Lookup, is_default_locale, lookup, shadowed_chains,
    sort_key, substitute, until_nul,
};
use tracing::{debug, info, warn};

use crate::config::RuntimeConfig;
use crate::error::{RuntimeError, RuntimeResult};
use crate::fatal::exit_with_error;
use crate::provider::LocaleDataProvider;

/// Collation state for one locale: the cached tables and the name they came from.
///
/// A context starts disabled, which means plain byte ordering. Each thread or
/// locale object owns its own context; nothing here is shared.
#[derive(Debug, Clone)]
pub struct CollationContext {
    encoding: Option<String>,
    tables: Option<CollateTables>,
    disabled: bool,
    warn_on_shadowed_chains: bool,
}

impl Default for CollationContext {
    fn default() -> Self {
        Self::new()
    }
}

impl CollationContext {
    pub fn new() -> Self {
        Self {
            encoding: None,
            tables: None,
            disabled: true,
            warn_on_shadowed_chains: true,
        }
    }

    pub fn with_config(config: &RuntimeConfig) -> Self {
        Self {
            warn_on_shadowed_chains: config.warn_on_shadowed_chains,
            ..Self::new()
        }
    }

    /// Selects the collation tables for `encoding`.
    ///
    /// `C` and `POSIX` disable collation without touching the cache. A repeat of
    /// the cached name re-enables it without fetching. Anything else is fetched
    /// and decoded; the cache is replaced only once decoding succeeds.
    pub fn load_tables<P>(&mut self, provider: &P, encoding: &str) -> RuntimeResult<LoadStatus>
    where
        P: LocaleDataProvider + ?Sized,
    {
        if is_default_locale(encoding) {
            debug!(encoding, "collation disabled");
            self.disabled = true;
            return Ok(LoadStatus::Cached);
        }

        if self.tables.is_some() && self.encoding.as_deref() == Some(encoding) {
            debug!(encoding, "collation cache hit");
            self.disabled = false;
            return Ok(LoadStatus::Cached);
        }

        let Some(blob) = provider.locale_data(Category::Collate, encoding) else {
            warn!(encoding, "no collation data");
            return Err(RuntimeError::NotFound {
                category: Category::Collate,
                name: encoding.to_string(),
            });
        };
        let tables = CollateTables::decode(&blob).inspect_err(|err| {
            warn!(encoding, error = %err, "rejected collation table");
        })?;

        if self.warn_on_shadowed_chains {
            for (earlier, later) in shadowed_chains(&tables) {
                warn!(
                    encoding,
                    earlier,
                    later,
                    chain = %tables.chains()[later].text.escape_ascii(),
                    "chain can never match"
                );
            }
        }

        info!(
            encoding,
            format = ?tables.format(),
            chains = tables.chains().len(),
            substitute_nontrivial = tables.substitute_nontrivial(),
            "collation tables loaded"
        );
        self.tables = Some(tables);
        self.encoding = Some(encoding.to_string());
        self.disabled = false;
        Ok(LoadStatus::Loaded)
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Name of the cached tables, which stay resident while disabled.
    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }

    pub fn tables(&self) -> Option<&CollateTables> {
        self.tables.as_ref()
    }

    pub fn substitute_nontrivial(&self) -> bool {
        self.active_tables()
            .map(CollateTables::substitute_nontrivial)
            .unwrap_or(false)
    }

    pub fn substitute(&self, input: Option<&[u8]>) -> RuntimeResult<Vec<u8>> {
        Ok(substitute(self.active_tables()?, input)?)
    }

    /// Like [`substitute`](Self::substitute), for callers with no error path.
    ///
    /// Memory exhaustion ends the process with a diagnostic. While disabled the
    /// input is returned unchanged, as the C locale substitutes nothing.
    pub fn substitute_or_exit(&self, input: Option<&[u8]>) -> Vec<u8> {
        match self.substitute(input) {
            Ok(out) => out,
            Err(err) if err.is_out_of_memory() => exit_with_error("substitute", &err),
            Err(_) => until_nul(input.unwrap_or_default()).to_vec(),
        }
    }

    pub fn lookup(&self, text: &[u8]) -> RuntimeResult<Lookup> {
        Ok(lookup(self.active_tables()?, text))
    }

    /// Orders two C strings, falling back to byte order while disabled.
    pub fn compare(&self, left: &[u8], right: &[u8]) -> RuntimeResult<Ordering> {
        match self.active_tables() {
            Ok(tables) => Ok(locale_collate_core::compare(tables, left, right)?),
            Err(_) => Ok(until_nul(left).cmp(until_nul(right))),
        }
    }

    pub fn sort_key(&self, input: &[u8]) -> RuntimeResult<Vec<i32>> {
        match self.active_tables() {
            Ok(tables) => Ok(sort_key(tables, input)?),
            Err(_) => Ok(until_nul(input).iter().map(|&byte| i32::from(byte)).collect()),
        }
    }

    fn active_tables(&self) -> RuntimeResult<&CollateTables> {
        if self.disabled {
            return Err(RuntimeError::Disabled);
        }
        self.tables.as_ref().ok_or(RuntimeError::Disabled)
    }
}
