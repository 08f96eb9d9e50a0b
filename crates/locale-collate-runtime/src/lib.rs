#![forbid(unsafe_code)]

mod collate;
mod config;
mod error;
mod fatal;
mod part_cache;
mod provider;

pub use crate::collate::CollationContext;
pub use crate::config::{RuntimeConfig, load_config, load_config_or_default};
pub use crate::error::{RuntimeError, RuntimeResult};
pub use crate::fatal::{EX_OSERR, exit_with_error, fatal_message, program_name};
pub use crate::part_cache::PartCache;
pub use crate::provider::{DirectoryProvider, LocaleDataProvider, MemoryProvider};
pub use locale_collate_core::{Category, CollateTables, LoadStatus, Lookup, Weights};
