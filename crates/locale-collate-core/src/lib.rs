#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod codec;
mod collate_encode;
mod collate_tables;
mod compare;
mod error;
mod limits;
mod part;
mod query;
mod types;

pub use codec::{decode_i32_be, decode_u32_be, slot_str, until_nul};
pub use collate_encode::CollateTablesBuilder;
pub use collate_tables::{ChainEntry, CollateTables, TableFormat};
pub use compare::{compare, sort_key};
pub use error::{CoreError, CoreResult};
pub use limits::{
    CHAIN_ENTRY_LEN, CHAR_PRI_ENTRY_LEN, CHAR_TABLE_LEN, COLLATE_VERSION, COLLATE_VERSION1_2,
    STR_LEN, TABLE_SIZE,
};
pub use part::{LocalePart, parse_locale_part};
pub use query::{Lookup, lookup, shadowed_chains, substitute};
pub use types::{Category, LoadStatus, Weights, is_default_locale};
