/// Width of every fixed string slot in a compiled collation table.
pub const STR_LEN: usize = 10;

/// Chain table length of the legacy `1.0` format.
pub const TABLE_SIZE: usize = 100;

pub const CHAR_TABLE_LEN: usize = 256;

pub const COLLATE_VERSION: &[u8] = b"1.0\n";
pub const COLLATE_VERSION1_2: &[u8] = b"1.2\n";

pub const CHAR_PRI_ENTRY_LEN: usize = 4 + 4;

// str[STR_LEN], two bytes of alignment padding, prim, sec.
pub const CHAIN_ENTRY_LEN: usize = STR_LEN + 2 + 4 + 4;
pub(crate) const CHAIN_WEIGHTS_OFFSET: usize = STR_LEN + 2;

pub(crate) const SUBSTITUTE_TABLE_LEN: usize = CHAR_TABLE_LEN * STR_LEN;
pub(crate) const CHAR_PRI_TABLE_LEN: usize = CHAR_TABLE_LEN * CHAR_PRI_ENTRY_LEN;
