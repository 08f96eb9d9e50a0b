use alloc::vec::Vec;
use core::fmt;

use crate::codec::{slot_str, take, until_nul};
use crate::limits::{
    CHAIN_ENTRY_LEN, CHAIN_WEIGHTS_OFFSET, CHAR_PRI_ENTRY_LEN, CHAR_PRI_TABLE_LEN, CHAR_TABLE_LEN,
    COLLATE_VERSION, COLLATE_VERSION1_2, STR_LEN, SUBSTITUTE_TABLE_LEN, TABLE_SIZE,
};
use crate::{CoreError, CoreResult, Weights, decode_i32_be};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableFormat {
    /// `1.0`: the chain table always holds `TABLE_SIZE` entries.
    Legacy,
    /// `1.2`: a big-endian chain count follows the version tag.
    Counted,
}

impl TableFormat {
    pub fn version_tag(self) -> &'static [u8] {
        match self {
            TableFormat::Legacy => COLLATE_VERSION,
            TableFormat::Counted => COLLATE_VERSION1_2,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainEntry {
    pub text: Vec<u8>,
    pub weights: Weights,
}

/// Decoded substitution, char-priority and chain-priority tables.
///
/// All weights are held in host order. `chains` stops before the first
/// sentinel entry (empty string), which is where lookups stop scanning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollateTables {
    format: TableFormat,
    substitutions: Vec<Vec<u8>>,
    char_priorities: Vec<Weights>,
    chains: Vec<ChainEntry>,
    declared_chains: usize,
    substitute_nontrivial: bool,
}

impl CollateTables {
    pub fn decode(input: &[u8]) -> CoreResult<Self> {
        let mut cursor = 0usize;
        let tag = until_nul(take(input, &mut cursor, STR_LEN)?);
        let format = if tag == COLLATE_VERSION {
            TableFormat::Legacy
        } else if tag == COLLATE_VERSION1_2 {
            TableFormat::Counted
        } else {
            return Err(CoreError::InvalidFormat("unknown collate version tag"));
        };

        let declared_chains = match format {
            TableFormat::Legacy => TABLE_SIZE,
            TableFormat::Counted => {
                let count = decode_i32_be(take(input, &mut cursor, 4)?)?;
                if count < 1 {
                    return Err(CoreError::InvalidFormat("chain count must be positive"));
                }
                count as usize
            }
        };

        let chain_table_len = declared_chains
            .checked_mul(CHAIN_ENTRY_LEN)
            .ok_or(CoreError::InvalidFormat("chain table too large"))?;
        let body_len = body_len(chain_table_len)?;
        if input.len() - cursor < body_len {
            return Err(CoreError::InvalidFormat("collate table truncated"));
        }

        let substitutions = decode_substitutions(take(input, &mut cursor, SUBSTITUTE_TABLE_LEN)?)?;
        let char_priorities = decode_char_priorities(take(input, &mut cursor, CHAR_PRI_TABLE_LEN)?)?;
        let chains = decode_chains(take(input, &mut cursor, chain_table_len)?, declared_chains)?;

        let substitute_nontrivial = substitutions
            .iter()
            .enumerate()
            .any(|(byte, replacement)| !is_identity(byte, replacement));

        Ok(Self {
            format,
            substitutions,
            char_priorities,
            chains,
            declared_chains,
            substitute_nontrivial,
        })
    }

    pub fn format(&self) -> TableFormat {
        self.format
    }

    pub fn substitution(&self, byte: u8) -> &[u8] {
        &self.substitutions[usize::from(byte)]
    }

    pub fn char_priority(&self, byte: u8) -> Weights {
        self.char_priorities[usize::from(byte)]
    }

    pub fn chains(&self) -> &[ChainEntry] {
        &self.chains
    }

    /// Chain table length recorded in the blob, sentinel and padding included.
    pub fn declared_chains(&self) -> usize {
        self.declared_chains
    }

    /// False when every byte substitutes to itself, so substitution can be skipped.
    pub fn substitute_nontrivial(&self) -> bool {
        self.substitute_nontrivial
    }
}

fn body_len(chain_table_len: usize) -> CoreResult<usize> {
    (SUBSTITUTE_TABLE_LEN + CHAR_PRI_TABLE_LEN)
        .checked_add(chain_table_len)
        .ok_or(CoreError::InvalidFormat("chain table too large"))
}

fn is_identity(byte: usize, replacement: &[u8]) -> bool {
    if byte == 0 {
        replacement.is_empty()
    } else {
        replacement.len() == 1 && usize::from(replacement[0]) == byte
    }
}

fn try_with_capacity<T>(capacity: usize, what: &'static str) -> CoreResult<Vec<T>> {
    let mut out = Vec::new();
    out.try_reserve_exact(capacity)
        .map_err(|_| CoreError::OutOfMemory(what))?;
    Ok(out)
}

fn try_copy(bytes: &[u8], what: &'static str) -> CoreResult<Vec<u8>> {
    let mut out = try_with_capacity(bytes.len(), what)?;
    out.extend_from_slice(bytes);
    Ok(out)
}

fn decode_substitutions(input: &[u8]) -> CoreResult<Vec<Vec<u8>>> {
    let mut table = try_with_capacity(CHAR_TABLE_LEN, "substitute table")?;
    for slot in input.chunks_exact(STR_LEN) {
        let replacement = slot_str(slot)
            .map_err(|_| CoreError::InvalidFormat("unterminated substitution entry"))?;
        table.push(try_copy(replacement, "substitute table")?);
    }
    Ok(table)
}

fn decode_char_priorities(input: &[u8]) -> CoreResult<Vec<Weights>> {
    let mut table = try_with_capacity(CHAR_TABLE_LEN, "char priority table")?;
    for entry in input.chunks_exact(CHAR_PRI_ENTRY_LEN) {
        table.push(Weights::new(
            decode_i32_be(&entry[..4])?,
            decode_i32_be(&entry[4..])?,
        ));
    }
    Ok(table)
}

fn decode_chains(input: &[u8], declared: usize) -> CoreResult<Vec<ChainEntry>> {
    let mut chains = try_with_capacity(declared, "chain priority table")?;
    for entry in input.chunks_exact(CHAIN_ENTRY_LEN) {
        let text = slot_str(&entry[..STR_LEN])
            .map_err(|_| CoreError::InvalidFormat("unterminated chain entry"))?;
        if text.is_empty() {
            break;
        }
        let weights = &entry[CHAIN_WEIGHTS_OFFSET..];
        chains.push(ChainEntry {
            text: try_copy(text, "chain priority table")?,
            weights: Weights::new(decode_i32_be(&weights[..4])?, decode_i32_be(&weights[4..])?),
        });
    }
    Ok(chains)
}

impl fmt::Display for CollateTables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Substitute table:")?;
        for (byte, replacement) in self.substitutions.iter().enumerate() {
            if !is_identity(byte, replacement) {
                writeln!(
                    f,
                    "\t'{}' --> \"{}\"",
                    (byte as u8).escape_ascii(),
                    replacement.escape_ascii()
                )?;
            }
        }
        writeln!(f, "Chain priority table:")?;
        for chain in &self.chains {
            writeln!(
                f,
                "\t\"{}\" : {} {}",
                chain.text.escape_ascii(),
                chain.weights.primary,
                chain.weights.secondary
            )?;
        }
        writeln!(f, "Char priority table:")?;
        for (byte, weights) in self.char_priorities.iter().enumerate() {
            writeln!(
                f,
                "\t'{}' : {} {}",
                (byte as u8).escape_ascii(),
                weights.primary,
                weights.secondary
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec::Vec;

    use super::{CollateTables, TableFormat, body_len};
    use crate::limits::{CHAIN_ENTRY_LEN, CHAR_PRI_TABLE_LEN, STR_LEN, SUBSTITUTE_TABLE_LEN};
    use crate::{CollateTablesBuilder, CoreError, TABLE_SIZE, Weights};

    fn counted_header(count: i32) -> Vec<u8> {
        let mut bytes = Vec::new();
        let mut tag = [0u8; STR_LEN];
        tag[..4].copy_from_slice(b"1.2\n");
        bytes.extend_from_slice(&tag);
        bytes.extend_from_slice(&count.to_be_bytes());
        bytes
    }

    #[test]
    fn decodes_counted_tables() {
        let bytes = CollateTablesBuilder::new()
            .substitute(b'a', b"ae")
            .char_weights(b'b', Weights::new(7, 3))
            .chain(b"ch", Weights::new(300, 1))
            .encode()
            .expect("encode");
        let tables = CollateTables::decode(&bytes).expect("tables");
        assert_eq!(tables.format(), TableFormat::Counted);
        assert_eq!(tables.substitution(b'a'), b"ae");
        assert_eq!(tables.substitution(b'z'), b"z");
        assert_eq!(tables.char_priority(b'b'), Weights::new(7, 3));
        assert_eq!(tables.chains().len(), 1);
        assert_eq!(tables.chains()[0].text, b"ch");
        assert_eq!(tables.chains()[0].weights, Weights::new(300, 1));
        assert_eq!(tables.declared_chains(), 2);
        assert!(tables.substitute_nontrivial());
    }

    #[test]
    fn decodes_legacy_tables() {
        let bytes = CollateTablesBuilder::new()
            .chain(b"ll", Weights::new(12, 0))
            .encode_legacy()
            .expect("encode");
        let tables = CollateTables::decode(&bytes).expect("tables");
        assert_eq!(tables.format(), TableFormat::Legacy);
        assert_eq!(tables.declared_chains(), TABLE_SIZE);
        assert_eq!(tables.chains().len(), 1);
        assert!(!tables.substitute_nontrivial());
    }

    #[test]
    fn converts_negative_weights_from_network_order() {
        let bytes = CollateTablesBuilder::new()
            .char_weights(b'x', Weights::new(-1, i32::MIN))
            .encode()
            .expect("encode");
        let tables = CollateTables::decode(&bytes).expect("tables");
        assert_eq!(tables.char_priority(b'x'), Weights::new(-1, i32::MIN));
    }

    #[test]
    fn rejects_unknown_version_tag() {
        let mut bytes = CollateTablesBuilder::new().encode().expect("encode");
        bytes[2] = b'9';
        let err = CollateTables::decode(&bytes).expect_err("tag");
        assert_eq!(err, CoreError::InvalidFormat("unknown collate version tag"));
    }

    #[test]
    fn rejects_zero_and_negative_chain_counts() {
        for count in [0, -1, i32::MIN] {
            let err = CollateTables::decode(&counted_header(count)).expect_err("count");
            assert_eq!(err, CoreError::InvalidFormat("chain count must be positive"));
        }
    }

    #[test]
    fn rejects_truncated_body() {
        let mut bytes = counted_header(1);
        bytes.resize(bytes.len() + SUBSTITUTE_TABLE_LEN + CHAR_PRI_TABLE_LEN, 0);
        let err = CollateTables::decode(&bytes).expect_err("truncated");
        assert_eq!(err, CoreError::InvalidFormat("collate table truncated"));
    }

    #[test]
    fn rejects_huge_count_before_allocating() {
        let err = CollateTables::decode(&counted_header(i32::MAX)).expect_err("huge");
        assert!(err.is_format());
    }

    #[test]
    fn body_length_overflow_is_a_format_error() {
        let chain_table_len = usize::MAX - CHAR_PRI_TABLE_LEN;
        let err = body_len(chain_table_len).expect_err("overflow");
        assert_eq!(err, CoreError::InvalidFormat("chain table too large"));
        assert_eq!(
            body_len(CHAIN_ENTRY_LEN).expect("len"),
            SUBSTITUTE_TABLE_LEN + CHAR_PRI_TABLE_LEN + CHAIN_ENTRY_LEN
        );
    }

    #[test]
    fn rejects_unterminated_substitution_slot() {
        let mut bytes = CollateTablesBuilder::new().encode().expect("encode");
        let slot = STR_LEN + 4 + usize::from(b'q') * STR_LEN;
        bytes[slot..slot + STR_LEN].fill(b'q');
        let err = CollateTables::decode(&bytes).expect_err("slot");
        assert_eq!(err, CoreError::InvalidFormat("unterminated substitution entry"));
    }

    #[test]
    fn stops_at_sentinel_chain() {
        let mut bytes = counted_header(3);
        let mut subst = [0u8; SUBSTITUTE_TABLE_LEN];
        for byte in 1..=255usize {
            subst[byte * STR_LEN] = byte as u8;
        }
        bytes.extend_from_slice(&subst);
        bytes.resize(bytes.len() + CHAR_PRI_TABLE_LEN, 0);
        let mut chain = [0u8; CHAIN_ENTRY_LEN];
        chain[..2].copy_from_slice(b"dz");
        bytes.extend_from_slice(&chain);
        bytes.extend_from_slice(&[0u8; CHAIN_ENTRY_LEN]);
        let mut hidden = [0u8; CHAIN_ENTRY_LEN];
        hidden[..2].copy_from_slice(b"ij");
        bytes.extend_from_slice(&hidden);
        let tables = CollateTables::decode(&bytes).expect("tables");
        assert_eq!(tables.chains().len(), 1);
        assert_eq!(tables.chains()[0].text, b"dz");
        assert!(!tables.substitute_nontrivial());
    }

    #[test]
    fn display_lists_only_nontrivial_substitutions() {
        let bytes = CollateTablesBuilder::new()
            .substitute(b's', b"ss")
            .chain(b"ch", Weights::new(5, 6))
            .encode()
            .expect("encode");
        let dump = CollateTables::decode(&bytes).expect("tables").to_string();
        assert!(dump.starts_with("Substitute table:\n\t's' --> \"ss\"\nChain priority table:\n"));
        assert!(dump.contains("\t\"ch\" : 5 6\n"));
        assert!(dump.contains("Char priority table:\n"));
    }
}
