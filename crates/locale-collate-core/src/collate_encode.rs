use alloc::vec;
use alloc::vec::Vec;

use crate::limits::{CHAIN_ENTRY_LEN, CHAIN_WEIGHTS_OFFSET, CHAR_TABLE_LEN, STR_LEN, TABLE_SIZE};
use crate::{CoreError, CoreResult, TableFormat, Weights};

/// Producer side of the compiled collation format.
#[derive(Clone, Debug)]
pub struct CollateTablesBuilder {
    substitutions: Vec<Vec<u8>>,
    char_priorities: Vec<Weights>,
    chains: Vec<(Vec<u8>, Weights)>,
}

impl Default for CollateTablesBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CollateTablesBuilder {
    pub fn new() -> Self {
        let substitutions = (0..CHAR_TABLE_LEN)
            .map(|byte| if byte == 0 { Vec::new() } else { vec![byte as u8] })
            .collect();
        Self {
            substitutions,
            char_priorities: vec![Weights::default(); CHAR_TABLE_LEN],
            chains: Vec::new(),
        }
    }

    pub fn substitute(mut self, byte: u8, replacement: &[u8]) -> Self {
        self.substitutions[usize::from(byte)] = replacement.to_vec();
        self
    }

    pub fn char_weights(mut self, byte: u8, weights: Weights) -> Self {
        self.char_priorities[usize::from(byte)] = weights;
        self
    }

    /// Appends a chain. Earlier chains win, so add longer ones first.
    pub fn chain(mut self, text: &[u8], weights: Weights) -> Self {
        self.chains.push((text.to_vec(), weights));
        self
    }

    pub fn encode(&self) -> CoreResult<Vec<u8>> {
        let count = self.chains.len() + 1;
        let count = i32::try_from(count)
            .map_err(|_| CoreError::InvalidFormat("too many chains"))?;
        self.encode_with(TableFormat::Counted, count as usize)
    }

    /// Encodes the `1.0` layout, padding the chain table to `TABLE_SIZE`.
    pub fn encode_legacy(&self) -> CoreResult<Vec<u8>> {
        if self.chains.len() >= TABLE_SIZE {
            return Err(CoreError::InvalidFormat("too many chains for legacy table"));
        }
        self.encode_with(TableFormat::Legacy, TABLE_SIZE)
    }

    fn encode_with(&self, format: TableFormat, chain_slots: usize) -> CoreResult<Vec<u8>> {
        let mut out = Vec::new();
        put_slot(&mut out, format.version_tag())?;
        if format == TableFormat::Counted {
            out.extend_from_slice(&(chain_slots as u32).to_be_bytes());
        }
        for replacement in &self.substitutions {
            put_slot(&mut out, replacement)
                .map_err(|_| CoreError::InvalidFormat("substitution too long"))?;
        }
        for weights in &self.char_priorities {
            put_weights(&mut out, *weights);
        }
        for (text, weights) in &self.chains {
            if text.is_empty() {
                return Err(CoreError::InvalidFormat("empty chain"));
            }
            let start = out.len();
            put_slot(&mut out, text).map_err(|_| CoreError::InvalidFormat("chain too long"))?;
            out.resize(start + CHAIN_WEIGHTS_OFFSET, 0);
            put_weights(&mut out, *weights);
        }
        let padding = (chain_slots - self.chains.len()) * CHAIN_ENTRY_LEN;
        out.resize(out.len() + padding, 0);
        Ok(out)
    }
}

fn put_slot(out: &mut Vec<u8>, text: &[u8]) -> CoreResult<()> {
    if text.len() >= STR_LEN || text.contains(&0) {
        return Err(CoreError::InvalidFormat("string does not fit slot"));
    }
    let mut slot = [0u8; STR_LEN];
    slot[..text.len()].copy_from_slice(text);
    out.extend_from_slice(&slot);
    Ok(())
}

fn put_weights(out: &mut Vec<u8>, weights: Weights) {
    out.extend_from_slice(&weights.primary.to_be_bytes());
    out.extend_from_slice(&weights.secondary.to_be_bytes());
}

#[cfg(test)]
mod tests {
    use super::CollateTablesBuilder;
    use crate::limits::{CHAIN_ENTRY_LEN, CHAR_PRI_TABLE_LEN, STR_LEN, SUBSTITUTE_TABLE_LEN};
    use crate::{CoreError, TABLE_SIZE, Weights};

    #[test]
    fn counted_layout_has_expected_size() {
        let bytes = CollateTablesBuilder::new()
            .chain(b"ch", Weights::new(1, 1))
            .encode()
            .expect("encode");
        let expected = STR_LEN + 4 + SUBSTITUTE_TABLE_LEN + CHAR_PRI_TABLE_LEN + 2 * CHAIN_ENTRY_LEN;
        assert_eq!(bytes.len(), expected);
        assert_eq!(&bytes[..4], b"1.2\n");
        assert_eq!(&bytes[STR_LEN..STR_LEN + 4], &2u32.to_be_bytes());
    }

    #[test]
    fn legacy_layout_pads_chain_table() {
        let bytes = CollateTablesBuilder::new().encode_legacy().expect("encode");
        let expected =
            STR_LEN + SUBSTITUTE_TABLE_LEN + CHAR_PRI_TABLE_LEN + TABLE_SIZE * CHAIN_ENTRY_LEN;
        assert_eq!(bytes.len(), expected);
        assert_eq!(&bytes[..4], b"1.0\n");
    }

    #[test]
    fn chain_weights_follow_padding() {
        let bytes = CollateTablesBuilder::new()
            .chain(b"ch", Weights::new(0x0102_0304, -1))
            .encode()
            .expect("encode");
        let chain = STR_LEN + 4 + SUBSTITUTE_TABLE_LEN + CHAR_PRI_TABLE_LEN;
        assert_eq!(&bytes[chain..chain + 2], b"ch");
        assert_eq!(&bytes[chain + 12..chain + 16], &[1, 2, 3, 4]);
        assert_eq!(&bytes[chain + 16..chain + 20], &[0xff; 4]);
    }

    #[test]
    fn rejects_oversized_strings() {
        let err = CollateTablesBuilder::new()
            .chain(b"0123456789", Weights::default())
            .encode()
            .expect_err("long chain");
        assert_eq!(err, CoreError::InvalidFormat("chain too long"));

        let err = CollateTablesBuilder::new()
            .substitute(b'a', b"aaaaaaaaaa")
            .encode()
            .expect_err("long substitution");
        assert_eq!(err, CoreError::InvalidFormat("substitution too long"));
    }

    #[test]
    fn rejects_empty_chain() {
        let err = CollateTablesBuilder::new()
            .chain(b"", Weights::default())
            .encode()
            .expect_err("empty");
        assert_eq!(err, CoreError::InvalidFormat("empty chain"));
    }

    #[test]
    fn legacy_rejects_full_chain_table() {
        let mut builder = CollateTablesBuilder::new();
        for index in 0..TABLE_SIZE {
            builder = builder.chain(&[b'a', b'a' + (index % 26) as u8], Weights::default());
        }
        let err = builder.encode_legacy().expect_err("full");
        assert_eq!(err, CoreError::InvalidFormat("too many chains for legacy table"));
    }
}
