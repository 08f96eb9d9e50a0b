use alloc::vec::Vec;

use crate::codec::until_nul;
use crate::{CollateTables, CoreError, CoreResult, Weights};

/// Result of a single collation lookup step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lookup {
    /// Bytes consumed from the input.
    pub len: usize,
    pub weights: Weights,
}

/// Expands every byte through the substitution table.
///
/// `None` and empty input both produce an empty buffer. Input is read as a C
/// string, so anything after an embedded NUL is ignored.
pub fn substitute(tables: &CollateTables, input: Option<&[u8]>) -> CoreResult<Vec<u8>> {
    expand(tables, input.unwrap_or_default()).map(|(out, _)| out)
}

// Returns the expansion and how many times the buffer had to grow.
pub(crate) fn expand(tables: &CollateTables, input: &[u8]) -> CoreResult<(Vec<u8>, usize)> {
    let input = until_nul(input);
    if input.is_empty() {
        return Ok((Vec::new(), 0));
    }
    let delta = input.len() + input.len() / 8;
    let mut out = Vec::new();
    out.try_reserve_exact(delta)
        .map_err(|_| CoreError::OutOfMemory("substitute"))?;
    let mut capacity = delta;
    let mut growths = 0usize;
    for &byte in input {
        let replacement = tables.substitution(byte);
        let needed = out.len() + replacement.len();
        // keep one spare byte, the buffer historically held a terminator
        if capacity <= needed {
            capacity = needed + delta;
            out.try_reserve_exact(capacity - out.len())
                .map_err(|_| CoreError::OutOfMemory("substitute"))?;
            growths += 1;
        }
        out.extend_from_slice(replacement);
    }
    Ok((out, growths))
}

/// Finds the weights for the collating element at the start of `text`.
///
/// Chains are scanned in table order and the first one that prefixes `text`
/// wins, even when a longer chain appears later. Without a chain match the
/// first byte's char priority is used.
pub fn lookup(tables: &CollateTables, text: &[u8]) -> Lookup {
    let Some(&first) = text.first() else {
        return Lookup {
            len: 1,
            weights: tables.char_priority(0),
        };
    };
    for chain in tables.chains() {
        if chain.text[0] == first && text.starts_with(&chain.text) {
            return Lookup {
                len: chain.text.len(),
                weights: chain.weights,
            };
        }
    }
    Lookup {
        len: 1,
        weights: tables.char_priority(first),
    }
}

/// Lists `(earlier, later)` chain indices where `later` can never match
/// because `earlier` is a prefix of it.
pub fn shadowed_chains(tables: &CollateTables) -> Vec<(usize, usize)> {
    let chains = tables.chains();
    let mut shadowed = Vec::new();
    for (later, entry) in chains.iter().enumerate() {
        if let Some(earlier) = chains[..later]
            .iter()
            .position(|candidate| entry.text.starts_with(&candidate.text))
        {
            shadowed.push((earlier, later));
        }
    }
    shadowed
}
