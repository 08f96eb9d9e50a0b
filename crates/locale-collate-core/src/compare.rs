use alloc::borrow::Cow;
use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::codec::until_nul;
use crate::{CollateTables, CoreResult, Weights, lookup, substitute};

/// Compares two C strings under the loaded collation tables.
///
/// Primary weights decide first; the first differing secondary weight breaks
/// ties. Elements whose primary weight is zero are ignored.
pub fn compare(tables: &CollateTables, left: &[u8], right: &[u8]) -> CoreResult<Ordering> {
    let left = prepare(tables, left)?;
    let right = prepare(tables, right)?;
    let mut left = left.as_ref();
    let mut right = right.as_ref();
    let mut secondary = Ordering::Equal;

    loop {
        match (next_weighted(tables, &mut left), next_weighted(tables, &mut right)) {
            (Some(left_weights), Some(right_weights)) => {
                if left_weights.primary != right_weights.primary {
                    return Ok(left_weights.primary.cmp(&right_weights.primary));
                }
                if secondary == Ordering::Equal {
                    secondary = left_weights.secondary.cmp(&right_weights.secondary);
                }
            }
            // the side with weighted elements left sorts after
            (Some(_), None) => return Ok(Ordering::Greater),
            (None, Some(_)) => return Ok(Ordering::Less),
            (None, None) => return Ok(secondary),
        }
    }
}

/// Builds a key whose lexicographic order follows the primary weights.
pub fn sort_key(tables: &CollateTables, input: &[u8]) -> CoreResult<Vec<i32>> {
    let prepared = prepare(tables, input)?;
    let mut rest = prepared.as_ref();
    let mut key = Vec::new();
    while let Some(weights) = next_weighted(tables, &mut rest) {
        key.push(weights.primary);
    }
    Ok(key)
}

fn prepare<'a>(tables: &CollateTables, input: &'a [u8]) -> CoreResult<Cow<'a, [u8]>> {
    if tables.substitute_nontrivial() {
        Ok(Cow::Owned(substitute(tables, Some(input))?))
    } else {
        Ok(Cow::Borrowed(until_nul(input)))
    }
}

// Advances past elements with no primary weight and returns the next weighted one.
fn next_weighted(tables: &CollateTables, rest: &mut &[u8]) -> Option<Weights> {
    while !rest.is_empty() {
        let step = lookup(tables, rest);
        *rest = &rest[step.len.min(rest.len())..];
        if step.weights.primary != 0 {
            return Some(step.weights);
        }
    }
    None
}
