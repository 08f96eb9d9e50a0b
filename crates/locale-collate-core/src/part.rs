use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Range;

use crate::{CoreError, CoreResult};

/// A locale category file split into newline-terminated fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalePart {
    name: String,
    buffer: Vec<u8>,
    lines: Vec<Range<usize>>,
    max_lines: usize,
}

impl LocalePart {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn max_lines(&self) -> usize {
        self.max_lines
    }

    pub fn field(&self, index: usize) -> Option<&[u8]> {
        self.lines
            .get(index)
            .map(|range| &self.buffer[range.clone()])
    }

    pub fn field_str(&self, index: usize) -> Option<&str> {
        self.field(index)
            .and_then(|bytes| core::str::from_utf8(bytes).ok())
    }

    /// Every field slot up to `max_lines`; slots past the parsed lines are `None`.
    pub fn fields(&self) -> Vec<Option<&[u8]>> {
        (0..self.max_lines).map(|index| self.field(index)).collect()
    }
}

pub fn parse_locale_part(
    name: &str,
    blob: &[u8],
    min_lines: usize,
    max_lines: usize,
) -> CoreResult<LocalePart> {
    if blob.last() != Some(&b'\n') {
        return Err(CoreError::InvalidFormat("locale part missing trailing newline"));
    }

    let mut lines = Vec::new();
    let mut start = 0usize;
    for (index, &byte) in blob.iter().enumerate() {
        if byte == b'\n' {
            lines.push(start..index);
            start = index + 1;
        }
    }
    if lines.len() < min_lines || lines.len() > max_lines {
        return Err(CoreError::InvalidFormat("locale part line count out of range"));
    }

    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(blob.len())
        .map_err(|_| CoreError::OutOfMemory("locale part"))?;
    buffer.extend_from_slice(blob);

    Ok(LocalePart {
        name: String::from(name),
        buffer,
        lines,
        max_lines,
    })
}
