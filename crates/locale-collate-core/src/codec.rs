use crate::{CoreError, CoreResult};

pub fn decode_u32_be(input: &[u8]) -> CoreResult<u32> {
    let bytes: [u8; 4] = input
        .get(..4)
        .and_then(|head| head.try_into().ok())
        .ok_or(CoreError::InvalidFormat("unexpected eof"))?;
    Ok(u32::from_be_bytes(bytes))
}

pub fn decode_i32_be(input: &[u8]) -> CoreResult<i32> {
    decode_u32_be(input).map(|value| value as i32)
}

/// Returns the bytes of a NUL-terminated string stored in a fixed slot.
pub fn slot_str(slot: &[u8]) -> CoreResult<&[u8]> {
    let end = slot
        .iter()
        .position(|&byte| byte == 0)
        .ok_or(CoreError::InvalidFormat("unterminated string slot"))?;
    Ok(&slot[..end])
}

pub(crate) fn take<'a>(input: &'a [u8], cursor: &mut usize, len: usize) -> CoreResult<&'a [u8]> {
    let end = cursor
        .checked_add(len)
        .ok_or(CoreError::InvalidFormat("length overflow"))?;
    if end > input.len() {
        return Err(CoreError::InvalidFormat("unexpected eof"));
    }
    let slice = &input[*cursor..end];
    *cursor = end;
    Ok(slice)
}

/// Truncates a byte string at its first NUL, the way C string routines see it.
pub fn until_nul(input: &[u8]) -> &[u8] {
    match input.iter().position(|&byte| byte == 0) {
        Some(end) => &input[..end],
        None => input,
    }
}
