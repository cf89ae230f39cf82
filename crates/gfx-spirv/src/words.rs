// SPDX-License-Identifier: CEPL-1.0
use crate::EmitError;

pub const SPIRV_MAGIC: u32 = 0x0723_0203;

/// Splits a SPIR-V module into words. Byte order comes from the first byte:
/// the low byte of the magic means little-endian, anything else big-endian.
pub fn decode_words(bytes: &[u8]) -> Result<Vec<u32>, EmitError> {
    if bytes.is_empty() || bytes.len() % 4 != 0 {
        return Err(EmitError::MalformedBinary { len: bytes.len() });
    }

    let little = bytes[0] == (SPIRV_MAGIC & 0xff) as u8;
    let words: Vec<u32> = bytes
        .chunks_exact(4)
        .map(|c| {
            let w = [c[0], c[1], c[2], c[3]];
            if little {
                u32::from_le_bytes(w)
            } else {
                u32::from_be_bytes(w)
            }
        })
        .collect();

    if words[0] != SPIRV_MAGIC {
        return Err(EmitError::InvalidMagic { found: words[0] });
    }
    Ok(words)
}
