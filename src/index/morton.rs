//! Morton (Z-order) keys
//!
//! x occupies the even bits and y the odd bits of a 32-bit key, so each axis
//! holds at most 16 bits.

/// Bits available per axis in a `u32` key
pub const BITS_PER_AXIS: u32 = 16;

/// Spread the low 16 bits of `v` onto the even bit positions
#[inline]
fn spread_bits(v: u32) -> u32 {
    let mut x = v & 0x0000_FFFF;
    x = (x | (x << 8)) & 0x00FF_00FF;
    x = (x | (x << 4)) & 0x0F0F_0F0F;
    x = (x | (x << 2)) & 0x3333_3333;
    x = (x | (x << 1)) & 0x5555_5555;
    x
}

/// Inverse of [`spread_bits`]: gather the even bits into the low 16 bits
#[inline]
fn compact_bits(v: u32) -> u32 {
    let mut x = v & 0x5555_5555;
    x = (x | (x >> 1)) & 0x3333_3333;
    x = (x | (x >> 2)) & 0x0F0F_0F0F;
    x = (x | (x >> 4)) & 0x00FF_00FF;
    x = (x | (x >> 8)) & 0x0000_FFFF;
    x
}

/// Interleave grid coordinates into a key
#[inline]
pub fn encode(x: u16, y: u16) -> u32 {
    spread_bits(x as u32) | (spread_bits(y as u32) << 1)
}

/// De-interleave a key into `(x, y)` grid coordinates
#[inline]
pub fn decode(key: u32) -> (u16, u16) {
    (compact_bits(key) as u16, compact_bits(key >> 1) as u16)
}

/// Key of the ancestor `levels_up` levels above `key`
#[inline]
pub fn parent_key(key: u32, levels_up: u32) -> u32 {
    if levels_up >= BITS_PER_AXIS {
        0
    } else {
        key >> (2 * levels_up)
    }
}
