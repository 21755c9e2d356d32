use crate::helpers::aliases::Vec3u;

/// Bits available per axis in a 63-bit interleaved key
pub const COORD_BITS: u32 = 21;

const X_MASK: u64 = 0x1249249249249249;
const COORD_MASK: u64 = (1 << COORD_BITS) - 1;

/// Interleaves three 21-bit coordinates into a Z-order key. Bit `3k` of the
/// key comes from x, `3k + 1` from y, `3k + 2` from z.
///
/// Coordinates at or above `2^21` are a caller bug and abort.
#[inline]
pub fn encode(coord: &Vec3u) -> u64 {
    assert!(
        coord.x < (1 << COORD_BITS) && coord.y < (1 << COORD_BITS) && coord.z < (1 << COORD_BITS),
        "coordinate out of morton range: ({}, {}, {})",
        coord.x,
        coord.y,
        coord.z
    );

    split_by_3(coord.x as u64) | split_by_3(coord.y as u64) << 1 | split_by_3(coord.z as u64) << 2
}

/// Keys at or above `2^63` are a caller bug and abort.
#[inline]
pub fn decode(key: u64) -> Vec3u {
    assert!(
        key < (1 << (3 * COORD_BITS)),
        "key out of morton range: {}",
        key
    );

    Vec3u::new(
        compact_by_3(key) as u32,
        compact_by_3(key >> 1) as u32,
        compact_by_3(key >> 2) as u32,
    )
}

/// Dilates the low 21 bits so each ends up at every third position
#[inline]
const fn split_by_3(value: u64) -> u64 {
    let mut x = value & COORD_MASK;
    x = (x | x << 32) & 0x1f00000000ffff;
    x = (x | x << 16) & 0x1f0000ff0000ff;
    x = (x | x << 8) & 0x100f00f00f00f00f;
    x = (x | x << 4) & 0x10c30c30c30c30c3;
    x = (x | x << 2) & X_MASK;
    x
}

#[inline]
const fn compact_by_3(value: u64) -> u64 {
    let mut x = value & X_MASK;
    x = (x ^ (x >> 2)) & 0x10c30c30c30c30c3;
    x = (x ^ (x >> 4)) & 0x100f00f00f00f00f;
    x = (x ^ (x >> 8)) & 0x1f0000ff0000ff;
    x = (x ^ (x >> 16)) & 0x1f00000000ffff;
    x = (x ^ (x >> 32)) & COORD_MASK;
    x
}
