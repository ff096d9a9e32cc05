//! Content-stable hashing for automaton identity.
//!
//! DFA states are identified by the set of NFA states they contain, so the
//! hash of an id sequence has to be reproducible: same ids, same hash, on
//! every platform and every build. This module pins the exact scheme:
//! 32-bit FNV, multiply-then-xor, with `u32` values folded in little-endian
//! byte order.

/// FNV 32-bit offset basis.
pub const FNV_OFFSET: u32 = 0x811c_9dc5;

/// FNV 32-bit prime.
pub const FNV_PRIME: u32 = 0x0100_0193;

/// Hash a byte slice: multiply by the prime, then xor the byte.
#[inline]
pub fn fnv32(bytes: &[u8]) -> u32 {
    let mut h = FNV_OFFSET;
    for &b in bytes {
        h = h.wrapping_mul(FNV_PRIME);
        h ^= b as u32;
    }
    h
}

/// Hash a sequence of 32-bit values, one multiply-xor step per element.
///
/// There is no length prefix: equal sequences hash equal, and callers that
/// need set identity must sort before hashing.
#[inline]
pub fn fnv32_seq(values: &[u32]) -> u32 {
    let mut h = FNV_OFFSET;
    for &v in values {
        h = h.wrapping_mul(FNV_PRIME);
        h ^= v;
    }
    h
}

/// Keys that hash to a stable 32-bit value for open-addressed probing.
pub trait FnvHash {
    fn fnv_hash(&self) -> u32;
}

impl FnvHash for u8 {
    #[inline]
    fn fnv_hash(&self) -> u32 {
        fnv32(std::slice::from_ref(self))
    }
}

impl FnvHash for u32 {
    #[inline]
    fn fnv_hash(&self) -> u32 {
        fnv32(&self.to_le_bytes())
    }
}

impl FnvHash for [u32] {
    #[inline]
    fn fnv_hash(&self) -> u32 {
        fnv32_seq(self)
    }
}
