// src/hash.rs
//! FNV-1a 64-bit hashing.
//!
//! The hash function is the compatibility surface of the whole crate: hash
//! values are handed out as identifiers and may be persisted by the host, so
//! the algorithm is fixed for the lifetime of the registry. FNV-1a with the
//! standard 64-bit parameters is deterministic across runs and platforms.

const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

/// Hash a byte sequence with FNV-1a 64.
///
/// Total: defined for every input, including the empty sequence (which
/// hashes to the offset basis).
#[inline]
pub const fn fnv1a(bytes: &[u8]) -> u64 {
    let mut acc = FNV_OFFSET_BASIS;
    let mut i = 0;
    while i < bytes.len() {
        acc = (acc ^ bytes[i] as u64).wrapping_mul(FNV_PRIME);
        i += 1;
    }
    acc
}
