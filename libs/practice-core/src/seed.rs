//! Deterministic seed hashing.
//!
//! Lesson ids are hashed with 32-bit FNV-1a so that every lesson gets its own
//! reproducible PRNG stream.

const FNV_OFFSET_BASIS: u32 = 0x811C_9DC5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Substitute for a zero hash; xorshift never leaves the zero state.
pub const ZERO_SEED_REPLACEMENT: u32 = 0x9E37_79B9;

/// Hash a string into a non-zero 32-bit seed.
pub fn hash_seed(input: &str) -> u32 {
    let hash = input.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
    });

    if hash == 0 {
        ZERO_SEED_REPLACEMENT
    } else {
        hash
    }
}
