//! Pearson-style byte mixer used to route uids to buckets.
//!
//! The permutation of the 256 byte values is shuffled once per process from
//! `PERMUTATION_SEED` with ChaCha8, so bucket placement is identical across
//! runs and platforms. Unlike the textbook Pearson hash, the looked-up
//! values are summed into a `usize` accumulator instead of replacing it, so
//! the result is not confined to a single byte. The table index is the low
//! byte of `accumulator ^ byte`.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::OnceLock;

/// Seed of the process-wide permutation table.
pub const PERMUTATION_SEED: u64 = 0x5045_4152_534f_4e00;

static PERMUTATION: OnceLock<[u8; 256]> = OnceLock::new();

pub(crate) fn permutation() -> &'static [u8; 256] {
    PERMUTATION.get_or_init(|| {
        let mut table = [0u8; 256];
        for (i, slot) in table.iter_mut().enumerate() {
            *slot = i as u8;
        }
        let mut rng = ChaCha8Rng::seed_from_u64(PERMUTATION_SEED);
        table.shuffle(&mut rng);
        log::debug!(
            "pearson permutation initialised from seed {:#x}",
            PERMUTATION_SEED
        );
        table
    })
}

/// Summing Pearson hash of `bytes`. The empty input hashes to 0.
pub fn pearson_hash(bytes: &[u8]) -> usize {
    let table = permutation();
    bytes.iter().fold(0usize, |h, &b| {
        h.wrapping_add(table[(h ^ b as usize) & 0xFF] as usize)
    })
}

/// Maps a uid to an unreduced hash value; the table applies the modulo.
///
/// Implementations must be pure: the same key always yields the same value,
/// otherwise records become unreachable after insertion.
pub trait KeyHash {
    fn hash_key(&self, key: &str) -> usize;
}

/// Default `KeyHash`: the summing Pearson hash over the key's UTF-8 bytes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Pearson;

impl KeyHash for Pearson {
    #[inline]
    fn hash_key(&self, key: &str) -> usize {
        pearson_hash(key.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: the table is a permutation of 0..=255.
    #[test]
    fn table_is_a_permutation() {
        let mut seen = permutation().to_vec();
        seen.sort_unstable();
        let expected: Vec<u8> = (0..=255u8).collect();
        assert_eq!(seen, expected);
    }

    /// Invariant: the shuffle is seeded, so rebuilding from the same seed
    /// reproduces the shared table.
    #[test]
    fn table_is_reproducible_from_seed() {
        let mut table: Vec<u8> = (0..=255u8).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(PERMUTATION_SEED);
        table.shuffle(&mut rng);
        assert_eq!(&table[..], &permutation()[..]);
    }

    #[test]
    fn empty_input_hashes_to_zero() {
        assert_eq!(pearson_hash(b""), 0);
        assert_eq!(Pearson.hash_key(""), 0);
    }

    /// Invariant: each step adds `table[(h ^ b) & 0xFF]` to the accumulator.
    #[test]
    fn accumulates_by_summation() {
        let t = permutation();
        let (b0, b1) = (b'I', b'D');
        let h0 = t[b0 as usize] as usize;
        let h1 = h0 + t[(h0 ^ b1 as usize) & 0xFF] as usize;
        assert_eq!(pearson_hash(&[b0]), h0);
        assert_eq!(pearson_hash(&[b0, b1]), h1);
    }

    /// Invariant: the summed value is not truncated to one byte.
    #[test]
    fn result_can_exceed_one_byte() {
        let t = permutation();
        // First byte lands on 255; the second byte steers back to the same slot.
        let b0 = t.iter().position(|&v| v == 255).unwrap() as u8;
        let b1 = 255u8 ^ b0;
        assert_eq!(pearson_hash(&[b0, b1]), 510);
    }

    #[test]
    fn deterministic_for_same_key() {
        for key in ["ID-0", "ID-7", "Jane Doe", "ünïcödé"] {
            assert_eq!(Pearson.hash_key(key), Pearson.hash_key(key));
            assert_eq!(Pearson.hash_key(key), pearson_hash(key.as_bytes()));
        }
    }
}
