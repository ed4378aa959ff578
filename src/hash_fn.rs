//! Hash functions that route string keys to buckets

/// Strategy that turns a string key into a non-negative hash.
///
/// A `HashTable` keeps the instance it was built with for its whole lifetime, including
/// across resizes, so the strategy must be deterministic for a given key.
///
/// Any `Fn(&str) -> u64` is a `KeyHasher`, so plain functions and closures can be injected:
///
/// ```rust
/// use chainmap::{HashTable, KeyHasher};
///
/// let by_length = |key: &str| key.len() as u64;
/// assert_eq!(by_length.hash_key("abc"), 3);
///
/// let table: HashTable<i32, _> = HashTable::new(4, by_length).unwrap();
/// assert_eq!(table.bucket_index("abcdef"), 2);
/// ```
pub trait KeyHasher {
    /// Computes the hash of `key`
    fn hash_key(&self, key: &str) -> u64;
}

impl<F> KeyHasher for F
where
    F: Fn(&str) -> u64,
{
    fn hash_key(&self, key: &str) -> u64 {
        self(key)
    }
}

/// Hashes a key as the sum of its character codes.
///
/// Anagrams always collide under this strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SumOfCodepoints;

impl KeyHasher for SumOfCodepoints {
    fn hash_key(&self, key: &str) -> u64 {
        sum_of_codepoints(key)
    }
}

/// Hashes a key as the sum of each character code weighted by its 1-based position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PositionWeighted;

impl KeyHasher for PositionWeighted {
    fn hash_key(&self, key: &str) -> u64 {
        position_weighted(key)
    }
}

/// Sum of the character codes of every character in `key`
#[must_use]
pub fn sum_of_codepoints(key: &str) -> u64 {
    key.chars().fold(0_u64, |hash, c| hash.wrapping_add(u64::from(u32::from(c))))
}

/// Sum over characters of `(1-based position) * character code`
#[must_use]
pub fn position_weighted(key: &str) -> u64 {
    key.chars()
        .zip(1_u64..)
        .fold(0_u64, |hash, (c, position)| {
            hash.wrapping_add(position.wrapping_mul(u64::from(u32::from(c))))
        })
}
