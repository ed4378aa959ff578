//! Utility functions and traits for `HashTable`

use crate::{HashTable, KeyHasher, error::Result};

/// Extension trait for tables that provides owned snapshots of their contents
pub trait HashTableExtensions<V> {
    /// Returns the keys of the table as a Vec, in enumeration order
    fn keys(&self) -> Vec<String>;

    /// Returns the values of the table as a Vec, in enumeration order
    fn values(&self) -> Vec<V>;

    /// Returns the chain length of every non-empty bucket as `(bucket, length)` pairs
    fn occupied_buckets(&self) -> Vec<(usize, usize)>;
}

impl<V, H> HashTableExtensions<V> for HashTable<V, H>
where
    V: Clone,
{
    fn keys(&self) -> Vec<String> {
        self.iter().map(|(k, _)| k.to_owned()).collect()
    }

    fn values(&self) -> Vec<V> {
        self.iter().map(|(_, v)| v.clone()).collect()
    }

    fn occupied_buckets(&self) -> Vec<(usize, usize)> {
        self.bucket_lengths().into_iter().enumerate().filter(|&(_, len)| len > 0).collect()
    }
}

/// Creates a `HashTable` with `capacity` buckets from an iterator of key-value pairs.
///
/// Later pairs overwrite earlier pairs with the same key.
///
/// # Errors
///
/// Returns [`crate::TableError::ZeroCapacity`] if `capacity` is zero.
pub fn from_pairs<K, V, H, I>(capacity: usize, hasher: H, iter: I) -> Result<HashTable<V, H>>
where
    K: Into<String>,
    H: KeyHasher,
    I: IntoIterator<Item = (K, V)>,
{
    let mut table = HashTable::new(capacity, hasher)?;
    table.extend(iter);
    Ok(table)
}
