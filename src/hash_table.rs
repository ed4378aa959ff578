use std::fmt;

use log::{debug, trace, warn};

use crate::{
    chain::Chain,
    error::{Result, TableError},
    hash_fn::{KeyHasher, SumOfCodepoints},
};

/// Number of buckets used by `HashTable::default`
pub const DEFAULT_CAPACITY: usize = 16;

/// Outcome of placing a key-value pair into a bucket array
enum InsertResult<V> {
    /// The key was new and an entry was pushed onto its chain
    Inserted,
    /// The key already existed and its value was overwritten
    Updated(Option<V>),
    /// The computed bucket does not exist
    Failed,
}

/// A string-keyed hash table using separate chaining.
///
/// Every key lives in bucket `hash(key) mod capacity`, where `hash` is the `KeyHasher` the
/// table was built with. The table never grows on its own; callers decide when to rehash
/// with [`HashTable::resize`], using [`HashTable::load_factor`] as a guide.
///
/// Note: This implementation is not thread-safe. Wrap it in a lock for shared use.
#[derive(Clone)]
pub struct HashTable<V, H = SumOfCodepoints> {
    /// One chain per bucket; never empty
    buckets: Vec<Chain<V>>,
    /// Strategy used to route every key, kept across resizes
    hasher: H,
    /// Total number of entries across all buckets
    size: usize,
}

impl<V> Default for HashTable<V, SumOfCodepoints> {
    fn default() -> Self {
        Self { buckets: empty_buckets(DEFAULT_CAPACITY), hasher: SumOfCodepoints, size: 0 }
    }
}

impl<V, H> fmt::Debug for HashTable<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashTable")
            .field("capacity", &self.buckets.len())
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

impl<V: fmt::Display, H> fmt::Display for HashTable<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, chain) in self.buckets.iter().enumerate() {
            writeln!(f, "{index}: {chain}")?;
        }
        Ok(())
    }
}

impl<K, V, H> Extend<(K, V)> for HashTable<V, H>
where
    K: Into<String>,
    H: KeyHasher,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<V, H: KeyHasher> HashTable<V, H> {
    /// Creates an empty table with `capacity` buckets that routes keys with `hasher`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::ZeroCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize, hasher: H) -> Result<Self> {
        if capacity == 0 {
            warn!("rejected hash table construction with zero buckets");
            return Err(TableError::ZeroCapacity);
        }
        debug!("creating hash table with {capacity} buckets");
        Ok(Self { buckets: empty_buckets(capacity), hasher, size: 0 })
    }

    /// Returns the bucket that `key` routes to under the current capacity
    #[must_use]
    pub fn bucket_index(&self, key: &str) -> usize {
        bucket_index(&self.hasher, key, self.buckets.len())
    }

    /// Associates `value` with `key`.
    ///
    /// If the key is already present its value is overwritten and the previous value is
    /// returned; the size does not change. Otherwise a new entry is pushed onto the front of
    /// the key's chain.
    pub fn put(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        match place(&mut self.buckets, &self.hasher, key.into(), value) {
            InsertResult::Inserted => {
                self.size = self.size.saturating_add(1);
                None
            }
            InsertResult::Updated(previous) => previous,
            InsertResult::Failed => {
                warn!("no bucket available among {} for key", self.buckets.len());
                None
            }
        }
    }

    /// Returns the value stored under `key`, or `None` if the key is absent
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.chain_for(key)?.get_value(key)
    }

    /// Returns a mutable reference to the value stored under `key`
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.bucket_index(key);
        self.buckets.get_mut(index)?.get_mut(key)
    }

    /// Removes `key` and returns its value. Removing an absent key is a no-op.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let index = self.bucket_index(key);
        let removed = self.buckets.get_mut(index)?.remove(key);
        if removed.is_some() {
            self.size = self.size.saturating_sub(1);
        }
        removed
    }

    /// Returns true if `key` is stored in the table
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.chain_for(key).is_some_and(|chain| chain.contains(key))
    }

    /// Rebuilds the table with `new_capacity` buckets, rehashing every entry.
    ///
    /// The new bucket array is fully populated through the same path as [`HashTable::put`]
    /// before it replaces the current one, so the table is never observed half-migrated.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::ZeroCapacity`] if `new_capacity` is zero; the table is left as
    /// it was.
    pub fn resize(&mut self, new_capacity: usize) -> Result<()>
    where
        V: Clone,
    {
        if new_capacity == 0 {
            warn!("rejected resize of {}-bucket table to zero buckets", self.buckets.len());
            return Err(TableError::ZeroCapacity);
        }

        let mut buckets = empty_buckets(new_capacity);
        let mut size: usize = 0;
        for (key, value) in self.iter() {
            if let InsertResult::Inserted =
                place(&mut buckets, &self.hasher, key.to_owned(), value.clone())
            {
                size = size.saturating_add(1);
            }
        }

        debug!(
            "resized hash table from {} to {new_capacity} buckets, rehashed {size} entries",
            self.buckets.len()
        );
        self.buckets = buckets;
        self.size = size;
        Ok(())
    }
}

impl<V, H> HashTable<V, H> {
    /// Returns the number of entries in the table
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the table holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of buckets
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the hash strategy the table was built with
    #[must_use]
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Returns the chains in bucket order
    #[must_use]
    pub fn buckets(&self) -> &[Chain<V>] {
        &self.buckets
    }

    /// Drops every entry, keeping the current number of buckets
    pub fn clear(&mut self) {
        debug!("clearing {} entries from {}-bucket table", self.size, self.buckets.len());
        self.buckets = empty_buckets(self.buckets.len());
        self.size = 0;
    }

    /// Returns the number of buckets whose chain is empty
    #[must_use]
    pub fn empty_bucket_count(&self) -> usize {
        self.buckets.iter().filter(|chain| chain.is_empty()).count()
    }

    /// Returns the ratio of entries to buckets
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.size as f64 / self.buckets.len() as f64
    }

    /// Returns the length of each bucket's chain, in bucket order
    #[must_use]
    pub fn bucket_lengths(&self) -> Vec<usize> {
        self.buckets.iter().map(Chain::len).collect()
    }

    /// Returns the length of the longest chain
    #[must_use]
    pub fn longest_chain(&self) -> usize {
        self.buckets.iter().map(Chain::len).max().unwrap_or(0)
    }

    /// Iterates over every key-value pair, bucket by bucket and head to tail within a bucket
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.buckets.iter().flat_map(Chain::iter)
    }

    /// Returns the chain `key` routes to
    fn chain_for(&self, key: &str) -> Option<&Chain<V>>
    where
        H: KeyHasher,
    {
        self.buckets.get(bucket_index(&self.hasher, key, self.buckets.len()))
    }
}

/// Builds `capacity` empty chains
fn empty_buckets<V>(capacity: usize) -> Vec<Chain<V>> {
    (0..capacity).map(|_| Chain::new()).collect()
}

/// Maps `key` onto one of `capacity` buckets
#[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
fn bucket_index<H: KeyHasher>(hasher: &H, key: &str, capacity: usize) -> usize {
    let hash = hasher.hash_key(key);
    let index = hash.checked_rem(capacity as u64).unwrap_or(0);
    trace!("key {key:?} hashed to {hash}, bucket {index} of {capacity}");
    // the remainder is below `capacity`, so narrowing back to usize is lossless
    index as usize
}

/// Puts a key-value pair into `buckets`, overwriting the value if the key is already there
fn place<V, H: KeyHasher>(
    buckets: &mut [Chain<V>],
    hasher: &H,
    key: String,
    value: V,
) -> InsertResult<V> {
    let index = bucket_index(hasher, &key, buckets.len());
    let Some(chain) = buckets.get_mut(index) else {
        return InsertResult::Failed;
    };

    if chain.contains(&key) {
        InsertResult::Updated(chain.update_value(&key, value))
    } else {
        chain.insert_front(key, value);
        InsertResult::Inserted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash_fn::{PositionWeighted, sum_of_codepoints};
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    fn init_test_logger() {
        let _ = env_logger::builder().filter_level(log::LevelFilter::Trace).is_test(true).try_init();
    }

    fn table_with(capacity: usize, pairs: &[(&str, i32)]) -> HashTable<i32> {
        let mut table = HashTable::new(capacity, SumOfCodepoints).unwrap();
        for &(key, value) in pairs {
            table.put(key, value);
        }
        table
    }

    fn reachable_entries<V, H>(table: &HashTable<V, H>) -> usize {
        table.buckets().iter().map(|chain| chain.iter().count()).sum()
    }

    fn snapshot<H>(table: &HashTable<i32, H>) -> BTreeMap<String, i32> {
        table.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_put_and_get() {
        init_test_logger();
        let table = table_with(5, &[("a", 1), ("b", 2), ("c", 3)]);

        assert_eq!(table.len(), 3);
        assert_eq!(table.get("b"), Some(&2));
        assert!(!table.contains_key("z"));
        assert_eq!(table.get("z"), None);
    }

    #[test]
    fn test_put_overwrites() {
        let mut table = table_with(5, &[("a", 1)]);

        assert_eq!(table.put("a", 10), Some(1));
        assert_eq!(table.get("a"), Some(&10));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_repeated_put_is_idempotent() {
        let mut table = table_with(3, &[("key", 7)]);
        table.put("key", 7);

        assert_eq!(table.len(), 1);
        assert_eq!(table.get("key"), Some(&7));
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        init_test_logger();
        let table = HashTable::<i32, _>::new(0, SumOfCodepoints);
        assert_eq!(table.unwrap_err(), TableError::ZeroCapacity);

        let mut table = table_with(4, &[("a", 1)]);
        assert_eq!(table.resize(0), Err(TableError::ZeroCapacity));
        assert_eq!(table.capacity(), 4);
        assert_eq!(table.get("a"), Some(&1));
    }

    #[test]
    fn test_bucket_index() {
        let table = table_with(5, &[]);
        // 'a' + 'b' = 195
        assert_eq!(table.bucket_index("ab"), 0);
        assert_eq!(table.bucket_index("a"), 2);

        let weighted: HashTable<i32, _> = HashTable::new(5, PositionWeighted).unwrap();
        // 'a' + 2 * 'b' = 293
        assert_eq!(weighted.bucket_index("ab"), 3);
    }

    #[test]
    fn test_entries_live_in_their_bucket() {
        let table = table_with(7, &[("apple", 1), ("banana", 2), ("cherry", 3), ("date", 4)]);

        for (index, chain) in table.buckets().iter().enumerate() {
            for (key, _) in chain.iter() {
                assert_eq!(table.bucket_index(key), index);
            }
        }
    }

    #[test]
    fn test_remove() {
        let mut table = table_with(5, &[("a", 1), ("b", 2)]);

        assert_eq!(table.remove("a"), Some(1));
        assert_eq!(table.len(), 1);
        assert!(!table.contains_key("a"));
        assert_eq!(table.get("b"), Some(&2));
    }

    #[test]
    fn test_remove_missing_key() {
        let mut table = table_with(5, &[("a", 1), ("b", 2)]);

        assert_eq!(table.remove("z"), None);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_get_mut() {
        let mut table = table_with(5, &[("a", 1)]);
        if let Some(value) = table.get_mut("a") {
            *value += 10;
        }
        assert_eq!(table.get("a"), Some(&11));
        assert!(table.get_mut("z").is_none());
    }

    #[test]
    fn test_clear() {
        let mut table = table_with(6, &[("a", 1), ("b", 2), ("c", 3)]);
        table.clear();

        assert!(table.is_empty());
        assert_eq!(table.capacity(), 6);
        assert_eq!(table.empty_bucket_count(), 6);
        assert_eq!(table.get("a"), None);
    }

    #[test]
    fn test_empty_bucket_count() {
        // 97, 98, 99, 100 land in buckets 1, 2, 3, 0
        let table = table_with(4, &[("a", 1), ("b", 2), ("c", 3), ("d", 4)]);
        assert_eq!(table.empty_bucket_count(), 0);

        let sparse = table_with(10, &[("a", 1), ("k", 2)]);
        // 'a' = 97 and 'k' = 107 share bucket 7
        assert_eq!(sparse.empty_bucket_count(), 9);
        assert_eq!(sparse.longest_chain(), 2);
    }

    #[test]
    fn test_load_factor() {
        let mut table = table_with(4, &[]);
        assert!(table.load_factor().abs() < f64::EPSILON);

        table.extend([("a", 1), ("b", 2), ("c", 3)]);
        assert!((table.load_factor() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resize_to_single_bucket() {
        init_test_logger();
        let pairs = [("one", 1), ("two", 2), ("three", 3), ("four", 4), ("five", 5)];
        let mut table = table_with(8, &pairs);

        table.resize(1).unwrap();

        assert_eq!(table.capacity(), 1);
        assert_eq!(table.len(), 5);
        assert_eq!(table.bucket_lengths(), vec![5]);
        for (key, value) in pairs {
            assert_eq!(table.get(key), Some(&value));
        }
    }

    #[test]
    fn test_resize_rehashes() {
        let mut table = table_with(2, &[("a", 1), ("b", 2), ("c", 3), ("d", 4)]);
        let before = snapshot(&table);

        table.resize(7).unwrap();

        assert_eq!(table.capacity(), 7);
        assert_eq!(snapshot(&table), before);
        for (index, chain) in table.buckets().iter().enumerate() {
            for (key, _) in chain.iter() {
                assert_eq!(index, usize::try_from(sum_of_codepoints(key) % 7).unwrap());
            }
        }
    }

    #[test]
    fn test_resize_keeps_hasher() {
        let calls = std::cell::Cell::new(0_u32);
        let counting = |key: &str| -> u64 {
            calls.set(calls.get() + 1);
            sum_of_codepoints(key)
        };
        let mut table = HashTable::new(3, &counting).unwrap();
        table.put("a", 1);
        table.put("b", 2);
        let before = calls.get();

        table.resize(5).unwrap();

        // one routing per rehashed entry, all through the same closure
        assert_eq!(calls.get(), before + 2);
        assert_eq!(table.get("a"), Some(&1));
    }

    #[test]
    fn test_display() {
        let table = table_with(3, &[("a", 1), ("d", 4), ("b", 2)]);
        // 'a' = 97 and 'd' = 100 share bucket 1, 'b' = 98 goes to bucket 2
        assert_eq!(table.to_string(), "0: []\n1: [(d, 4) -> (a, 1)]\n2: [(b, 2)]\n");
    }

    #[test]
    fn test_default() {
        let mut table: HashTable<char> = HashTable::default();
        assert_eq!(table.capacity(), DEFAULT_CAPACITY);
        table.put("x", 'x');
        assert_eq!(table.get("x"), Some(&'x'));
    }

    #[test]
    fn test_debug() {
        let table = table_with(2, &[("a", 1)]);
        assert_eq!(format!("{table:?}"), "HashTable { capacity: 2, size: 1, .. }");
    }

    /// A single table operation used to drive the property tests
    #[derive(Debug, Clone)]
    enum Op {
        Put(String, i32),
        Remove(String),
        Resize(usize),
        Clear,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            6 => ("[a-f]{1,3}", any::<i32>()).prop_map(|(k, v)| Op::Put(k, v)),
            3 => "[a-f]{1,3}".prop_map(Op::Remove),
            1 => (1_usize..32).prop_map(Op::Resize),
            1 => Just(Op::Clear),
        ]
    }

    proptest! {
        #[test]
        fn prop_matches_reference_model(
            capacity in 1_usize..16,
            weighted in any::<bool>(),
            ops in prop::collection::vec(op_strategy(), 0..64),
        ) {
            let hasher: fn(&str) -> u64 = if weighted {
                crate::hash_fn::position_weighted
            } else {
                sum_of_codepoints
            };
            let mut table = HashTable::new(capacity, hasher).unwrap();
            let mut model = BTreeMap::new();

            for op in ops {
                match op {
                    Op::Put(key, value) => {
                        prop_assert_eq!(table.put(key.clone(), value), model.insert(key, value));
                    }
                    Op::Remove(key) => {
                        prop_assert_eq!(table.remove(&key), model.remove(&key));
                    }
                    Op::Resize(new_capacity) => {
                        table.resize(new_capacity).unwrap();
                        prop_assert_eq!(table.capacity(), new_capacity);
                    }
                    Op::Clear => {
                        table.clear();
                        model.clear();
                    }
                }

                prop_assert_eq!(table.len(), reachable_entries(&table));
                prop_assert_eq!(table.len(), model.len());
                #[allow(clippy::cast_precision_loss)]
                let expected = table.len() as f64 / table.capacity() as f64;
                prop_assert!((table.load_factor() - expected).abs() < f64::EPSILON);
            }

            prop_assert_eq!(snapshot(&table), model.clone());
            for (key, value) in &model {
                prop_assert_eq!(table.get(key), Some(value));
            }
        }

        #[test]
        fn prop_resize_preserves_content(
            pairs in prop::collection::btree_map("[a-z]{1,8}", any::<i32>(), 0..40),
            capacity in 1_usize..20,
            new_capacity in 1_usize..20,
        ) {
            let mut table = HashTable::new(capacity, PositionWeighted).unwrap();
            table.extend(pairs.clone());

            table.resize(new_capacity).unwrap();

            prop_assert_eq!(table.len(), pairs.len());
            prop_assert_eq!(snapshot(&table), pairs);
        }
    }
}
