//! # Chain Map
//!
//! A string-keyed hash table that resolves collisions by separate chaining.
//!
//! Every bucket holds a singly-linked [`Chain`] of entries. A key is routed to bucket
//! `hash(key) mod capacity`, where `hash` is a pluggable [`KeyHasher`]. Two reference
//! strategies are provided:
//!
//! - [`SumOfCodepoints`]: the sum of the key's character codes
//! - [`PositionWeighted`]: the sum of each character code times its 1-based position
//!
//! The table never resizes itself. [`HashTable::load_factor`] and
//! [`HashTable::empty_bucket_count`] report collision pressure, and [`HashTable::resize`]
//! rebuilds the table with a new bucket count using the same hash strategy.
//!
//! ## Basic Usage
//!
//! ```rust
//! use chainmap::{HashTable, SumOfCodepoints};
//!
//! // Create a table with 5 buckets
//! let mut table = HashTable::new(5, SumOfCodepoints).unwrap();
//!
//! // Insert values
//! table.put("a", 1);
//! table.put("b", 2);
//! table.put("c", 3);
//!
//! // Retrieve values
//! assert_eq!(table.len(), 3);
//! assert_eq!(table.get("b"), Some(&2));
//! assert!(!table.contains_key("z"));
//!
//! // Update values
//! table.put("a", 10);
//! assert_eq!(table.get("a"), Some(&10));
//!
//! // Remove values; removing an absent key is a no-op
//! table.remove("a");
//! table.remove("a");
//! assert_eq!(table.len(), 2);
//! ```
//!
//! ## Rehashing
//!
//! ```rust
//! use chainmap::{HashTable, PositionWeighted};
//!
//! let mut table = HashTable::new(8, PositionWeighted).unwrap();
//! for (i, key) in ["one", "two", "three", "four", "five"].into_iter().enumerate() {
//!     table.put(key, i);
//! }
//!
//! // Squeeze everything into a single chain
//! table.resize(1).unwrap();
//! assert_eq!(table.capacity(), 1);
//! assert_eq!(table.longest_chain(), 5);
//! assert_eq!(table.get("three"), Some(&2));
//!
//! // Zero buckets is rejected and leaves the table untouched
//! assert!(table.resize(0).is_err());
//! assert_eq!(table.capacity(), 1);
//! ```

/// Module implementing the singly-linked chain stored in each bucket
mod chain;
/// Module defining the errors reported by table operations
mod error;
/// Module implementing the pluggable key hash strategies
mod hash_fn;
/// Module implementing the separately chained hash table
mod hash_table;
/// Utility functions and traits for the hash table
mod utils;

pub use chain::{Chain, Entry};
pub use error::{Result, TableError};
pub use hash_fn::{KeyHasher, PositionWeighted, SumOfCodepoints, position_weighted, sum_of_codepoints};
pub use hash_table::{DEFAULT_CAPACITY, HashTable};
pub use utils::{HashTableExtensions, from_pairs};
