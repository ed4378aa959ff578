//! Singly-linked chain of key-value entries stored in one bucket

use std::{fmt, iter};

/// A key-value pair owned by a `Chain`.
///
/// Each entry exclusively owns the entry after it, so a chain can never form a cycle.
pub struct Entry<V> {
    /// The key of the pair
    key: String,
    /// The value associated with the key
    value: V,
    /// The rest of the chain
    next: Option<Box<Entry<V>>>,
}

impl<V> Entry<V> {
    /// Returns the key of the entry
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the value stored in the entry
    #[must_use]
    pub fn value(&self) -> &V {
        &self.value
    }
}

impl<V: fmt::Debug> fmt::Debug for Entry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

impl<V: fmt::Display> fmt::Display for Entry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.key, self.value)
    }
}

/// An ordered sequence of entries sharing a bucket.
///
/// New entries go to the head, so iteration is LIFO with respect to insertion. The chain
/// itself never de-duplicates keys; the owning table checks for an existing key before
/// calling [`Chain::insert_front`].
pub struct Chain<V> {
    /// First entry, if any
    head: Option<Box<Entry<V>>>,
    /// Number of entries reachable from `head`
    len: usize,
}

impl<V> Default for Chain<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Chain<V> {
    /// Creates an empty chain
    #[must_use]
    pub fn new() -> Self {
        Self { head: None, len: 0 }
    }

    /// Returns the number of entries in the chain
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the chain holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Pushes a new entry at the head, even if `key` is already present further down.
    pub fn insert_front(&mut self, key: String, value: V) {
        let next = self.head.take();
        self.head = Some(Box::new(Entry { key, value, next }));
        self.len = self.len.saturating_add(1);
    }

    /// Unlinks the first entry with `key` and returns its value.
    ///
    /// Returns `None` and leaves the chain untouched when the key is absent.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let mut cursor = &mut self.head;
        while cursor.as_ref().is_some_and(|entry| entry.key != key) {
            cursor = &mut cursor.as_mut()?.next;
        }

        let mut removed = cursor.take()?;
        *cursor = removed.next.take();
        self.len = self.len.saturating_sub(1);
        Some(removed.value)
    }

    /// Returns the first entry with `key`
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&Entry<V>> {
        self.entries().find(|entry| entry.key == key)
    }

    /// Returns true if an entry with `key` is present
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Overwrites the value stored under `key`, returning the previous one.
    ///
    /// When the key is absent this is a silent no-op and `value` is dropped.
    pub fn update_value(&mut self, key: &str, value: V) -> Option<V> {
        self.get_mut(key).map(|slot| std::mem::replace(slot, value))
    }

    /// Returns the value stored under `key`
    #[must_use]
    pub fn get_value(&self, key: &str) -> Option<&V> {
        self.find(key).map(Entry::value)
    }

    /// Returns a mutable reference to the value stored under `key`
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let mut cursor = self.head.as_deref_mut();
        while let Some(entry) = cursor {
            if entry.key == key {
                return Some(&mut entry.value);
            }
            cursor = entry.next.as_deref_mut();
        }
        None
    }

    /// Iterates over the key-value pairs from head to tail
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries().map(|entry| (entry.key.as_str(), &entry.value))
    }

    /// Walks the entries from head to tail
    fn entries(&self) -> impl Iterator<Item = &Entry<V>> {
        iter::successors(self.head.as_deref(), |entry| entry.next.as_deref())
    }
}

impl<V> Drop for Chain<V> {
    // unlink one entry at a time so long chains do not recurse on drop
    fn drop(&mut self) {
        let mut next = self.head.take();
        while let Some(mut entry) = next {
            next = entry.next.take();
        }
    }
}

impl<V: Clone> Clone for Chain<V> {
    fn clone(&self) -> Self {
        let pairs: Vec<_> = self.iter().collect();
        let mut chain = Self::new();
        for (key, value) in pairs.into_iter().rev() {
            chain.insert_front(key.to_owned(), value.clone());
        }
        chain
    }
}

impl<V: fmt::Debug> fmt::Debug for Chain<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries()).finish()
    }
}

impl<V: fmt::Display> fmt::Display for Chain<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (position, entry) in self.entries().enumerate() {
            if position > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{entry}")?;
        }
        f.write_str("]")
    }
}
