use std::fmt::Debug;

/// An ordered set of keys still waiting for completion.
///
/// Each key is inserted once and removed once. This is the countdown used to
/// fire a single aggregate callback after several independent animations.
///
/// # Example
/// ```
/// # use diamond_sphere::animation::PendingSet;
/// let mut pending = PendingSet::new();
/// assert!(pending.insert("alpha"));
/// assert!(pending.insert("radius"));
/// assert!(!pending.insert("alpha"));
///
/// assert!(pending.remove("alpha"));
/// assert!(!pending.is_empty());
/// assert!(pending.remove("radius"));
/// assert!(pending.is_empty());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingSet<K> {
    keys: Vec<K>,
}

impl<K> Default for PendingSet<K> {
    fn default() -> Self {
        PendingSet { keys: Vec::new() }
    }
}

impl<K: Copy + PartialEq + Debug> PendingSet<K> {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a key at the end of the set.
    ///
    /// Returns `false` (and leaves the set unchanged) if the key is already pending.
    pub fn insert(&mut self, key: K) -> bool {
        if self.contains(key) {
            false
        } else {
            self.keys.push(key);
            true
        }
    }

    /// Removes a key.
    ///
    /// Returns `false` if the key was not pending.
    pub fn remove(&mut self, key: K) -> bool {
        match self.keys.iter().position(|k| *k == key) {
            Some(i) => {
                let _ = self.keys.remove(i);
                true
            }
            None => false,
        }
    }

    /// Whether `key` is pending.
    #[inline]
    pub fn contains(&self, key: K) -> bool {
        self.keys.contains(&key)
    }

    /// Number of pending keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether no key is pending.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The pending keys, in insertion order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.keys.iter()
    }
}
