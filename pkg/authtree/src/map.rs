use std::collections::BTreeMap;

use commitment::Element;

use crate::{fits_in, node::Node, Error, MapWitness};

/// A sparse key → value map committed to by a Merkle tree of depth `DEPTH`
///
/// Each key addresses the leaf given by its `DEPTH - 1` least significant bits. Keys with any
/// higher bit set are rejected, so that no two distinct keys share a leaf. Absent keys hold
/// [`Element::NULL_HASH`], and writing the null value removes an entry.
///
/// This is the *client's* copy of a tree whose root is committed elsewhere: the verifier never
/// holds one, it only checks [`MapWitness`]es produced from it.
#[derive(Debug, Clone)]
pub struct SparseMap<const DEPTH: usize> {
    tree: Node,
    entries: BTreeMap<Element, Element>,
}

impl<const DEPTH: usize> Default for SparseMap<DEPTH> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const DEPTH: usize> SparseMap<DEPTH> {
    /// Create a new map with every leaf null
    ///
    /// # Panics
    ///
    /// Panics if `DEPTH` is 0 or greater than 257
    #[must_use]
    pub fn new() -> Self {
        assert!(
            (1..=257).contains(&DEPTH),
            "a map needs between 1 and 257 levels"
        );

        Self {
            tree: Node::empty(DEPTH),
            entries: BTreeMap::new(),
        }
    }

    /// The root hash of the map
    #[must_use]
    pub fn root(&self) -> Element {
        self.tree.hash()
    }

    /// The number of non-null entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether every entry is null
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The value stored under `key`, [`Element::NULL_HASH`] if absent
    #[must_use]
    pub fn get(&self, key: Element) -> Element {
        self.entries
            .get(&key)
            .copied()
            .unwrap_or(Element::NULL_HASH)
    }

    /// Whether `key` holds a non-null value
    #[must_use]
    pub fn contains(&self, key: Element) -> bool {
        self.entries.contains_key(&key)
    }

    /// Iterate over the non-null entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (Element, Element)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, *v))
    }

    /// Write `value` under `key`, returning the previous value
    pub fn set(&mut self, key: Element, value: Element) -> Result<Element, Error> {
        self.check_key(key)?;

        let previous = self.tree.set(&key.lsb(DEPTH - 1), value);

        match value.is_zero() {
            true => self.entries.remove(&key),
            false => self.entries.insert(key, value),
        };

        Ok(previous)
    }

    /// A witness for the slot of `key`
    ///
    /// Valid against the current root, whether the key is present or not
    pub fn witness(&self, key: Element) -> Result<MapWitness<DEPTH>, Error> {
        self.check_key(key)?;

        let siblings = self.tree.siblings(&key.lsb(DEPTH - 1));
        MapWitness::new(key, siblings)
    }

    fn check_key(&self, key: Element) -> Result<(), Error> {
        match fits_in(key, DEPTH - 1) {
            true => Ok(()),
            false => Err(Error::KeyOutOfRange { key, depth: DEPTH }),
        }
    }
}
