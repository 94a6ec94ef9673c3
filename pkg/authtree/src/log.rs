use commitment::Element;

use crate::{node::Node, Error, LogWitness};

/// A fixed-capacity append-only sequence committed to by a Merkle tree of depth `DEPTH`
///
/// The log has `2^(DEPTH - 1)` slots, all initially [`Element::NULL_HASH`]. Values are written
/// strictly at the next free index, so the number of appended values plus the root is enough
/// for a verifier to know where the next write must land.
#[derive(Debug, Clone)]
pub struct AppendLog<const DEPTH: usize> {
    tree: Node,
    leaves: Vec<Element>,
}

impl<const DEPTH: usize> Default for AppendLog<DEPTH> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const DEPTH: usize> AppendLog<DEPTH> {
    /// Create a new log with every slot null
    ///
    /// # Panics
    ///
    /// Panics if `DEPTH` is 0 or greater than 64
    #[must_use]
    pub fn new() -> Self {
        assert!(
            (1..=64).contains(&DEPTH),
            "a log needs between 1 and 64 levels"
        );

        Self {
            tree: Node::empty(DEPTH),
            leaves: Vec::new(),
        }
    }

    /// The number of slots, `2^(DEPTH - 1)`
    #[must_use]
    pub const fn capacity() -> u64 {
        1 << (DEPTH - 1)
    }

    /// The root hash of the log
    #[must_use]
    pub fn root(&self) -> Element {
        self.tree.hash()
    }

    /// The number of values appended so far, which is also the next free index
    #[must_use]
    pub fn len(&self) -> u64 {
        self.leaves.len() as u64
    }

    /// Whether nothing has been appended
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Whether every slot has been written
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len() >= Self::capacity()
    }

    /// The value at `index`, or `None` if nothing has been appended there
    #[must_use]
    pub fn get(&self, index: u64) -> Option<Element> {
        let index = usize::try_from(index).ok()?;
        self.leaves.get(index).copied()
    }

    /// The appended values in order
    #[must_use]
    pub fn values(&self) -> &[Element] {
        &self.leaves
    }

    /// Write `value` at the next free index, returning that index
    pub fn append(&mut self, value: Element) -> Result<u64, Error> {
        let index = self.len();

        if self.is_full() {
            return Err(Error::LogFull {
                capacity: Self::capacity(),
            });
        }

        self.tree.set(&Element::from(index).lsb(DEPTH - 1), value);
        self.leaves.push(value);

        Ok(index)
    }

    /// A witness for the slot at `index`, valid against the current root
    pub fn witness(&self, index: u64) -> Result<LogWitness<DEPTH>, Error> {
        if index >= Self::capacity() {
            return Err(Error::IndexOutOfRange {
                index,
                capacity: Self::capacity(),
            });
        }

        let siblings = self.tree.siblings(&Element::from(index).lsb(DEPTH - 1));
        LogWitness::new(index, siblings)
    }

    /// A witness for the next free slot
    pub fn next_witness(&self) -> Result<LogWitness<DEPTH>, Error> {
        match self.is_full() {
            true => Err(Error::LogFull {
                capacity: Self::capacity(),
            }),
            false => self.witness(self.len()),
        }
    }
}
