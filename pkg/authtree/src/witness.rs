use commitment::{compute_merkle_root, Element};

use crate::Error;

/// A claim that some leaf sits at some position under a root
///
/// A witness is a *claim*, not a fact: it carries a position and the sibling hashes along the
/// path from that position to the root. It is checked by recomputing a root for a hypothetical
/// leaf and comparing it against a committed root, and the same witness predicts the root after
/// the leaf is overwritten.
pub trait MembershipWitness {
    /// The position this witness claims to be about
    type Key;

    /// Recompute the root implied by this witness if its slot held `leaf`, along with the
    /// position it is about
    fn recompute(&self, leaf: Element) -> (Element, Self::Key);
}

/// A witness into a [`SparseMap`](crate::SparseMap) of depth `DEPTH`
///
/// The position of the leaf is given by the `DEPTH - 1` least significant bits of `key`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapWitness<const DEPTH: usize> {
    key: Element,
    /// Deepest first
    siblings: Vec<Element>,
}

impl<const DEPTH: usize> MapWitness<DEPTH> {
    /// Build a witness from a key and `DEPTH - 1` siblings, deepest first
    pub fn new(key: Element, siblings: Vec<Element>) -> Result<Self, Error> {
        check_sibling_count::<DEPTH>(&siblings)?;
        Ok(Self { key, siblings })
    }

    /// The key this witness is about
    #[must_use]
    pub fn key(&self) -> Element {
        self.key
    }

    /// The sibling hashes, deepest first
    #[must_use]
    pub fn siblings(&self) -> &[Element] {
        &self.siblings
    }
}

impl<const DEPTH: usize> MembershipWitness for MapWitness<DEPTH> {
    type Key = Element;

    fn recompute(&self, leaf: Element) -> (Element, Element) {
        let root = fold::<DEPTH>(leaf, &self.siblings, self.key);
        (root, self.key)
    }
}

/// A witness into an [`AppendLog`](crate::AppendLog) of depth `DEPTH`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogWitness<const DEPTH: usize> {
    index: u64,
    /// Deepest first
    siblings: Vec<Element>,
}

impl<const DEPTH: usize> LogWitness<DEPTH> {
    /// Build a witness from an index and `DEPTH - 1` siblings, deepest first
    pub fn new(index: u64, siblings: Vec<Element>) -> Result<Self, Error> {
        check_sibling_count::<DEPTH>(&siblings)?;
        Ok(Self { index, siblings })
    }

    /// The index this witness is about
    #[must_use]
    pub fn index(&self) -> u64 {
        self.index
    }

    /// The sibling hashes, deepest first
    #[must_use]
    pub fn siblings(&self) -> &[Element] {
        &self.siblings
    }
}

impl<const DEPTH: usize> MembershipWitness for LogWitness<DEPTH> {
    type Key = u64;

    fn recompute(&self, leaf: Element) -> (Element, u64) {
        let root = fold::<DEPTH>(leaf, &self.siblings, Element::from(self.index));
        (root, self.index)
    }
}

fn check_sibling_count<const DEPTH: usize>(siblings: &[Element]) -> Result<(), Error> {
    match siblings.len() == DEPTH - 1 {
        true => Ok(()),
        false => Err(Error::WrongSiblingCount {
            expected: DEPTH - 1,
            actual: siblings.len(),
        }),
    }
}

/// Fold `leaf` up to the root, reading the direction at each level from the bits of `position`
///
/// A deserialized witness may carry the wrong number of siblings. Zipping truncates it, which
/// yields a root that will not match any honest commitment.
fn fold<const DEPTH: usize>(leaf: Element, siblings: &[Element], position: Element) -> Element {
    // lsb is most significant first, siblings are deepest first
    let directions = position.lsb(DEPTH - 1).into_iter().rev();
    let path = siblings.iter().copied().zip(directions);

    compute_merkle_root(leaf, path)
}
