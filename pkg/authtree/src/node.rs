use bitvec::{prelude::Msb0, slice::BitSlice};
use commitment::{empty_tree_hash, hash_merge, Element};

/// A tree-like representation of a sparse positional tree
///
/// Positions are addressed by a path of bits, most significant (closest to the root) first.
/// A tree of depth `N` is addressed with `N - 1` bits.
#[derive(Debug, Clone)]
pub(crate) enum Node {
    /// A non-null value at the bottom of the tree
    Leaf(Element),

    /// A subtree of depth `depth` where every leaf is null
    ///
    /// Hashes of these are well-known and looked up via [`empty_tree_hash`]
    Empty { depth: usize },

    /// A parent of two nodes with its hash cached
    Parent {
        left: Box<Self>,
        right: Box<Self>,
        hash: Element,
    },
}

impl Node {
    pub fn empty(depth: usize) -> Self {
        Self::Empty { depth }
    }

    pub fn hash(&self) -> Element {
        match self {
            Self::Leaf(hash) | Self::Parent { hash, .. } => *hash,
            Self::Empty { depth } => empty_tree_hash(*depth),
        }
    }

    /// Write `value` at `bits` and recompute the hashes along the way, returning the previous
    /// value
    ///
    /// Writing [`Element::NULL_HASH`] clears the slot, and subtrees that become entirely null
    /// collapse back into [`Node::Empty`]
    pub fn set(&mut self, bits: &BitSlice<u8, Msb0>, value: Element) -> Element {
        match self {
            Self::Leaf(previous) => {
                let previous = *previous;

                *self = match value.is_zero() {
                    true => Self::Empty { depth: 1 },
                    false => Self::Leaf(value),
                };

                previous
            }
            Self::Empty { .. } if value.is_zero() => Element::NULL_HASH,
            Self::Empty { depth: 1 } => {
                *self = Self::Leaf(value);
                Element::NULL_HASH
            }
            Self::Empty { depth } => {
                let child = Self::Empty { depth: *depth - 1 };

                *self = Self::Parent {
                    left: Box::new(child.clone()),
                    right: Box::new(child),
                    // overwritten by the recursive call below
                    hash: Element::NULL_HASH,
                };

                self.set(bits, value)
            }
            Self::Parent { left, right, hash } => {
                let Some((head, tail)) = bits.split_first() else {
                    unreachable!("a parent always has path bits left to consume");
                };

                let previous = match *head {
                    false => left.set(tail, value),
                    true => right.set(tail, value),
                };

                if let (Self::Empty { depth }, Self::Empty { .. }) = (&**left, &**right) {
                    *self = Self::Empty { depth: depth + 1 };
                } else {
                    *hash = hash_merge([left.hash(), right.hash()]);
                }

                previous
            }
        }
    }

    /// The sibling hashes along `bits`, deepest first
    pub fn siblings(&self, bits: &BitSlice<u8, Msb0>) -> Vec<Element> {
        let mut siblings = Vec::with_capacity(bits.len());
        let mut node = self;

        for bit in bits.iter().by_vals() {
            match node {
                Self::Parent { left, right, .. } => match bit {
                    // we go left, so the right subtree is the sibling
                    false => {
                        siblings.push(right.hash());
                        node = left;
                    }
                    true => {
                        siblings.push(left.hash());
                        node = right;
                    }
                },
                // everything below is empty, so the remaining siblings are empty subtrees of
                // decreasing depth
                Self::Empty { depth } => {
                    siblings.extend((1..*depth).rev().map(empty_tree_hash));
                    break;
                }
                Self::Leaf(_) => break,
            }
        }

        siblings.reverse();
        siblings
    }
}
