use crate::{hash_merge, Element};

/// Fold a leaf and its siblings into a Merkle root
///
/// `siblings` yields `(sibling, is_right)` pairs, deepest first. `is_right` is `true` when the
/// node being folded is the *right* child at that level, i.e. the sibling sits on the left.
/// A tree of depth `N` has `N - 1` siblings, the root is not one of them.
///
/// ```text
///          C
///        /   \
///       A     B
///      / \   / \
///     0   1 2   3
/// ```
///
/// Proving the leaf at position 2 takes the siblings `3` (on the right) and `A` (on the left):
///
/// ```rust
/// # use commitment::*;
/// let a = hash_merge([Element::new(0), Element::new(1)]);
/// let b = hash_merge([Element::new(2), Element::new(3)]);
/// let c = hash_merge([a, b]);
///
/// let siblings = [(Element::new(3), false), (a, true)];
///
/// assert_eq!(compute_merkle_root(Element::new(2), siblings), c);
/// assert_ne!(compute_merkle_root(Element::NULL_HASH, siblings), c);
/// ```
pub fn compute_merkle_root<I: IntoIterator<Item = (Element, bool)>>(
    leaf: Element,
    siblings: I,
) -> Element {
    siblings
        .into_iter()
        .fold(leaf, |node, (sibling, is_right)| match is_right {
            false => hash_merge([node, sibling]),
            true => hash_merge([sibling, node]),
        })
}

#[cfg(test)]
mod tests {
    use crate::empty_tree_hash;

    use super::*;

    #[test]
    fn empty_siblings_fold_to_empty_root() {
        let siblings = (1..8).map(|depth| (empty_tree_hash(depth), false));
        assert_eq!(
            compute_merkle_root(Element::NULL_HASH, siblings),
            empty_tree_hash(8)
        );
    }

    #[test]
    fn no_siblings_returns_leaf() {
        let root = compute_merkle_root(Element::new(9), core::iter::empty());
        assert_eq!(root, Element::new(9));
    }
}
