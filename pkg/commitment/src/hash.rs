use std::sync::OnceLock;

use poseidon_circuit::poseidon::primitives::{ConstantLength, Hash, P128Pow5T3};

use crate::{Base, Element};

/// Deepest tree whose empty root is precomputed by [`empty_tree_hash`]
const COMPUTE_DEPTH: usize = 257;

/// Hash `N` elements together
///
/// With `N = 2` this is the parent-node function of every tree in this workspace:
/// `parent = hash_merge([left, right])`
///
/// ```rust
/// # use commitment::*;
/// let a = Element::new(1);
/// let b = Element::new(2);
///
/// // order matters
/// assert_ne!(hash_merge([a, b]), hash_merge([b, a]));
/// ```
#[inline]
#[must_use]
pub fn hash_merge<const N: usize>(elements: [Element; N]) -> Element {
    type H<const N: usize> = Hash<Base, P128Pow5T3<Base>, ConstantLength<N>, 3, 2>;

    let hash = H::<N>::init().hash(elements.map(Element::to_base));
    Element::from_base(hash)
}

/// Hash a slice of bytes
///
/// The bytes are split into 16-byte big-endian chunks which are folded into
/// [`Element::BYTE_HASH_IV`] with [`hash_merge`]. Used to derive keys from public credentials.
///
/// ```rust
/// # use commitment::*;
/// assert_ne!(hash_bytes(&[1, 2, 3, 4]), hash_bytes(&[1, 2, 3, 5]));
/// ```
#[inline]
#[must_use]
pub fn hash_bytes(bytes: &[u8]) -> Element {
    bytes
        .chunks(core::mem::size_of::<u128>())
        .map(bytes_to_element)
        .fold(Element::BYTE_HASH_IV, |left, right| {
            hash_merge([left, right])
        })
}

/// Convert a slice of 1 to 16 bytes into an [`Element`], padding the low bytes with zeroes
fn bytes_to_element(bytes: &[u8]) -> Element {
    let mut padded_bytes = [0; 16];
    padded_bytes[0..bytes.len()].copy_from_slice(bytes);
    u128::from_be_bytes(padded_bytes).into()
}

/// The root of a tree of the given depth with every leaf set to [`Element::NULL_HASH`]
///
///  - `empty_tree_hash(1) = Element::NULL_HASH`
///  - `empty_tree_hash(n) = hash_merge([empty_tree_hash(n - 1), empty_tree_hash(n - 1)])`
///
/// Depths up to 257 are computed once and cached. These are the initial commitments of the
/// allow-list, nullifier registry and message log.
///
/// # Panics
///
/// Panics if `depth` is 0, since there is no such thing as a tree with depth 0
#[inline]
#[must_use]
pub fn empty_tree_hash(depth: usize) -> Element {
    assert_ne!(depth, 0, "the smallest possible tree has depth 1");

    match get_cache().get(depth - 1) {
        Some(hash) => *hash,
        None => {
            let child = empty_tree_hash(depth - 1);
            hash_merge([child, child])
        }
    }
}

fn get_cache() -> &'static [Element] {
    static CACHE: OnceLock<Vec<Element>> = OnceLock::new();

    CACHE.get_or_init(|| {
        let mut hash = Element::NULL_HASH;
        let mut vec = Vec::with_capacity(COMPUTE_DEPTH);
        vec.push(hash);

        for _ in 1..COMPUTE_DEPTH {
            hash = hash_merge([hash, hash]);
            vec.push(hash);
        }

        vec
    })
}

#[cfg(test)]
mod tests {
    use rand_chacha::{rand_core::SeedableRng, ChaChaRng};

    use super::*;

    #[test]
    fn hash_merge_is_deterministic_and_canonical() {
        let mut rng = ChaChaRng::from_seed([0; 32]);

        for _ in 0..16 {
            let left = Element::secure_random(&mut rng);
            let right = Element::secure_random(&mut rng);

            let merged = hash_merge([left, right]);
            assert_eq!(merged, hash_merge([left, right]));
            assert!(merged.is_canonical());
            assert_ne!(merged, hash_merge([right, left]));
        }
    }

    #[test]
    fn hash_bytes_depends_on_every_chunk() {
        let base = [0u8; 40];
        let mut changed = base;
        changed[39] = 1;

        assert_ne!(hash_bytes(&base), hash_bytes(&changed));
        assert_ne!(hash_bytes(&[]), hash_bytes(&[0]));
    }

    #[test]
    fn empty_tree_hash_is_recursive() {
        assert_eq!(empty_tree_hash(1), Element::NULL_HASH);

        for depth in [2, 8, 256] {
            let child = empty_tree_hash(depth - 1);
            assert_eq!(empty_tree_hash(depth), hash_merge([child, child]));
        }
    }

    #[test]
    fn empty_tree_hash_beyond_cache() {
        let child = empty_tree_hash(COMPUTE_DEPTH);
        assert_eq!(empty_tree_hash(COMPUTE_DEPTH + 1), hash_merge([child, child]));
    }
}
