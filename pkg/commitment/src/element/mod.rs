use ethnum::U256;

mod convert;
mod field;
mod fmt;
mod lsb;
mod ops;

#[cfg(feature = "borsh")]
mod borsh_impls;

#[cfg(feature = "rand")]
mod rand_impls;

#[cfg(feature = "serde")]
mod serde;

pub use lsb::{Lsb, LsbIter};

/// A 256-bit digest, key, or leaf value
///
/// Every value in `0..2^256` is representable, but hashing reduces an [`Element`] into a
/// [`Base`] first, so `x` and `x + MODULUS` hash identically. Anything a commitment must bind
/// uniquely (keys, messages) has to be [canonical](Element::is_canonical).
///
/// [`Base`]: crate::Base
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Element(#[cfg_attr(feature = "serde", serde(with = "serde"))] pub(crate) U256);

impl Element {
    /// Zero
    pub const ZERO: Self = Self(U256::ZERO);

    /// One
    pub const ONE: Self = Self(U256::ONE);

    /// `2^256 - 1`, not canonical
    pub const MAX: Self = Self(U256::MAX);

    /// What an unwritten leaf holds, the same value as [`Element::ZERO`]
    pub const NULL_HASH: Self = Self::ZERO;

    /// Starting value when folding bytes in [`hash_bytes`](crate::hash_bytes)
    pub(crate) const BYTE_HASH_IV: Self = Self(U256::new(2));

    /// An element holding `value`
    #[inline]
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(U256::new(value as u128))
    }

    /// Whether this is [`Element::ZERO`]
    #[inline]
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == U256::ZERO
    }

    /// Zero-padded big-endian hex, 64 characters with no prefix
    #[must_use]
    pub fn to_hex(self) -> String {
        hex::encode(self.to_be_bytes())
    }
}

#[cfg(any(test, feature = "proptest"))]
mod proptest {
    use ::proptest::{arbitrary::StrategyFor, prelude::*, strategy::Map};

    use super::Element;

    /// Uniform over all 256-bit values, canonical or not
    impl Arbitrary for Element {
        type Parameters = ();
        type Strategy = Map<StrategyFor<[u8; 32]>, fn([u8; 32]) -> Self>;

        fn arbitrary_with((): ()) -> Self::Strategy {
            any::<[u8; 32]>().prop_map(Element::from_be_bytes)
        }
    }
}
