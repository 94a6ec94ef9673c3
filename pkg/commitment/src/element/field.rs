use ethnum::{uint, U256};
use ff::PrimeField;

use crate::{Base, Element};

impl Element {
    /// The modulus of the field that hashing operates in
    pub const MODULUS: Element = Element(uint!(
        "0x30644e72e131a029b85045b68181585d2833e84879b9709143e1f593f0000001"
    ));

    /// Convert this [`Element`] to its [`Base`] representation, reducing it modulo
    /// [`Element::MODULUS`]
    #[inline]
    #[must_use]
    pub fn to_base(self) -> Base {
        Base::from_raw(limbs(self.0))
    }

    /// Create an [`Element`] from a [`Base`]
    ///
    /// The result is always canonical
    #[inline]
    #[must_use]
    pub fn from_base(base: Base) -> Element {
        Self(U256::from_le_bytes(base.to_repr()))
    }

    /// Reduce this element modulo [`Element::MODULUS`]
    ///
    /// Canonical elements survive a round trip through [`Base`] unchanged, so two distinct
    /// canonical elements never hash the same way
    #[inline]
    #[must_use]
    pub fn canonical(self) -> Self {
        Self(self.0 % Self::MODULUS.0)
    }

    /// Whether this [`Element`] is already reduced
    ///
    /// ```rust
    /// # use commitment::*;
    /// assert!(Element::new(3030).is_canonical());
    /// assert!(!Element::MODULUS.is_canonical());
    /// assert!(!Element::MAX.is_canonical());
    /// ```
    #[inline]
    #[must_use]
    pub fn is_canonical(self) -> bool {
        self.0 < Self::MODULUS.0
    }
}

impl From<Base> for Element {
    fn from(value: Base) -> Self {
        Element::from_base(value)
    }
}

impl From<Element> for Base {
    fn from(value: Element) -> Self {
        value.to_base()
    }
}

/// Little-endian 64-bit limbs
fn limbs(value: U256) -> [u64; 4] {
    let (high, low) = value.into_words();

    #[allow(clippy::cast_possible_truncation)]
    [
        low as u64,
        (low >> 64) as u64,
        high as u64,
        (high >> 64) as u64,
    ]
}
