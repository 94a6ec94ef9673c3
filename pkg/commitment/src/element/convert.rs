use core::str::FromStr;

use ethnum::U256;

use crate::Element;

macro_rules! from_unsigned {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Element {
                #[inline]
                fn from(value: $t) -> Self {
                    Element(U256::from(value))
                }
            }
        )*
    };
}

from_unsigned!(u8, u16, u32, u64, u128);

impl From<bool> for Element {
    #[inline]
    fn from(value: bool) -> Self {
        Element(U256::from(u8::from(value)))
    }
}

impl From<U256> for Element {
    #[inline]
    fn from(value: U256) -> Self {
        Element(value)
    }
}

impl From<Element> for U256 {
    #[inline]
    fn from(value: Element) -> Self {
        value.0
    }
}

/// Fails if the element does not fit in 64 bits
impl TryFrom<Element> for u64 {
    type Error = core::num::TryFromIntError;

    #[inline]
    fn try_from(value: Element) -> Result<u64, Self::Error> {
        u64::try_from(value.0)
    }
}

/// Hex, with or without a `0x` prefix, and without padding
impl FromStr for Element {
    type Err = <U256 as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        U256::from_str_radix(digits, 16).map(Element)
    }
}

impl Element {
    /// The 32 big-endian bytes of this element
    ///
    /// ```rust
    /// # use commitment::*;
    /// let mut expected = [0; 32];
    /// expected[31] = 1;
    ///
    /// assert_eq!(Element::ONE.to_be_bytes(), expected);
    /// ```
    #[inline]
    #[must_use]
    pub fn to_be_bytes(self) -> [u8; 32] {
        self.0.to_be_bytes()
    }

    /// The element encoded by 32 big-endian bytes
    #[inline]
    #[must_use]
    pub fn from_be_bytes(bytes: [u8; 32]) -> Self {
        Element(U256::from_be_bytes(bytes))
    }
}
