use std::ops::Deref;

use bitvec::{prelude::Msb0, slice::BitSlice, view::BitView};
use ethnum::U256;

use crate::Element;

/// The `N` least significant bits of an element, most significant first
///
/// Tree positions and message control bits are both read from the low bits of an [`Element`].
/// Derefs to a [`BitSlice`], and iterates as `bool`s in either direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[doc(alias = "least_significant_bits")]
pub struct Lsb {
    bytes: [u8; 32],
    count: usize,
}

impl Lsb {
    /// Get the bits as a [`BitSlice`]
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &BitSlice<u8, Msb0> {
        &self.bytes.view_bits::<Msb0>()[256 - self.count..]
    }
}

impl Deref for Lsb {
    type Target = BitSlice<u8, Msb0>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl IntoIterator for Lsb {
    type Item = bool;
    type IntoIter = LsbIter;

    #[inline]
    fn into_iter(self) -> LsbIter {
        LsbIter {
            front: 256 - self.count,
            back: 256,
            bytes: self.bytes,
        }
    }
}

/// Owning iterator over the bits of an [`Lsb`]
#[derive(Debug, Clone)]
pub struct LsbIter {
    bytes: [u8; 32],
    /// Index of the next bit from the front, counting from the most significant bit
    front: usize,
    /// One past the next bit from the back
    back: usize,
}

impl LsbIter {
    fn bit(&self, index: usize) -> bool {
        self.bytes[index / 8] & (0x80 >> (index % 8)) != 0
    }
}

impl Iterator for LsbIter {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if self.front == self.back {
            return None;
        }

        let bit = self.bit(self.front);
        self.front += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl DoubleEndedIterator for LsbIter {
    fn next_back(&mut self) -> Option<bool> {
        if self.front == self.back {
            return None;
        }

        self.back -= 1;
        Some(self.bit(self.back))
    }
}

impl ExactSizeIterator for LsbIter {}

impl Element {
    /// Get the `count` least significant bits, most significant first
    ///
    /// ```rust
    /// # use commitment::*;
    /// let element = Element::new(5);  // 0b000...000101
    /// let bits: Vec<bool> = element.lsb(4).into_iter().collect();
    ///
    /// assert_eq!(bits, vec![false, true, false, true]);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `count` is greater than 256
    #[doc(alias = "least_significant_bits")]
    #[inline]
    #[must_use]
    pub fn lsb(&self, count: usize) -> Lsb {
        assert!(count <= 256, "an element only has 256 bits");

        // bits above `count` never influence equality
        let masked = match count {
            0 => U256::ZERO,
            _ => {
                let high = (256 - count) as u32;
                (self.0 << high) >> high
            }
        };

        Lsb {
            bytes: masked.to_be_bytes(),
            count,
        }
    }
}
