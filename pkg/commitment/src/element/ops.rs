use core::ops::{Add, BitAnd, BitOr, Shl, Shr, Sub};

use crate::Element;

// Arithmetic wraps modulo 2^256, it is only used to build masks and flags. Field arithmetic goes
// through `Base`.

impl<T: Into<Element>> Add<T> for Element {
    type Output = Element;

    #[inline]
    fn add(self, rhs: T) -> Element {
        Element(self.0.wrapping_add(rhs.into().0))
    }
}

impl<T: Into<Element>> Sub<T> for Element {
    type Output = Element;

    #[inline]
    fn sub(self, rhs: T) -> Element {
        Element(self.0.wrapping_sub(rhs.into().0))
    }
}

impl<T: Into<Element>> BitOr<T> for Element {
    type Output = Element;

    #[inline]
    fn bitor(self, rhs: T) -> Element {
        Element(self.0 | rhs.into().0)
    }
}

impl<T: Into<Element>> BitAnd<T> for Element {
    type Output = Element;

    #[inline]
    fn bitand(self, rhs: T) -> Element {
        Element(self.0 & rhs.into().0)
    }
}

/// Bits shifted past the top are dropped
impl Shl<u8> for Element {
    type Output = Element;

    #[inline]
    fn shl(self, rhs: u8) -> Element {
        Element(self.0 << u32::from(rhs))
    }
}

impl Shr<u8> for Element {
    type Output = Element;

    #[inline]
    fn shr(self, rhs: u8) -> Element {
        Element(self.0 >> u32::from(rhs))
    }
}
