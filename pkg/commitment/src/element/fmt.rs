use core::fmt;

use crate::Element;

/// Lowercase hex without a prefix or padding, the form roots and keys are logged in
impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Element({:#x})", self.0)
    }
}

impl fmt::LowerHex for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use crate::Element;

    #[test]
    fn formats() {
        let element = Element::new(0xbd6);

        assert_eq!(element.to_string(), "bd6");
        assert_eq!(format!("{element:?}"), "Element(0xbd6)");
        assert_eq!(format!("{element:#x}"), "0xbd6");
    }
}
