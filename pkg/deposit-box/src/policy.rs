//! Messages and the rules their control bits must follow

use authtree::Element;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::{constants::CONTROL_BITS, PolicyViolation};

/// One of the six control flags of a [`Message`]
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum_macros::EnumIter,
    strum_macros::IntoStaticStr,
    strum_macros::Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum Flag {
    /// Bit 5
    F1,
    /// Bit 4
    F2,
    /// Bit 3
    F3,
    /// Bit 2
    F4,
    /// Bit 1
    F5,
    /// Bit 0
    F6,
}

impl Flag {
    /// The bit of a message that holds this flag
    #[must_use]
    pub fn bit(self) -> u8 {
        // f1 is the most significant of the control bits
        (CONTROL_BITS - 1 - self as usize) as u8
    }
}

/// The control flags of a message, `f1` to `f6`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlFlags([bool; CONTROL_BITS]);

impl ControlFlags {
    /// No flags set
    pub const NONE: Self = Self([false; CONTROL_BITS]);

    /// Build from `[f1, f2, f3, f4, f5, f6]`
    #[must_use]
    pub fn new(flags: [bool; CONTROL_BITS]) -> Self {
        Self(flags)
    }

    /// Build from a list of set flags
    #[must_use]
    pub fn from_set(flags: &[Flag]) -> Self {
        let mut bits = [false; CONTROL_BITS];

        for flag in flags {
            bits[*flag as usize] = true;
        }

        Self(bits)
    }

    /// Whether `flag` is set
    #[must_use]
    pub fn get(&self, flag: Flag) -> bool {
        self.0[flag as usize]
    }

    /// The flags that are set, in order
    pub fn iter_set(&self) -> impl Iterator<Item = Flag> + '_ {
        Flag::iter().filter(|flag| self.get(*flag))
    }

    /// The flags as the low bits of an element
    #[must_use]
    pub fn to_element(self) -> Element {
        self.iter_set()
            .fold(Element::ZERO, |acc, flag| acc | (Element::ONE << flag.bit()))
    }

    /// Check the control bit rules
    ///
    ///  - `f1` must be set alone
    ///  - `f2` requires `f3`
    ///  - `f4` excludes `f5` and `f6`
    pub fn check(&self) -> Result<(), PolicyViolation> {
        let [f1, f2, f3, f4, f5, f6] = self.0;

        if f1 && (f2 || f3 || f4 || f5 || f6) {
            return Err(PolicyViolation::ExclusiveFirstFlag);
        }

        if f2 && !f3 {
            return Err(PolicyViolation::SecondRequiresThird);
        }

        if f4 && (f5 || f6) {
            return Err(PolicyViolation::FourthExcludesFifthAndSixth);
        }

        Ok(())
    }
}

/// A secret message deposited into the log
///
/// The 6 least significant bits are [`ControlFlags`], the rest is payload. The message is
/// otherwise opaque to the verifier.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    BorshSerialize,
    BorshDeserialize,
)]
#[serde(transparent)]
pub struct Message(Element);

impl Message {
    /// Wrap a raw element
    #[must_use]
    pub fn new(element: Element) -> Self {
        Self(element)
    }

    /// Combine a payload with control flags
    ///
    /// The top 6 bits of `payload` are shifted out
    #[must_use]
    pub fn from_parts(payload: Element, flags: ControlFlags) -> Self {
        Self((payload << CONTROL_BITS as u8) | flags.to_element())
    }

    /// The raw element stored in the log
    #[must_use]
    pub fn element(&self) -> Element {
        self.0
    }

    /// The bits above the control flags
    #[must_use]
    pub fn payload(&self) -> Element {
        self.0 >> CONTROL_BITS as u8
    }

    /// The control flags, read from the low bits with `f1` as the most significant
    #[must_use]
    pub fn flags(&self) -> ControlFlags {
        let mut flags = [false; CONTROL_BITS];

        for (flag, bit) in flags.iter_mut().zip(self.0.lsb(CONTROL_BITS)) {
            *flag = bit;
        }

        ControlFlags(flags)
    }
}

impl From<Element> for Message {
    fn from(element: Element) -> Self {
        Self(element)
    }
}

impl From<u64> for Message {
    fn from(value: u64) -> Self {
        Self(Element::new(value))
    }
}

/// Check a message before it is appended to the log
///
/// The message must be a canonical field element and its control flags must pass
/// [`ControlFlags::check`]
pub fn validate(message: &Message) -> Result<(), PolicyViolation> {
    if !message.element().is_canonical() {
        return Err(PolicyViolation::NonCanonical);
    }

    message.flags().check()
}

/// Whether [`validate`] accepts the message
#[must_use]
pub fn is_valid(message: &Message) -> bool {
    validate(message).is_ok()
}
