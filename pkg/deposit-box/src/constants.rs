//! Fixed parameters of the deposit box

use authtree::Element;

/// The most identities the administrator may admit
pub const MAX_ADDRESSES: u64 = 100;

/// The context tag credential proofs are bound to
pub const NULLIFIER_CONTEXT: u64 = 3030;

/// Depth of the allow-list map, so that every address key has its own leaf
pub const ALLOW_LIST_DEPTH: usize = 256;

/// Depth of the nullifier registry map
pub const NULLIFIER_DEPTH: usize = 256;

/// Depth of the message log, just large enough for one message per admitted identity
pub const MESSAGE_LOG_DEPTH: usize = log_depth_for(MAX_ADDRESSES);

/// Number of slots in the message log
pub const MESSAGE_LOG_CAPACITY: u64 = 1 << (MESSAGE_LOG_DEPTH - 1);

/// The largest event buffer a config may ask for
pub const MAX_EVENT_CAPACITY: usize = 1 << 16;

/// Number of low bits of a message reserved for control flags
pub const CONTROL_BITS: usize = 6;

/// Allow-list value of an identity that has not been admitted
pub const NOT_ADMITTED: Element = Element::ZERO;

/// Allow-list value of an admitted identity
pub const ADMITTED: Element = Element::ONE;

/// Registry value of a nullifier that has not been spent
pub const UNUSED: Element = Element::ZERO;

/// Registry value of a spent nullifier
pub const USED: Element = Element::ONE;

/// Value of a message slot that has not been written
pub const EMPTY_SLOT: Element = Element::ZERO;

/// The smallest depth `h` such that a tree of depth `h` has at least `entries` leaves
#[must_use]
pub const fn log_depth_for(entries: u64) -> usize {
    let mut depth = 1;

    while (1u64 << (depth - 1)) < entries {
        depth += 1;
    }

    depth
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_is_sized_for_max_addresses() {
        assert_eq!(MESSAGE_LOG_DEPTH, 8);
        assert_eq!(MESSAGE_LOG_CAPACITY, 128);
        assert!(MESSAGE_LOG_CAPACITY >= MAX_ADDRESSES);
    }

    #[test]
    fn log_depth_boundaries() {
        assert_eq!(log_depth_for(0), 1);
        assert_eq!(log_depth_for(1), 1);
        assert_eq!(log_depth_for(2), 2);
        assert_eq!(log_depth_for(64), 7);
        assert_eq!(log_depth_for(65), 8);
        assert_eq!(log_depth_for(128), 8);
        assert_eq!(log_depth_for(129), 9);
    }
}
