use commitment::Element;

/// An error produced while updating a local tree or building a witness
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The key has bits set above the ones that select its position, so it would share a slot
    /// with a smaller key
    #[error("key {key} does not fit in a map of depth {depth}")]
    KeyOutOfRange {
        /// The rejected key
        key: Element,
        /// The depth of the map
        depth: usize,
    },

    /// Every slot of the log has been written
    #[error("the log is full ({capacity} slots)")]
    LogFull {
        /// The number of slots in the log
        capacity: u64,
    },

    /// The index does not name a slot of the log
    #[error("index {index} is outside a log of {capacity} slots")]
    IndexOutOfRange {
        /// The rejected index
        index: u64,
        /// The number of slots in the log
        capacity: u64,
    },

    /// A witness was built with a sibling list of the wrong length
    #[error("expected {expected} siblings, got {actual}")]
    WrongSiblingCount {
        /// `DEPTH - 1`
        expected: usize,
        /// The length that was supplied
        actual: usize,
    },
}
