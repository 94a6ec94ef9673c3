#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::match_bool)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
#![deny(missing_docs)]

//! # Authenticated trees
//!
//! Client-side copies of the structures a deposit box commits to, and the witnesses that let a
//! verifier check claims about them while holding nothing but a root.
//!
//! Two shapes are provided, both binary Merkle trees of a fixed `DEPTH` (a tree of depth `N`
//! has `2^(N - 1)` leaves):
//!  - [`SparseMap`]: a key → value map where the position of a key is given by its `DEPTH - 1`
//!    least significant bits, and absent keys hold [`Element::NULL_HASH`]
//!  - [`AppendLog`]: a fixed-capacity sequence written strictly at the next free index
//!
//! ```rust
//! # use authtree::*;
//! let mut map = SparseMap::<256>::new();
//! let key = Element::new(42);
//!
//! // a witness taken before the write proves "not present" against the old root...
//! let witness = map.witness(key).unwrap();
//! assert_eq!(witness.recompute(Element::ZERO), (map.root(), key));
//!
//! // ...and predicts the root after the write
//! let predicted = witness.recompute(Element::ONE).0;
//! map.set(key, Element::ONE).unwrap();
//! assert_eq!(map.root(), predicted);
//! ```

mod error;
mod log;
mod map;
mod node;
mod witness;

#[cfg(any(test, feature = "proptest"))]
mod proptest;

pub use commitment::Element;
pub use error::Error;
pub use log::AppendLog;
pub use map::SparseMap;
pub use witness::{LogWitness, MapWitness, MembershipWitness};

/// Whether `element` can be addressed using `bits` path bits
pub(crate) fn fits_in(element: Element, bits: usize) -> bool {
    match u8::try_from(bits) {
        Ok(bits) => (element >> bits).is_zero(),
        // every element fits in 256 bits
        Err(_) => true,
    }
}
