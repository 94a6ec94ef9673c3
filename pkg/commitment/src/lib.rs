#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::match_bool)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
#![deny(missing_docs)]

//! Binding commitments used by the deposit box
//!
//! Every authenticated structure the verifier tracks is reduced to a single [`Element`]: the root
//! of a binary Merkle tree whose parent nodes are computed with [`hash_merge`]. This crate holds
//! the digest type, the hash functions, and the helpers to fold a leaf and its siblings into a
//! root.

mod element;
mod hash;
mod path;

pub use element::{Element, Lsb, LsbIter};
pub use hash::{empty_tree_hash, hash_bytes, hash_merge};
pub use path::compute_merkle_root;

/// The base field element that [`Element`]s are reduced into before hashing
///
/// This is (roughly) an integer modulo `p` where `p` is [`Element::MODULUS`]
pub type Base = poseidon_circuit::Bn256Fr;
