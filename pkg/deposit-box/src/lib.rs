#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::match_bool)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_possible_truncation)]
#![deny(missing_docs)]

//! # Deposit box
//!
//! A verifier that holds nothing but roots and counters, and accepts changes to three
//! client-held structures only when they come with witnesses that match those roots:
//!  - an allow-list of identities the administrator has admitted
//!  - a registry of spent nullifiers, so each admitted identity deposits at most once
//!  - an append-only log of deposited messages
//!
//! A deposit is unlinkable to the admission that allowed it: the nullifier key is derived from
//! a secret, and anyone can relay it.
//!
//! ```rust
//! # use deposit_box::*;
//! # use secp256k1::SecretKey;
//! struct AcceptAll;
//!
//! impl CredentialVerifier for AcceptAll {
//!     fn verify(&self, _: &Nullifier, _: Element) -> bool {
//!         true
//!     }
//! }
//!
//! let admin = Identity::from_secret_key(&SecretKey::from_slice(&[1; 32]).unwrap());
//! let alice = Identity::from_secret_key(&SecretKey::from_slice(&[2; 32]).unwrap());
//!
//! let mut verifier = DepositVerifier::new(admin, AcceptAll);
//! let mut mirror = LocalMirror::new();
//!
//! // the admin admits alice
//! let witness = mirror.admission_witness(&alice).unwrap();
//! verifier.admit_address(&admin, &witness).unwrap();
//! mirror.record_admission(&alice).unwrap();
//!
//! // alice deposits a message with f1 set
//! let nullifier = Nullifier::new(alice, Element::new(1234), vec![]);
//! let request = mirror.deposit_request(nullifier, Message::from(0b10_0000u64)).unwrap();
//!
//! assert_eq!(verifier.submit(&request), Ok(0));
//! mirror.record_deposit(&request).unwrap();
//!
//! // a replay is rejected
//! assert_eq!(
//!     verifier.submit(&request),
//!     Err(DepositError::NullifierAlreadyUsedOrStaleWitness),
//! );
//! assert!(mirror.is_in_sync(verifier.state()));
//! ```

pub mod allow_list;
pub mod client;
pub mod config;
pub mod constants;
mod credential;
mod error;
mod event;
mod identity;
pub mod message_log;
pub mod nullifier;
pub mod policy;
mod state;
mod verifier;

#[cfg(any(test, feature = "test-api"))]
pub mod test_util;

pub use authtree::Element;
pub use client::{DepositRequest, LocalMirror};
pub use config::Config;
pub use credential::{CredentialVerifier, Nullifier};
pub use error::{AdmitError, ConfigError, DepositError, PolicyViolation};
pub use event::VerifierEvent;
pub use identity::Identity;
pub use policy::{ControlFlags, Flag, Message};
pub use state::{AllowListCommitment, MessageLogCommitment, NullifierCommitment, VerifierState};
pub use verifier::DepositVerifier;
