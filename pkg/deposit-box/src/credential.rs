use authtree::Element;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::Identity;

/// A one-time credential spent by a deposit
///
/// The key is what the nullifier registry records, and is derived by the owner from a secret and
/// the nullifier context, so it cannot be linked back to the owner's allow-list entry. The proof
/// shows the key was derived correctly for [`owner`](Nullifier::owner), and is only meaningful to
/// a [`CredentialVerifier`].
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub struct Nullifier {
    /// The identity that claims to own this nullifier
    pub owner: Identity,
    /// The nullifier registry key
    pub key: Element,
    /// An opaque proof of knowledge, checked by a [`CredentialVerifier`]
    #[serde(with = "hex")]
    pub proof: Vec<u8>,
}

impl Nullifier {
    /// Create a new nullifier
    #[must_use]
    pub fn new(owner: Identity, key: Element, proof: Vec<u8>) -> Self {
        Self { owner, key, proof }
    }
}

/// Checks the proof carried by a [`Nullifier`]
///
/// This is the seam for the external proof system. Implementations must be deterministic: the
/// same nullifier and context always give the same answer.
pub trait CredentialVerifier {
    /// Whether the nullifier's proof is valid for `context`
    fn verify(&self, nullifier: &Nullifier, context: Element) -> bool;

    /// The allow-list key of the nullifier's owner
    fn owner_key(&self, nullifier: &Nullifier) -> Element {
        nullifier.owner.address_key()
    }
}

impl<T: CredentialVerifier + ?Sized> CredentialVerifier for &T {
    fn verify(&self, nullifier: &Nullifier, context: Element) -> bool {
        (**self).verify(nullifier, context)
    }

    fn owner_key(&self, nullifier: &Nullifier) -> Element {
        (**self).owner_key(nullifier)
    }
}

impl<T: CredentialVerifier + ?Sized> CredentialVerifier for Box<T> {
    fn verify(&self, nullifier: &Nullifier, context: Element) -> bool {
        (**self).verify(nullifier, context)
    }

    fn owner_key(&self, nullifier: &Nullifier) -> Element {
        (**self).owner_key(nullifier)
    }
}
