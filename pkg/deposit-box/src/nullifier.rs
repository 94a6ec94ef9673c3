//! Checks against the nullifier registry commitment
//!
//! The registry maps every spent nullifier key to [`USED`]. A key can only go from [`UNUSED`] to
//! [`USED`] once, which is what stops an identity from depositing twice.

use authtree::{MapWitness, MembershipWitness, SparseMap};

use crate::{
    constants::{NULLIFIER_DEPTH, UNUSED, USED},
    state::NullifierCommitment,
    DepositError, Element,
};

/// The client-side nullifier registry
pub type NullifierRegistry = SparseMap<NULLIFIER_DEPTH>;

/// A witness into the nullifier registry
pub type NullifierWitness = MapWitness<NULLIFIER_DEPTH>;

impl NullifierCommitment {
    /// The commitment after marking `key` as used
    ///
    /// The witness must be for `key` and show it as [`UNUSED`] under the current root
    pub fn mark_used(
        &self,
        key: Element,
        witness: &NullifierWitness,
    ) -> Result<Self, DepositError> {
        let (root, witness_key) = witness.recompute(UNUSED);

        if witness_key != key || root != self.root {
            tracing::debug!(
                committed = %self.root,
                recomputed = %root,
                %key,
                %witness_key,
                "nullifier witness does not show an unused key"
            );
            return Err(DepositError::NullifierAlreadyUsedOrStaleWitness);
        }

        Ok(Self {
            root: witness.recompute(USED).0,
        })
    }
}
