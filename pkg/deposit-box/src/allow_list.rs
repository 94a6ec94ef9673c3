//! Checks against the allow-list commitment
//!
//! The allow-list maps the [address key](crate::Identity::address_key) of every admitted
//! identity to [`ADMITTED`]. Entries are never removed.

use authtree::{MapWitness, MembershipWitness, SparseMap};

use crate::{
    constants::{ADMITTED, ALLOW_LIST_DEPTH, NOT_ADMITTED},
    state::AllowListCommitment,
    AdmitError, DepositError, Element,
};

/// The client-side allow-list
pub type AllowList = SparseMap<ALLOW_LIST_DEPTH>;

/// A witness into the allow-list
pub type AllowListWitness = MapWitness<ALLOW_LIST_DEPTH>;

impl AllowListCommitment {
    /// The commitment after admitting the key `witness` points at
    ///
    /// The witness must show the slot as [`NOT_ADMITTED`] under the current root, and fewer than
    /// `max_addresses` identities may have been admitted so far.
    pub fn admit(
        &self,
        max_addresses: u64,
        witness: &AllowListWitness,
    ) -> Result<Self, AdmitError> {
        if self.admitted_count >= max_addresses {
            return Err(AdmitError::ListFull { max_addresses });
        }

        let (root, key) = witness.recompute(NOT_ADMITTED);
        if root != self.root {
            tracing::debug!(
                committed = %self.root,
                recomputed = %root,
                %key,
                "allow-list witness does not show an empty slot"
            );
            return Err(AdmitError::StaleOrDuplicateWitness);
        }

        Ok(Self {
            root: witness.recompute(ADMITTED).0,
            admitted_count: self.admitted_count + 1,
        })
    }

    /// Check that `witness` shows `owner_key` as admitted under the current root
    pub fn check_admitted(
        &self,
        owner_key: Element,
        witness: &AllowListWitness,
    ) -> Result<(), DepositError> {
        let (root, key) = witness.recompute(ADMITTED);

        if key != owner_key {
            tracing::debug!(%key, %owner_key, "allow-list witness is for another identity");
            return Err(DepositError::OwnerNotAdmitted);
        }

        if root != self.root {
            tracing::debug!(
                committed = %self.root,
                recomputed = %root,
                "allow-list witness does not show the owner as admitted"
            );
            return Err(DepositError::OwnerNotAdmitted);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use commitment::empty_tree_hash;

    use super::*;

    fn empty() -> AllowListCommitment {
        AllowListCommitment {
            root: empty_tree_hash(ALLOW_LIST_DEPTH),
            admitted_count: 0,
        }
    }

    #[test]
    fn admit_matches_client_tree() {
        let mut tree = AllowList::new();
        let mut commitment = empty();

        for key in [Element::new(5), Element::new(1 << 40), Element::new(6)] {
            let witness = tree.witness(key).unwrap();
            commitment = commitment.admit(100, &witness).unwrap();
            tree.set(key, ADMITTED).unwrap();

            assert_eq!(commitment.root, tree.root());
        }

        assert_eq!(commitment.admitted_count, 3);
    }

    #[test]
    fn double_admission_is_rejected() {
        let mut tree = AllowList::new();
        let key = Element::new(77);

        let commitment = empty().admit(100, &tree.witness(key).unwrap()).unwrap();
        tree.set(key, ADMITTED).unwrap();

        // a fresh witness now shows the slot as admitted
        let again = tree.witness(key).unwrap();
        assert_eq!(
            commitment.admit(100, &again).unwrap_err(),
            AdmitError::StaleOrDuplicateWitness
        );
    }

    #[test]
    fn full_list_is_checked_before_the_witness() {
        let tree = AllowList::new();
        let commitment = AllowListCommitment {
            admitted_count: 2,
            ..empty()
        };

        // the witness is valid, but there is no room left
        assert_eq!(
            commitment.admit(2, &tree.witness(Element::ONE).unwrap()),
            Err(AdmitError::ListFull { max_addresses: 2 })
        );
    }

    #[test]
    fn admitted_check_binds_the_key() {
        let mut tree = AllowList::new();
        let owner = Element::new(10);
        let other = Element::new(11);

        let mut commitment = empty();
        for key in [owner, other] {
            commitment = commitment.admit(100, &tree.witness(key).unwrap()).unwrap();
            tree.set(key, ADMITTED).unwrap();
        }

        let owner_witness = tree.witness(owner).unwrap();
        assert!(commitment.check_admitted(owner, &owner_witness).is_ok());

        // a valid witness, but for somebody else
        let other_witness = tree.witness(other).unwrap();
        assert_eq!(
            commitment.check_admitted(owner, &other_witness),
            Err(DepositError::OwnerNotAdmitted)
        );

        // a witness for a key that was never admitted
        let stranger = Element::new(12);
        assert_eq!(
            commitment.check_admitted(stranger, &tree.witness(stranger).unwrap()),
            Err(DepositError::OwnerNotAdmitted)
        );
    }
}
