use authtree::Element;
use borsh::{BorshDeserialize, BorshSerialize};
use commitment::empty_tree_hash;
use serde::{Deserialize, Serialize};

use crate::{
    constants::{ALLOW_LIST_DEPTH, MESSAGE_LOG_DEPTH, NULLIFIER_DEPTH},
    Identity,
};

/// The commitment to the allow-list
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub struct AllowListCommitment {
    /// Root of the allow-list map
    pub root: Element,
    /// Number of identities admitted so far
    pub admitted_count: u64,
}

/// The commitment to the nullifier registry
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub struct NullifierCommitment {
    /// Root of the nullifier map
    pub root: Element,
}

/// The commitment to the message log
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub struct MessageLogCommitment {
    /// Root of the message log
    pub root: Element,
    /// Number of messages appended so far, which is also the next free slot
    pub count: u64,
}

/// Everything a [`DepositVerifier`](crate::DepositVerifier) remembers
///
/// The trees themselves live with clients. This snapshot is small and fixed-size, so a host can
/// persist it after every accepted transition.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub struct VerifierState {
    /// The only identity allowed to admit others
    pub admin: Identity,
    /// See [`AllowListCommitment`]
    pub allow_list: AllowListCommitment,
    /// See [`NullifierCommitment`]
    pub nullifiers: NullifierCommitment,
    /// See [`MessageLogCommitment`]
    pub messages: MessageLogCommitment,
}

impl VerifierState {
    /// The state of a freshly created verifier: every structure is empty
    #[must_use]
    pub fn new(admin: Identity) -> Self {
        Self {
            admin,
            allow_list: AllowListCommitment {
                root: empty_tree_hash(ALLOW_LIST_DEPTH),
                admitted_count: 0,
            },
            nullifiers: NullifierCommitment {
                root: empty_tree_hash(NULLIFIER_DEPTH),
            },
            messages: MessageLogCommitment {
                root: empty_tree_hash(MESSAGE_LOG_DEPTH),
                count: 0,
            },
        }
    }
}
