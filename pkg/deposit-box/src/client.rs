//! What a depositor or relayer keeps: full copies of the trees, and the requests built from them

use serde::{Deserialize, Serialize};

use crate::{
    allow_list::{AllowList, AllowListWitness},
    constants::{ADMITTED, USED},
    message_log::{MessageLog, MessageWitness},
    nullifier::{NullifierRegistry, NullifierWitness},
    Identity, Message, Nullifier, VerifierState,
};

/// Everything a relayer needs to submit a deposit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositRequest {
    /// The credential being spent
    pub nullifier: Nullifier,
    /// Shows [`Nullifier::key`] as unused
    pub nullifier_witness: NullifierWitness,
    /// Shows the nullifier's owner as admitted
    pub allow_list_witness: AllowListWitness,
    /// The message to append
    pub message: Message,
    /// Shows the next free slot of the log as empty
    pub log_witness: MessageWitness,
}

/// A client's copy of the three structures a verifier commits to
///
/// Witnesses are taken from the mirror, submitted to the verifier, and once accepted the same
/// transition is recorded here so the next witness is computed against the new root. If a
/// submission is rejected as stale, the mirror has missed a transition made by someone else and
/// must catch up before retrying.
#[derive(Debug, Clone, Default)]
pub struct LocalMirror {
    allow_list: AllowList,
    nullifiers: NullifierRegistry,
    messages: MessageLog,
}

impl LocalMirror {
    /// A mirror of a fresh verifier
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The allow-list
    #[must_use]
    pub fn allow_list(&self) -> &AllowList {
        &self.allow_list
    }

    /// The nullifier registry
    #[must_use]
    pub fn nullifiers(&self) -> &NullifierRegistry {
        &self.nullifiers
    }

    /// The message log
    #[must_use]
    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    /// A witness for admitting `identity`
    pub fn admission_witness(&self, identity: &Identity) -> Result<AllowListWitness, authtree::Error> {
        self.allow_list.witness(identity.address_key())
    }

    /// Record that `identity` was admitted
    pub fn record_admission(&mut self, identity: &Identity) -> Result<(), authtree::Error> {
        self.allow_list.set(identity.address_key(), ADMITTED)?;
        Ok(())
    }

    /// Build the witnesses to deposit `message` with `nullifier`
    pub fn deposit_request(
        &self,
        nullifier: Nullifier,
        message: Message,
    ) -> Result<DepositRequest, authtree::Error> {
        Ok(DepositRequest {
            nullifier_witness: self.nullifiers.witness(nullifier.key)?,
            allow_list_witness: self.allow_list.witness(nullifier.owner.address_key())?,
            log_witness: self.messages.next_witness()?,
            nullifier,
            message,
        })
    }

    /// Record that a deposit was accepted, returning the slot it was written to
    ///
    /// Leaves the mirror unchanged on error
    pub fn record_deposit(&mut self, request: &DepositRequest) -> Result<u64, authtree::Error> {
        if self.messages.is_full() {
            return Err(authtree::Error::LogFull {
                capacity: MessageLog::capacity(),
            });
        }

        self.nullifiers.set(request.nullifier.key, USED)?;
        self.messages.append(request.message.element())
    }

    /// Whether the mirror commits to the same roots and counters as `state`
    #[must_use]
    pub fn is_in_sync(&self, state: &VerifierState) -> bool {
        self.allow_list.root() == state.allow_list.root
            && self.allow_list.len() as u64 == state.allow_list.admitted_count
            && self.nullifiers.root() == state.nullifiers.root
            && self.messages.root() == state.messages.root
            && self.messages.len() == state.messages.count
    }
}
