//! Checks against the message log commitment
//!
//! Messages are written strictly at slot [`count`](MessageLogCommitment::count), so the log is
//! always `0..count` with no gaps, and no slot is ever written twice.

use authtree::{AppendLog, LogWitness, MembershipWitness};

use crate::{
    constants::{EMPTY_SLOT, MESSAGE_LOG_CAPACITY, MESSAGE_LOG_DEPTH},
    state::MessageLogCommitment,
    DepositError, Message,
};

/// The client-side message log
pub type MessageLog = AppendLog<MESSAGE_LOG_DEPTH>;

/// A witness into the message log
pub type MessageWitness = LogWitness<MESSAGE_LOG_DEPTH>;

impl MessageLogCommitment {
    /// The commitment after appending `message`, and the slot it was written to
    ///
    /// The witness must be for the next free slot and show it as [`EMPTY_SLOT`] under the
    /// current root
    pub fn append(
        &self,
        message: Message,
        witness: &MessageWitness,
    ) -> Result<(Self, u64), DepositError> {
        if self.count >= MESSAGE_LOG_CAPACITY {
            return Err(DepositError::LogFull {
                capacity: MESSAGE_LOG_CAPACITY,
            });
        }

        let (root, index) = witness.recompute(EMPTY_SLOT);

        if index != self.count || root != self.root {
            tracing::debug!(
                committed = %self.root,
                recomputed = %root,
                expected_index = self.count,
                index,
                "log witness is not for the next free slot"
            );
            return Err(DepositError::LogIndexMismatchOrStaleWitness);
        }

        let next = Self {
            root: witness.recompute(message.element()).0,
            count: self.count + 1,
        };

        Ok((next, index))
    }
}
