use crate::Identity;

/// Why an [`AdmitAddress`](crate::DepositVerifier::admit_address) call was rejected
///
/// A rejected call leaves the verifier state untouched
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, strum_macros::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum AdmitError {
    /// Only the administrator may admit identities
    #[error("{sender} is not the administrator")]
    NotAdmin {
        /// The identity that attempted the admission
        sender: Identity,
    },

    /// The allow-list already holds the maximum number of identities
    #[error("the allow-list is full ({max_addresses} identities)")]
    ListFull {
        /// The configured maximum
        max_addresses: u64,
    },

    /// The witness does not show an empty slot under the committed root
    ///
    /// Either the identity is already admitted, or the witness was computed against an older
    /// root. The two cases cannot be told apart from the root alone.
    #[error("the allow-list witness is stale or the identity is already admitted")]
    StaleOrDuplicateWitness,
}

/// Why a [`DepositMessage`](crate::DepositVerifier::deposit_message) call was rejected
///
/// A rejected call leaves the verifier state untouched
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, strum_macros::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum DepositError {
    /// The credential proof does not verify for the nullifier context, or the nullifier key is
    /// not a canonical field element
    #[error("the credential proof is invalid")]
    CredentialProofInvalid,

    /// The allow-list witness does not show the nullifier's owner as admitted
    #[error("the nullifier owner is not on the allow-list")]
    OwnerNotAdmitted,

    /// The nullifier witness does not show an unspent nullifier under the committed root
    #[error("the nullifier has already been used, or its witness is stale")]
    NullifierAlreadyUsedOrStaleWitness,

    /// The message breaks the control bit rules
    #[error("policy violation: {0}")]
    PolicyViolation(#[from] PolicyViolation),

    /// The log witness is not for the next free slot under the committed root
    #[error("the log witness is not for the next free slot, or is stale")]
    LogIndexMismatchOrStaleWitness,

    /// Every slot of the message log has been written
    #[error("the message log is full ({capacity} slots)")]
    LogFull {
        /// The number of slots in the log
        capacity: u64,
    },
}

/// A rule the control bits of a message must obey
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error, strum_macros::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum PolicyViolation {
    /// `f1` must not be combined with any other flag
    #[error("f1 must be set alone")]
    ExclusiveFirstFlag,

    /// `f2` requires `f3`
    #[error("f2 requires f3")]
    SecondRequiresThird,

    /// `f4` excludes `f5` and `f6`
    #[error("f4 excludes f5 and f6")]
    FourthExcludesFifthAndSixth,

    /// The message is not reduced modulo the field, so it would share a leaf with a smaller one
    #[error("the message is not a canonical field element")]
    NonCanonical,
}

/// An invalid [`Config`](crate::Config)
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration could not be read or parsed
    #[error("figment error: {0}")]
    Figment(#[from] figment::Error),

    /// `max_addresses` must be positive and fit in the message log
    #[error("max_addresses must be between 1 and {capacity}, got {max_addresses}")]
    MaxAddresses {
        /// The rejected value
        max_addresses: u64,
        /// The number of slots in the message log
        capacity: u64,
    },

    /// The event channel needs room for at least one event, and is allocated up front
    #[error("event_capacity must be between 1 and {max}, got {event_capacity}")]
    EventCapacity {
        /// The rejected value
        event_capacity: usize,
        /// [`MAX_EVENT_CAPACITY`](crate::constants::MAX_EVENT_CAPACITY)
        max: usize,
    },
}

impl AdmitError {
    /// A short machine-readable tag for this error
    #[must_use]
    pub fn reason(&self) -> &'static str {
        self.into()
    }

    /// Whether recomputing the witness against the latest root and resubmitting could succeed
    #[must_use]
    pub fn may_succeed_on_retry(&self) -> bool {
        matches!(self, Self::StaleOrDuplicateWitness)
    }
}

impl DepositError {
    /// A short machine-readable tag for this error
    #[must_use]
    pub fn reason(&self) -> &'static str {
        self.into()
    }

    /// Whether recomputing the witnesses against the latest roots and resubmitting could
    /// succeed
    ///
    /// A nullifier that was genuinely spent will keep failing, but a verifier cannot tell that
    /// apart from a stale witness.
    #[must_use]
    pub fn may_succeed_on_retry(&self) -> bool {
        matches!(
            self,
            Self::OwnerNotAdmitted
                | Self::NullifierAlreadyUsedOrStaleWitness
                | Self::LogIndexMismatchOrStaleWitness
        )
    }
}

impl PolicyViolation {
    /// A short machine-readable tag for this violation
    #[must_use]
    pub fn reason(&self) -> &'static str {
        self.into()
    }
}
