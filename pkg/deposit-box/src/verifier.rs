use tokio::sync::broadcast;
use tokio_stream::Stream;

use crate::{
    allow_list::AllowListWitness,
    client::DepositRequest,
    event::{EventBus, VerifierEvent},
    message_log::MessageWitness,
    nullifier::NullifierWitness,
    policy, AdmitError, Config, ConfigError, CredentialVerifier, DepositError, Identity, Message,
    Nullifier, VerifierState,
};

/// The deposit box
///
/// Holds a [`VerifierState`] and nothing else about the three structures. Every call is one
/// atomic transition: all checks run against the current state, and only if every one passes
/// is the new state committed. A rejected call changes nothing.
///
/// Calls take `&mut self`, so transitions are applied one at a time by whoever owns the
/// verifier. Two clients racing against the same root is resolved by the first to be applied;
/// the second gets a stale witness error and should recompute against the new root.
#[derive(Debug)]
pub struct DepositVerifier<C> {
    state: VerifierState,
    credentials: C,
    config: Config,
    events: EventBus,
}

impl<C: CredentialVerifier> DepositVerifier<C> {
    /// A fresh verifier with the default [`Config`]
    pub fn new(admin: Identity, credentials: C) -> Self {
        Self::from_parts(VerifierState::new(admin), credentials, Config::default())
    }

    /// A fresh verifier with a custom [`Config`]
    pub fn with_config(
        admin: Identity,
        credentials: C,
        config: Config,
    ) -> Result<Self, ConfigError> {
        Self::restore(VerifierState::new(admin), credentials, config)
    }

    /// Resume from a persisted [`VerifierState`]
    pub fn restore(
        state: VerifierState,
        credentials: C,
        config: Config,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_parts(state, credentials, config))
    }

    fn from_parts(state: VerifierState, credentials: C, config: Config) -> Self {
        let events = EventBus::new(config.event_capacity);

        Self {
            state,
            credentials,
            config,
            events,
        }
    }

    /// The committed state
    pub fn state(&self) -> &VerifierState {
        &self.state
    }

    /// The config this verifier was built with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Receive every event published after this call
    pub fn subscribe(&self) -> broadcast::Receiver<VerifierEvent> {
        self.events.subscribe()
    }

    /// Like [`DepositVerifier::subscribe`], but as a [`Stream`]
    ///
    /// Events missed because the subscriber fell behind are skipped
    pub fn event_stream(&self) -> impl Stream<Item = VerifierEvent> + Send + 'static {
        self.events.stream()
    }

    /// Add an identity to the allow-list
    ///
    /// `witness` must be for the identity's [address key](Identity::address_key), computed
    /// against the current allow-list root
    #[tracing::instrument(err, skip_all, fields(sender = %sender, key = %witness.key()))]
    pub fn admit_address(
        &mut self,
        sender: &Identity,
        witness: &AllowListWitness,
    ) -> Result<(), AdmitError> {
        if *sender != self.state.admin {
            return Err(AdmitError::NotAdmin { sender: *sender });
        }

        let allow_list = self
            .state
            .allow_list
            .admit(self.config.max_addresses, witness)?;

        self.state.allow_list = allow_list;

        tracing::info!(
            admitted_count = allow_list.admitted_count,
            root = %allow_list.root,
            "address admitted"
        );
        self.events.publish(VerifierEvent::AddressAdmitted {
            admitted_count: allow_list.admitted_count,
            root: allow_list.root,
        });

        Ok(())
    }

    /// Spend a nullifier to append a message to the log, returning the slot it was written to
    ///
    /// Anyone may submit a deposit on behalf of the nullifier's owner
    #[tracing::instrument(err, skip_all, fields(nullifier = %nullifier.key))]
    pub fn deposit_message(
        &mut self,
        nullifier: &Nullifier,
        nullifier_witness: &NullifierWitness,
        allow_list_witness: &AllowListWitness,
        message: Message,
        log_witness: &MessageWitness,
    ) -> Result<u64, DepositError> {
        // a key and its alias above the modulus hash alike but sit on different registry leaves
        if !nullifier.key.is_canonical()
            || !self.credentials.verify(nullifier, self.config.context())
        {
            return Err(DepositError::CredentialProofInvalid);
        }

        let owner_key = self.credentials.owner_key(nullifier);
        self.state
            .allow_list
            .check_admitted(owner_key, allow_list_witness)?;

        let nullifiers = self
            .state
            .nullifiers
            .mark_used(nullifier.key, nullifier_witness)?;

        policy::validate(&message)?;

        let (messages, slot) = self.state.messages.append(message, log_witness)?;

        self.state = VerifierState {
            nullifiers,
            messages,
            ..self.state
        };

        tracing::info!(slot, root = %messages.root, "message deposited");
        self.events
            .publish(VerifierEvent::MessageDeposited { slot });

        Ok(slot)
    }

    /// [`DepositVerifier::deposit_message`] with the parts of a [`DepositRequest`]
    pub fn submit(&mut self, request: &DepositRequest) -> Result<u64, DepositError> {
        self.deposit_message(
            &request.nullifier,
            &request.nullifier_witness,
            &request.allow_list_witness,
            request.message,
            &request.log_witness,
        )
    }
}

#[cfg(test)]
mod tests;
