//! Deterministic accounts and a stub credential system for tests

use commitment::{hash_bytes, hash_merge};
use secp256k1::SecretKey;

use crate::{
    client::LocalMirror, AdmitError, CredentialVerifier, DepositError, DepositVerifier, Element,
    Identity, Message, Nullifier,
};

/// A keypair derived from a one-byte seed
#[derive(Debug, Clone)]
pub struct TestAccount {
    secret_key: SecretKey,
    identity: Identity,
}

impl TestAccount {
    /// The account for `seed`. The same seed always gives the same account.
    #[must_use]
    pub fn from_seed(seed: u8) -> Self {
        let mut bytes = [0x11; 32];
        bytes[31] = seed;

        let secret_key = SecretKey::from_slice(&bytes).expect("bytes are a valid secret key");

        Self {
            identity: Identity::from_secret_key(&secret_key),
            secret_key,
        }
    }

    /// The public identity of this account
    #[must_use]
    pub fn identity(&self) -> Identity {
        self.identity
    }

    /// The nullifier key of this account for `context`
    ///
    /// Derived from the secret key, so it is not linkable to the account's address key
    #[must_use]
    pub fn nullifier_key(&self, context: Element) -> Element {
        let secret = hash_bytes(&self.secret_key.secret_bytes());
        hash_merge([secret, context])
    }

    /// A nullifier for `context`, with a proof [`TestCredentials`] accepts
    #[must_use]
    pub fn nullifier(&self, context: Element) -> Nullifier {
        let key = self.nullifier_key(context);
        let proof = stub_proof(key, self.identity.address_key(), context);

        Nullifier::new(self.identity, key, proof)
    }
}

/// Accepts exactly the proofs built by [`TestAccount::nullifier`]
///
/// The stub proof binds the key, the owner and the context, so changing any of them invalidates
/// it
#[derive(Debug, Clone, Copy, Default)]
pub struct TestCredentials;

impl CredentialVerifier for TestCredentials {
    fn verify(&self, nullifier: &Nullifier, context: Element) -> bool {
        nullifier.proof == stub_proof(nullifier.key, nullifier.owner.address_key(), context)
    }
}

fn stub_proof(key: Element, owner_key: Element, context: Element) -> Vec<u8> {
    hash_merge([key, owner_key, context]).to_be_bytes().to_vec()
}

/// A verifier, its administrator, and a client mirror kept in sync with it
#[derive(Debug)]
pub struct TestDepositBox {
    /// The verifier under test
    pub verifier: DepositVerifier<TestCredentials>,
    /// A mirror that records every accepted transition
    pub mirror: LocalMirror,
    /// The administrator
    pub admin: TestAccount,
}

impl Default for TestDepositBox {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDepositBox {
    /// A fresh box with the default config, administered by the account for seed 0
    #[must_use]
    pub fn new() -> Self {
        let admin = TestAccount::from_seed(0);

        Self {
            verifier: DepositVerifier::new(admin.identity(), TestCredentials),
            mirror: LocalMirror::new(),
            admin,
        }
    }

    /// Admit `account` with a fresh witness, recording it in the mirror on success
    pub fn admit(&mut self, account: &TestAccount) -> Result<(), AdmitError> {
        let witness = self
            .mirror
            .admission_witness(&account.identity())
            .expect("address keys fit in the allow-list");

        self.verifier
            .admit_address(&self.admin.identity(), &witness)?;

        self.mirror
            .record_admission(&account.identity())
            .expect("address keys fit in the allow-list");

        Ok(())
    }

    /// Deposit `message` as `account` with fresh witnesses, recording it in the mirror on success
    pub fn deposit(
        &mut self,
        account: &TestAccount,
        message: impl Into<Message>,
    ) -> Result<u64, DepositError> {
        let nullifier = account.nullifier(self.verifier.config().context());
        let request = self
            .mirror
            .deposit_request(nullifier, message.into())
            .map_err(|err| match err {
                authtree::Error::LogFull { capacity } => DepositError::LogFull { capacity },
                err => panic!("request for an account nullifier: {err}"),
            })?;

        let slot = self.verifier.submit(&request)?;

        let recorded = self
            .mirror
            .record_deposit(&request)
            .expect("accepted deposits fit in the mirror");
        assert_eq!(recorded, slot);

        Ok(slot)
    }
}
