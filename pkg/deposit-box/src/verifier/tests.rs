use authtree::MembershipWitness;
use borsh::BorshDeserialize;
use test_strategy::proptest;
use tokio_stream::StreamExt;

use crate::{
    client::LocalMirror,
    constants::MESSAGE_LOG_CAPACITY,
    test_util::{TestAccount, TestCredentials, TestDepositBox},
    Config, Element, PolicyViolation,
};

use super::*;

#[test]
fn end_to_end() {
    let mut deposit_box = TestDepositBox::new();
    let alice = TestAccount::from_seed(1);
    let bob = TestAccount::from_seed(2);

    deposit_box.admit(&alice).unwrap();
    assert_eq!(deposit_box.verifier.state().allow_list.admitted_count, 1);

    // alice deposits through a relayer
    let context = deposit_box.verifier.config().context();
    let request = deposit_box
        .mirror
        .deposit_request(alice.nullifier(context), Message::from(0b10_0000u64))
        .unwrap();

    assert_eq!(deposit_box.verifier.submit(&request), Ok(0));
    deposit_box.mirror.record_deposit(&request).unwrap();
    assert_eq!(deposit_box.verifier.state().messages.count, 1);

    // the relayer replays the same request
    assert_eq!(
        deposit_box.verifier.submit(&request),
        Err(DepositError::NullifierAlreadyUsedOrStaleWitness)
    );

    // alice tries again with fresh witnesses
    assert_eq!(
        deposit_box.deposit(&alice, 0b10_0000u64),
        Err(DepositError::NullifierAlreadyUsedOrStaleWitness)
    );

    // bob was never admitted
    assert_eq!(
        deposit_box.deposit(&bob, 0u64),
        Err(DepositError::OwnerNotAdmitted)
    );

    assert_eq!(deposit_box.verifier.state().messages.count, 1);
    assert!(deposit_box.mirror.is_in_sync(deposit_box.verifier.state()));
    assert_eq!(
        deposit_box.mirror.messages().get(0),
        Some(Element::new(0b10_0000))
    );
}

#[test]
fn only_the_admin_can_admit() {
    let mut deposit_box = TestDepositBox::new();
    let alice = TestAccount::from_seed(1);
    let before = *deposit_box.verifier.state();

    let witness = deposit_box
        .mirror
        .admission_witness(&alice.identity())
        .unwrap();

    assert_eq!(
        deposit_box
            .verifier
            .admit_address(&alice.identity(), &witness),
        Err(AdmitError::NotAdmin {
            sender: alice.identity()
        })
    );
    assert_eq!(*deposit_box.verifier.state(), before);
}

#[test]
fn no_double_admission() {
    let mut deposit_box = TestDepositBox::new();
    let alice = TestAccount::from_seed(1);

    deposit_box.admit(&alice).unwrap();
    let before = *deposit_box.verifier.state();

    assert_eq!(
        deposit_box.admit(&alice),
        Err(AdmitError::StaleOrDuplicateWitness)
    );
    assert_eq!(*deposit_box.verifier.state(), before);
    assert_eq!(before.allow_list.admitted_count, 1);
}

#[test]
fn admissions_stop_at_max_addresses() {
    let mut deposit_box = TestDepositBox::new();

    for seed in 1..=100 {
        deposit_box.admit(&TestAccount::from_seed(seed)).unwrap();
    }

    assert_eq!(deposit_box.verifier.state().allow_list.admitted_count, 100);

    let extra = TestAccount::from_seed(101);
    assert_eq!(
        deposit_box.admit(&extra),
        Err(AdmitError::ListFull { max_addresses: 100 })
    );

    // the witness is not even looked at
    let admin = deposit_box.admin.identity();
    let garbage = AllowListWitness::new(Element::ONE, vec![Element::ONE; 255]).unwrap();
    assert_eq!(
        deposit_box.verifier.admit_address(&admin, &garbage),
        Err(AdmitError::ListFull { max_addresses: 100 })
    );
}

#[test]
fn configured_max_addresses() {
    let admin = TestAccount::from_seed(0);
    let config = Config {
        max_addresses: 2,
        ..Config::default()
    };

    let mut verifier =
        DepositVerifier::with_config(admin.identity(), TestCredentials, config).unwrap();
    let mut mirror = LocalMirror::new();

    for seed in 1..=3 {
        let account = TestAccount::from_seed(seed).identity();
        let witness = mirror.admission_witness(&account).unwrap();
        let result = verifier.admit_address(&admin.identity(), &witness);

        match seed {
            3 => assert_eq!(result, Err(AdmitError::ListFull { max_addresses: 2 })),
            _ => {
                result.unwrap();
                mirror.record_admission(&account).unwrap();
            }
        }
    }

    let bad = Config {
        max_addresses: MESSAGE_LOG_CAPACITY + 1,
        ..Config::default()
    };
    assert!(DepositVerifier::with_config(admin.identity(), TestCredentials, bad).is_err());
}

#[test]
fn stale_admission_witness_is_retryable() {
    let mut deposit_box = TestDepositBox::new();
    let alice = TestAccount::from_seed(1);
    let bob = TestAccount::from_seed(2);
    let admin = deposit_box.admin.identity();

    // both witnesses are taken against the empty root
    let bob_witness = deposit_box
        .mirror
        .admission_witness(&bob.identity())
        .unwrap();
    deposit_box.admit(&alice).unwrap();

    let err = deposit_box
        .verifier
        .admit_address(&admin, &bob_witness)
        .unwrap_err();
    assert_eq!(err, AdmitError::StaleOrDuplicateWitness);
    assert!(err.may_succeed_on_retry());

    deposit_box.admit(&bob).unwrap();
    assert!(deposit_box.mirror.is_in_sync(deposit_box.verifier.state()));
}

#[test]
fn racing_deposits() {
    let mut deposit_box = TestDepositBox::new();
    let alice = TestAccount::from_seed(1);
    let bob = TestAccount::from_seed(2);
    deposit_box.admit(&alice).unwrap();
    deposit_box.admit(&bob).unwrap();

    let context = deposit_box.verifier.config().context();
    let alice_request = deposit_box
        .mirror
        .deposit_request(alice.nullifier(context), Message::from(0u64))
        .unwrap();
    let bob_request = deposit_box
        .mirror
        .deposit_request(bob.nullifier(context), Message::from(0b01_1000u64))
        .unwrap();

    // both claim slot 0, alice gets there first
    assert_eq!(deposit_box.verifier.submit(&alice_request), Ok(0));
    deposit_box.mirror.record_deposit(&alice_request).unwrap();

    let err = deposit_box.verifier.submit(&bob_request).unwrap_err();
    assert_eq!(err, DepositError::NullifierAlreadyUsedOrStaleWitness);
    assert!(err.may_succeed_on_retry());

    // bob refreshes his nullifier witness but keeps the old log witness
    let partial = DepositRequest {
        nullifier_witness: deposit_box
            .mirror
            .nullifiers()
            .witness(bob_request.nullifier.key)
            .unwrap(),
        ..bob_request.clone()
    };
    assert_eq!(
        deposit_box.verifier.submit(&partial),
        Err(DepositError::LogIndexMismatchOrStaleWitness)
    );

    assert_eq!(deposit_box.deposit(&bob, 0b01_1000u64), Ok(1));
}

#[test]
fn invalid_credentials_are_rejected() {
    let mut deposit_box = TestDepositBox::new();
    let alice = TestAccount::from_seed(1);
    let mallory = TestAccount::from_seed(3);
    deposit_box.admit(&alice).unwrap();

    let context = deposit_box.verifier.config().context();
    let before = *deposit_box.verifier.state();

    // tampered proof
    let mut nullifier = alice.nullifier(context);
    nullifier.proof[0] ^= 1;
    let request = deposit_box
        .mirror
        .deposit_request(nullifier, Message::default())
        .unwrap();
    assert_eq!(
        deposit_box.verifier.submit(&request),
        Err(DepositError::CredentialProofInvalid)
    );

    // proof for another context
    let request = deposit_box
        .mirror
        .deposit_request(alice.nullifier(Element::new(1)), Message::default())
        .unwrap();
    assert_eq!(
        deposit_box.verifier.submit(&request),
        Err(DepositError::CredentialProofInvalid)
    );

    // mallory claims to be alice
    let mut nullifier = mallory.nullifier(context);
    nullifier.owner = alice.identity();
    let request = deposit_box
        .mirror
        .deposit_request(nullifier, Message::default())
        .unwrap();
    assert_eq!(
        deposit_box.verifier.submit(&request),
        Err(DepositError::CredentialProofInvalid)
    );

    assert_eq!(*deposit_box.verifier.state(), before);
}

#[test]
fn nullifier_key_above_the_modulus_is_rejected() {
    let mut deposit_box = TestDepositBox::new();
    let alice = TestAccount::from_seed(1);
    deposit_box.admit(&alice).unwrap();
    assert_eq!(deposit_box.deposit(&alice, 0u64), Ok(0));

    // same key in the field, different leaf in the registry
    let context = deposit_box.verifier.config().context();
    let mut alias = alice.nullifier(context);
    alias.key = alias.key + Element::MODULUS;
    assert!(TestCredentials.verify(&alias, context));

    let request = deposit_box
        .mirror
        .deposit_request(alias, Message::default())
        .unwrap();
    let (root, _) = request.nullifier_witness.recompute(crate::constants::UNUSED);
    assert_eq!(root, deposit_box.verifier.state().nullifiers.root);

    let before = *deposit_box.verifier.state();
    let err = deposit_box.verifier.submit(&request).unwrap_err();
    assert_eq!(err, DepositError::CredentialProofInvalid);
    assert!(!err.may_succeed_on_retry());
    assert_eq!(*deposit_box.verifier.state(), before);
}

#[test]
fn allow_list_witness_must_be_for_the_owner() {
    let mut deposit_box = TestDepositBox::new();
    let alice = TestAccount::from_seed(1);
    let bob = TestAccount::from_seed(2);
    deposit_box.admit(&alice).unwrap();

    // bob is not admitted, so he borrows alice's valid witness
    let context = deposit_box.verifier.config().context();
    let mut request = deposit_box
        .mirror
        .deposit_request(bob.nullifier(context), Message::default())
        .unwrap();
    request.allow_list_witness = deposit_box
        .mirror
        .admission_witness(&alice.identity())
        .unwrap();

    let (root, _) = request.allow_list_witness.recompute(crate::constants::ADMITTED);
    assert_eq!(root, deposit_box.verifier.state().allow_list.root);

    assert_eq!(
        deposit_box.verifier.submit(&request),
        Err(DepositError::OwnerNotAdmitted)
    );
}

#[test]
fn policy_violation_consumes_nothing() {
    let mut deposit_box = TestDepositBox::new();
    let alice = TestAccount::from_seed(1);
    deposit_box.admit(&alice).unwrap();
    let before = *deposit_box.verifier.state();

    for (bits, violation) in [
        (0b01_0000u64, PolicyViolation::SecondRequiresThird),
        (0b00_0110, PolicyViolation::FourthExcludesFifthAndSixth),
        (0b00_0101, PolicyViolation::FourthExcludesFifthAndSixth),
        (0b11_0000, PolicyViolation::ExclusiveFirstFlag),
    ] {
        assert_eq!(
            deposit_box.deposit(&alice, bits),
            Err(DepositError::PolicyViolation(violation))
        );
    }

    assert_eq!(
        deposit_box.deposit(&alice, Message::new(Element::MAX)),
        Err(DepositError::PolicyViolation(PolicyViolation::NonCanonical))
    );

    assert_eq!(*deposit_box.verifier.state(), before);

    // the nullifier was not spent, so alice can still deposit
    assert_eq!(deposit_box.deposit(&alice, 0b01_1000u64), Ok(0));
}

#[test]
fn zero_message_takes_a_slot() {
    let mut deposit_box = TestDepositBox::new();
    let alice = TestAccount::from_seed(1);
    let bob = TestAccount::from_seed(2);
    deposit_box.admit(&alice).unwrap();
    deposit_box.admit(&bob).unwrap();

    let empty_root = deposit_box.verifier.state().messages.root;
    assert_eq!(deposit_box.deposit(&alice, 0u64), Ok(0));

    let state = deposit_box.verifier.state();
    assert_eq!(state.messages.root, empty_root);
    assert_eq!(state.messages.count, 1);

    assert_eq!(deposit_box.deposit(&bob, 64u64), Ok(1));
}

#[test]
fn full_log_is_rejected() {
    let mut deposit_box = TestDepositBox::new();
    let alice = TestAccount::from_seed(1);
    deposit_box.admit(&alice).unwrap();

    let mut state = *deposit_box.verifier.state();
    state.messages.count = MESSAGE_LOG_CAPACITY;

    let mut verifier = DepositVerifier::restore(state, TestCredentials, Config::default()).unwrap();
    let request = deposit_box
        .mirror
        .deposit_request(alice.nullifier(verifier.config().context()), Message::default())
        .unwrap();

    assert_eq!(
        verifier.submit(&request),
        Err(DepositError::LogFull {
            capacity: MESSAGE_LOG_CAPACITY
        })
    );
    assert_eq!(*verifier.state(), state);
}

#[test]
fn full_mirror_reports_log_full() {
    let mut deposit_box = TestDepositBox::new();
    let alice = TestAccount::from_seed(0xff);
    deposit_box.admit(&alice).unwrap();

    // the mirror saw the log fill up, the verifier did not
    let context = deposit_box.verifier.config().context();
    for seed in 1..=128u8 {
        let request = deposit_box
            .mirror
            .deposit_request(TestAccount::from_seed(seed).nullifier(context), Message::default())
            .unwrap();
        deposit_box.mirror.record_deposit(&request).unwrap();
    }

    assert_eq!(
        deposit_box.deposit(&alice, 0u64),
        Err(DepositError::LogFull {
            capacity: MESSAGE_LOG_CAPACITY
        })
    );
}

#[test]
fn restored_verifier_continues() {
    let mut deposit_box = TestDepositBox::new();
    let alice = TestAccount::from_seed(1);
    let bob = TestAccount::from_seed(2);
    deposit_box.admit(&alice).unwrap();
    deposit_box.admit(&bob).unwrap();
    deposit_box.deposit(&alice, 0b10_0000u64).unwrap();

    let bytes = borsh::to_vec(deposit_box.verifier.state()).unwrap();
    let state = VerifierState::try_from_slice(&bytes).unwrap();

    deposit_box.verifier = DepositVerifier::restore(state, TestCredentials, Config::default()).unwrap();

    assert_eq!(deposit_box.deposit(&bob, 0b00_0011u64), Ok(1));
    assert_eq!(
        deposit_box.deposit(&alice, 0u64),
        Err(DepositError::NullifierAlreadyUsedOrStaleWitness)
    );
}

#[tokio::test]
async fn events_are_published() {
    let mut deposit_box = TestDepositBox::new();
    let alice = TestAccount::from_seed(1);
    let mut receiver = deposit_box.verifier.subscribe();
    let mut stream = Box::pin(deposit_box.verifier.event_stream());

    deposit_box.admit(&alice).unwrap();
    deposit_box.deposit(&alice, 0u64).unwrap();

    // rejected transitions publish nothing
    assert!(deposit_box.admit(&alice).is_err());
    assert!(deposit_box.deposit(&alice, 0u64).is_err());

    let admitted = VerifierEvent::AddressAdmitted {
        admitted_count: 1,
        root: deposit_box.verifier.state().allow_list.root,
    };
    let deposited = VerifierEvent::MessageDeposited { slot: 0 };

    assert_eq!(receiver.recv().await.unwrap(), admitted);
    assert_eq!(receiver.recv().await.unwrap(), deposited);
    assert!(receiver.try_recv().is_err());

    assert_eq!(stream.next().await.unwrap(), admitted);
    assert_eq!(stream.next().await.unwrap(), deposited);
}

#[proptest(cases = 4)]
fn slots_are_gap_free(#[strategy(1usize..8)] accounts: usize, messages: [u64; 8]) {
    let mut deposit_box = TestDepositBox::new();
    let accounts: Vec<_> = (1..=accounts)
        .map(|seed| TestAccount::from_seed(seed as u8))
        .collect();

    for account in &accounts {
        deposit_box.admit(account).unwrap();
    }

    for (expected, (account, payload)) in accounts.iter().zip(messages).enumerate() {
        // clear the control bits so every message passes the policy
        let message = Message::from_parts(Element::new(payload), Default::default());
        assert_eq!(deposit_box.deposit(account, message), Ok(expected as u64));
    }

    let state = deposit_box.verifier.state();
    assert_eq!(state.messages.count, accounts.len() as u64);
    assert!(deposit_box.mirror.is_in_sync(state));
}
