// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Shared test fixtures.
//!
//! Signatures here are keyed BLAKE3 MACs under the signer's "public" key. They
//! exercise the verification seam only.

use crate::config::StateConfig;
use crate::engine::Engine;
use crate::hash::{self, Hash};
use crate::mutation::{new_add_validators, new_gen_validators, new_node_approval, new_node_approvals, SignedMutation};
use crate::types::address::Address;
use crate::types::cluster::{Cluster, Operator, Validator, ValidatorAddresses};
use crate::types::time::{FixedClock, Timestamp};

pub const CLOCK: FixedClock = FixedClock(Timestamp::new(1_700_000_000, 0));

pub struct TestKey(pub [u8; 32]);

impl TestKey {
    pub fn public_key(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    pub fn sign(&self, signed: SignedMutation) -> SignedMutation {
        let digest = hash::hash(&signed).unwrap();
        let signature = blake3::keyed_hash(&self.0, &digest);
        signed.with_signature(self.public_key(), signature.as_bytes().to_vec())
    }
}

pub fn test_verifier(signer: &[u8], digest: &Hash, signature: &[u8]) -> bool {
    let Ok(key) = <[u8; 32]>::try_from(signer) else {
        return false;
    };
    blake3::keyed_hash(&key, digest).as_bytes().as_slice() == signature
}

pub fn keys(n: u8) -> Vec<TestKey> {
    (1..=n).map(|i| TestKey([i; 32])).collect()
}

pub fn genesis(keys: &[TestKey]) -> Cluster {
    let operators = keys
        .iter()
        .map(|k| Operator {
            address: Address([k.0[0]; 20]),
            public_key: k.public_key(),
        })
        .collect();
    Cluster::new("test-cluster", keys.len() as u32 * 2 / 3 + 1, operators)
}

pub fn engine() -> Engine {
    Engine::new(test_verifier, StateConfig::default())
}

pub fn engine_with(config: StateConfig) -> Engine {
    Engine::new(test_verifier, config)
}

/// `n` validators with distinct addresses, starting from `seed`.
pub fn validator_addrs(seed: u8, n: u8) -> Vec<ValidatorAddresses> {
    (0..n)
        .map(|i| {
            let b = seed.wrapping_add(i.wrapping_mul(2));
            ValidatorAddresses::new(
                Address([b; 20]).to_0x_hex(),
                Address([b.wrapping_add(1); 20]).to_0x_hex(),
            )
        })
        .collect()
}

pub fn parse_all(addrs: &[ValidatorAddresses]) -> Vec<Validator> {
    addrs
        .iter()
        .map(|a| Validator {
            fee_recipient: a.fee_recipient_address.parse().unwrap(),
            withdrawal: a.withdrawal_address.parse().unwrap(),
        })
        .collect()
}

/// Node approvals of `parent` signed by every key in `signers`.
pub fn approvals(parent: &[u8], signers: &[TestKey]) -> SignedMutation {
    let signed: Vec<_> = signers
        .iter()
        .map(|k| k.sign(new_node_approval(&CLOCK, parent).unwrap()))
        .collect();
    new_node_approvals(&CLOCK, &signed).unwrap()
}

/// A valid `addvalidators` composite and its two children.
pub struct AddValidators {
    pub gen: SignedMutation,
    pub approvals: SignedMutation,
    pub composite: SignedMutation,
}

pub fn add_validators(parent: &[u8], signers: &[TestKey], vals: &[ValidatorAddresses]) -> AddValidators {
    let gen = new_gen_validators(&CLOCK, parent, vals).unwrap();
    let approvals = approvals(&hash::hash(&gen).unwrap(), signers);
    let composite = new_add_validators(&CLOCK, &gen, &approvals).unwrap();
    AddValidators {
        gen,
        approvals,
        composite,
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("cluster_state=debug")
        .with_test_writer()
        .try_init();
}
