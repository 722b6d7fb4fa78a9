// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Cluster state definition.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::types::address::Address;

/// A distributed validator's execution-layer addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Validator {
    pub fee_recipient: Address,
    pub withdrawal: Address,
}

/// Textual validator addresses as received from configuration or an API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorAddresses {
    pub fee_recipient_address: String,
    pub withdrawal_address: String,
}

impl ValidatorAddresses {
    pub fn new(fee_recipient_address: impl Into<String>, withdrawal_address: impl Into<String>) -> Self {
        Self {
            fee_recipient_address: fee_recipient_address.into(),
            withdrawal_address: withdrawal_address.into(),
        }
    }
}

impl From<&Validator> for ValidatorAddresses {
    fn from(v: &Validator) -> Self {
        Self {
            fee_recipient_address: v.fee_recipient.to_0x_hex(),
            withdrawal_address: v.withdrawal.to_0x_hex(),
        }
    }
}

/// A party jointly operating the cluster.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Operator {
    pub address: Address,
    /// Identity matched against `SignedMutation::signer`.
    pub public_key: Vec<u8>,
}

/// The accumulated cluster configuration.
///
/// Values are never edited in place by callers: the engine produces each
/// successor from its predecessor. Collections are shared between successive
/// values and copied only when a transform writes to them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    pub name: String,
    pub threshold: u32,
    pub operators: Arc<Vec<Operator>>,
    pub validators: Arc<Vec<Validator>>,
}

impl Cluster {
    /// Genesis cluster with no validators.
    pub fn new(name: impl Into<String>, threshold: u32, operators: Vec<Operator>) -> Self {
        Self {
            name: name.into(),
            threshold,
            operators: Arc::new(operators),
            validators: Arc::new(Vec::new()),
        }
    }

    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }

    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    pub fn operator_by_key(&self, public_key: &[u8]) -> Option<&Operator> {
        self.operators.iter().find(|op| op.public_key == public_key)
    }

    /// Successor value with `validators` appended in order.
    pub(crate) fn with_validators_appended(&self, validators: &[Validator]) -> Self {
        let mut next = self.clone();
        Arc::make_mut(&mut next.validators).extend_from_slice(validators);
        next
    }
}
