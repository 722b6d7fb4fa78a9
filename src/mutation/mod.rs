// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Mutations: the only way to express a cluster state transition.
//!
//! A [`Mutation`] names the state it builds on (`parent`), which transform
//! applies (`kind`), when it was created, and a typed payload. A
//! [`SignedMutation`] adds the signer identity and signature of parties that
//! attest to it directly.

pub mod add_validators;
pub mod any;
pub mod gen_validators;
pub mod node_approvals;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StateError};
use crate::types::time::Timestamp;

pub use add_validators::new_add_validators;
pub use any::{AnyPayload, Empty, Payload, SignedMutationList, ValidatorList};
pub use gen_validators::new_gen_validators;
pub use node_approvals::{new_node_approval, new_node_approvals};

/// Builtin mutation type tags.
///
/// The string forms are part of the wire format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MutationType {
    GenValidators,
    AddValidators,
    NodeApproval,
    NodeApprovals,
}

impl MutationType {
    pub const ALL: [MutationType; 4] = [
        MutationType::GenValidators,
        MutationType::AddValidators,
        MutationType::NodeApproval,
        MutationType::NodeApprovals,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            MutationType::GenValidators => "genvalidators",
            MutationType::AddValidators => "addvalidators",
            MutationType::NodeApproval => "nodeapproval",
            MutationType::NodeApprovals => "nodeapprovals",
        }
    }
}

impl fmt::Display for MutationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MutationType {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self> {
        MutationType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| StateError::UnknownType(s.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mutation {
    pub parent: Vec<u8>,
    #[serde(rename = "type")]
    pub kind: String,
    pub timestamp: Timestamp,
    pub data: AnyPayload,
}

impl Mutation {
    pub fn is(&self, kind: MutationType) -> bool {
        self.kind == kind.as_str()
    }

    /// Fails with a type mismatch unless this mutation is of type `kind`.
    pub fn expect_type(&self, kind: MutationType) -> Result<()> {
        if !self.is(kind) {
            return Err(StateError::TypeMismatch {
                expected: kind.as_str(),
                found: self.kind.clone(),
            });
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedMutation {
    pub mutation: Mutation,
    #[serde(default)]
    pub signer: Vec<u8>,
    #[serde(default)]
    pub signature: Vec<u8>,
}

impl SignedMutation {
    /// Wraps a mutation with no signer or signature.
    pub fn unsigned(mutation: Mutation) -> Self {
        Self {
            mutation,
            signer: Vec::new(),
            signature: Vec::new(),
        }
    }

    /// Attaches a signer identity and its signature over the mutation hash.
    pub fn with_signature(mut self, signer: Vec<u8>, signature: Vec<u8>) -> Self {
        self.signer = signer;
        self.signature = signature;
        self
    }

    pub fn kind(&self) -> &str {
        &self.mutation.kind
    }

    pub fn parent(&self) -> &[u8] {
        &self.mutation.parent
    }

    pub fn is_signed(&self) -> bool {
        !self.signer.is_empty() || !self.signature.is_empty()
    }
}
