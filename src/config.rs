// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Protocol constants and engine configuration.

use serde::{Deserialize, Serialize};

/// Length in bytes of a mutation hash (BLAKE3 output).
pub const HASH_LEN: usize = 32;

/// Length in bytes of an execution-layer address.
pub const ADDRESS_LEN: usize = 20;

/// Domain separation prefix fed to the hasher before a mutation's canonical bytes.
pub const HASH_DOMAIN: &[u8] = b"cluster-state/mutation/v1";

/// Domain separation prefix for genesis cluster hashes.
pub const GENESIS_DOMAIN: &[u8] = b"cluster-state/genesis/v1";

/// Magic bytes at the start of an encoded mutation log.
pub const LOG_MAGIC: [u8; 4] = *b"CLST";

/// Current mutation log encoding version.
pub const LOG_VERSION: u32 = 1;

/// How many operator approvals a `nodeapprovals` mutation needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalPolicy {
    /// Every operator in the cluster must approve.
    #[default]
    AllOperators,
    /// At least `cluster.threshold` operators must approve.
    Threshold,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateConfig {
    pub approval_policy: ApprovalPolicy,
}

impl StateConfig {
    /// Number of approvals required for a cluster with `operators` members and
    /// the given signing `threshold`.
    pub fn required_approvals(&self, operators: usize, threshold: u32) -> usize {
        match self.approval_policy {
            ApprovalPolicy::AllOperators => operators,
            ApprovalPolicy::Threshold => threshold as usize,
        }
    }
}
