// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Deterministic Proof Structures.

use serde::{Deserialize, Serialize};

use crate::config::LOG_VERSION;
use crate::error::Result;
use crate::hash::{self, Hash};
use crate::replay::{ChainHead, MutationChain};

/// A receipt that a specific mutation sequence, applied to a specific genesis
/// cluster, produced a specific head.
///
/// Participants that replayed the same history compare receipts with
/// [`ChainProof::matches`] to detect divergence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChainProof {
    /// Mutation log encoding version.
    pub log_version: u32,

    /// BLAKE3 hash of the genesis cluster.
    pub genesis_hash: Hash,

    /// Hash of the last applied mutation (the next mutation's parent).
    pub head_hash: Hash,

    /// BLAKE3 hash of the resulting cluster value.
    pub cluster_hash: Hash,

    /// Number of mutations applied.
    pub mutation_count: u64,
}

impl ChainProof {
    pub fn new(genesis_hash: Hash, head: &ChainHead) -> Result<Self> {
        Ok(Self {
            log_version: LOG_VERSION,
            genesis_hash,
            head_hash: head.hash,
            cluster_hash: hash::cluster_hash(&head.cluster)?,
            mutation_count: head.height,
        })
    }

    pub fn from_chain(chain: &MutationChain) -> Result<Self> {
        let genesis_hash = hash::cluster_hash(chain.genesis())?;
        Self::new(genesis_hash, chain.head())
    }

    /// Two proofs describe the same history and outcome.
    pub fn matches(&self, other: &ChainProof) -> bool {
        self.genesis_hash == other.genesis_hash
            && self.head_hash == other.head_hash
            && self.cluster_hash == other.cluster_hash
            && self.mutation_count == other.mutation_count
    }
}
