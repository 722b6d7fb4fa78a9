// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Deterministic Chain Replay
//!
//! Folds an ordered sequence of top-level mutations onto a genesis cluster.
//!
//! # Guarantees
//! - Same genesis + same mutations => same cluster and head hash
//! - Each mutation's parent must be the hash of the mutation before it
//!   (the genesis cluster hash for the first)
//! - No partial application: a rejected mutation leaves the head unchanged

use std::sync::Arc;

use crate::engine::Engine;
use crate::error::{Context, Result, StateError};
use crate::hash::{self, Hash};
use crate::log::MutationLog;
use crate::mutation::SignedMutation;
use crate::types::cluster::Cluster;

/// The latest accepted state of a mutation chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainHead {
    pub cluster: Cluster,
    /// Parent required of the next mutation.
    pub hash: Hash,
    /// Number of mutations applied since genesis.
    pub height: u64,
}

impl ChainHead {
    pub fn genesis(cluster: Cluster) -> Result<Self> {
        let hash = hash::cluster_hash(&cluster).step("hash genesis")?;
        Ok(Self {
            cluster,
            hash,
            height: 0,
        })
    }

    /// Applies `signed` on top of this head, returning the successor head.
    pub fn apply(&self, engine: &Engine, signed: &SignedMutation) -> Result<ChainHead> {
        if signed.parent() != self.hash.as_slice() {
            return Err(StateError::parent_mismatch(&self.hash, signed.parent())).step("verify parent");
        }

        let cluster = engine.transform(&self.cluster, signed)?;
        let hash = hash::hash(signed).step("hash mutation")?;

        Ok(ChainHead {
            cluster,
            hash,
            height: self.height + 1,
        })
    }
}

/// Replays `mutations` on top of `genesis` and returns the final head.
pub fn replay(engine: &Engine, genesis: Cluster, mutations: &[SignedMutation]) -> Result<ChainHead> {
    let mut head = ChainHead::genesis(genesis)?;

    tracing::info!("Replaying {} mutations", mutations.len());

    for (index, signed) in mutations.iter().enumerate() {
        head = head.apply(engine, signed).map_err(|e| {
            tracing::warn!("Replay stopped at mutation {} ({}): {}", index, signed.kind(), e);
            StateError::AtIndex {
                index,
                source: Box::new(e),
            }
        })?;
    }

    tracing::info!(
        "Replay complete: height {}, {} validators",
        head.height,
        head.cluster.validators.len()
    );

    Ok(head)
}

/// A single-writer mutation chain.
///
/// Holds the accepted history and the current head. `apply` takes `&mut self`,
/// so mutations against one chain are applied one at a time.
#[derive(Debug)]
pub struct MutationChain {
    engine: Arc<Engine>,
    genesis: Cluster,
    head: ChainHead,
    history: Vec<SignedMutation>,
}

impl MutationChain {
    pub fn new(engine: Arc<Engine>, genesis: Cluster) -> Result<Self> {
        let head = ChainHead::genesis(genesis.clone())?;
        Ok(Self {
            engine,
            genesis,
            head,
            history: Vec::new(),
        })
    }

    /// Rebuilds a chain from an exchanged mutation log.
    pub fn from_log(engine: Arc<Engine>, genesis: Cluster, log: MutationLog) -> Result<Self> {
        let head = replay(&engine, genesis.clone(), &log.mutations)?;
        Ok(Self {
            engine,
            genesis,
            head,
            history: log.mutations,
        })
    }

    /// Applies `signed` as the next mutation. The head only advances on success.
    pub fn apply(&mut self, signed: SignedMutation) -> Result<&ChainHead> {
        let next = self.head.apply(&self.engine, &signed).map_err(|e| {
            tracing::warn!(
                "Rejected {} mutation at height {}: {}",
                signed.kind(),
                self.head.height,
                e
            );
            e
        })?;

        self.head = next;
        self.history.push(signed);
        Ok(&self.head)
    }

    pub fn head(&self) -> &ChainHead {
        &self.head
    }

    pub fn cluster(&self) -> &Cluster {
        &self.head.cluster
    }

    pub fn genesis(&self) -> &Cluster {
        &self.genesis
    }

    pub fn history(&self) -> &[SignedMutation] {
        &self.history
    }

    pub fn to_log(&self) -> MutationLog {
        MutationLog::new(self.history.clone())
    }
}
