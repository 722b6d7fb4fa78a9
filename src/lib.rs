// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.

//! cluster-state: the mutation log and state-transition engine of a
//! distributed validator cluster.
//!
//! Every change to a cluster is a hash-linked [`SignedMutation`] that each
//! operator can independently validate and replay through the [`Engine`] to
//! reach the same [`Cluster`].

pub mod codec;
pub mod config;
pub mod engine;
pub mod error;
pub mod hash;
pub mod log;
pub mod mutation;
pub mod proof;
pub mod registry;
pub mod replay;
pub mod signing;
pub mod types;

#[cfg(test)]
pub mod tests;

pub use config::{ApprovalPolicy, StateConfig, HASH_LEN};
pub use engine::Engine;
pub use error::{ErrorKind, Result, StateError};
pub use hash::{hash, Hash};
pub use mutation::{Mutation, MutationType, SignedMutation};
pub use replay::{replay, ChainHead, MutationChain};
pub use signing::SignatureVerifier;
pub use types::{Address, Cluster, Clock, Operator, SystemClock, Timestamp, Validator, ValidatorAddresses};
