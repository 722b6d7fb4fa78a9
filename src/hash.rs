// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Canonical BLAKE3 Hashing
//!
//! A mutation's hash is its identity in the chain: the next mutation names it
//! as `parent`, and attesting signers sign it.
//!
//! # Hash Input Structure
//! ```text
//! HASH_DOMAIN
//! ↓
//! codec::encode(Mutation)   parent, type, timestamp, data (type_url + value)
//! ```
//!
//! Signer and signature are not part of the input: they are produced over
//! the digest.

use crate::codec;
use crate::config::{GENESIS_DOMAIN, HASH_DOMAIN, HASH_LEN};
use crate::error::Result;
use crate::mutation::{Mutation, SignedMutation};
use crate::types::cluster::Cluster;

pub type Hash = [u8; HASH_LEN];

/// Hash of a signed mutation, covering only its unsigned content.
pub fn hash(signed: &SignedMutation) -> Result<Hash> {
    hash_mutation(&signed.mutation)
}

pub fn hash_mutation(mutation: &Mutation) -> Result<Hash> {
    let bytes = codec::encode(mutation)?;

    let mut hasher = blake3::Hasher::new();
    hasher.update(HASH_DOMAIN);
    hasher.update(&bytes);
    Ok(*hasher.finalize().as_bytes())
}

/// Hash of a genesis cluster; the parent of the first mutation in a chain.
pub fn cluster_hash(cluster: &Cluster) -> Result<Hash> {
    let bytes = codec::encode(cluster)?;

    let mut hasher = blake3::Hasher::new();
    hasher.update(GENESIS_DOMAIN);
    hasher.update(&bytes);
    Ok(*hasher.finalize().as_bytes())
}

/// Compute BLAKE3 hash of a byte slice
pub fn hash_bytes(data: &[u8]) -> Hash {
    *blake3::hash(data).as_bytes()
}
